use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::models::{ItemId, Outfit, ScoredItem, Signature, Slot, Template};

use super::{grouping::ItemIndex, sampling::SlotSampler};

/// Size limits derived from how many outfits the caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolBounds {
    pub max_outfits: usize,
    pub target_candidates: usize,
    pub max_attempts: usize,
}

impl PoolBounds {
    pub fn for_count(count_max: usize) -> Self {
        let max_outfits = count_max.max(1);
        Self {
            max_outfits,
            target_candidates: 3 * max_outfits,
            max_attempts: 10 * max_outfits,
        }
    }
}

/// A fully filled template. `picks[i]` fills `template.slots[i]`.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub template: &'static Template,
    pub picks: Vec<&'a ScoredItem>,
}

impl Candidate<'_> {
    pub fn signature(&self) -> Signature {
        let mut ids: Signature = self.picks.iter().map(|p| p.item.item_id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn into_outfit(self) -> Outfit {
        Outfit {
            template: self.template.name,
            slots: self.template.slots.to_vec(),
            items: self.picks.into_iter().map(|p| p.item.clone()).collect(),
        }
    }
}

/// Samples templates and fills them until enough distinct candidates exist
/// or the attempt budget is spent.
///
/// Only templates whose every slot has a candidate are drawn.
///
/// Failed attempts leave nothing behind; an empty result is a normal outcome.
pub fn build_candidates<'a, R: Rng + ?Sized>(
    index: &ItemIndex<'a>,
    templates: &'static [Template],
    sampler: &SlotSampler,
    bounds: PoolBounds,
    rng: &mut R,
) -> Vec<Candidate<'a>> {
    let mut candidates = Vec::new();

    if templates.is_empty() || index.is_empty() {
        return candidates;
    }

    // A template with an empty slot can never be filled
    let fillable: Vec<&'static Template> = templates
        .iter()
        .filter(|template| is_fillable(index, template))
        .collect();
    if fillable.is_empty() {
        tracing::debug!(templates = templates.len(), "No template has every slot stocked");
        return candidates;
    }

    let mut seen: HashSet<Signature> = HashSet::new();
    let mut failed_attempts = 0usize;
    let mut duplicates = 0usize;

    for attempt in 0..bounds.max_attempts {
        if candidates.len() >= bounds.target_candidates {
            break;
        }

        let Some(&template) = fillable.choose(rng) else {
            break;
        };

        let Some(picks) = fill_template(index, template.slots, sampler, rng) else {
            failed_attempts += 1;
            tracing::debug!(attempt, template = template.name, "Slot could not be filled");
            continue;
        };

        let candidate = Candidate { template, picks };
        if seen.insert(candidate.signature()) {
            candidates.push(candidate);
        } else {
            duplicates += 1;
        }
    }

    tracing::debug!(
        candidates = candidates.len(),
        failed_attempts,
        duplicates,
        "Candidate pool built"
    );

    candidates
}

/// True when every slot of `template` has at least one candidate
fn is_fillable(index: &ItemIndex<'_>, template: &Template) -> bool {
    template
        .slots
        .iter()
        .all(|slot| !index.candidates(slot).is_empty())
}

/// Fills `slots` in order, threading the used set through the attempt
fn fill_template<'a, R: Rng + ?Sized>(
    index: &ItemIndex<'a>,
    slots: &[Slot],
    sampler: &SlotSampler,
    rng: &mut R,
) -> Option<Vec<&'a ScoredItem>> {
    let mut used: HashSet<ItemId> = HashSet::with_capacity(slots.len());
    let mut picks = Vec::with_capacity(slots.len());

    for slot in slots {
        let pick = sampler.pick(index.candidates(slot), &used, rng)?;
        used.insert(pick.item.item_id);
        picks.push(pick);
    }

    Some(picks)
}
