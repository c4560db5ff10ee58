use std::collections::HashMap;

use crate::models::{ScoredItem, Slot};

/// Scored wardrobe partitioned by slot key, best-scored first in every bucket
#[derive(Debug, Default)]
pub struct ItemIndex<'a> {
    buckets: HashMap<Slot, Vec<&'a ScoredItem>>,
}

impl<'a> ItemIndex<'a> {
    /// Groups `scored` by `(category, top_group)`.
    ///
    /// Buckets are sorted by descending score; equal scores keep input order.
    pub fn build(scored: &'a [ScoredItem]) -> Self {
        let mut buckets: HashMap<Slot, Vec<&'a ScoredItem>> = HashMap::new();

        for entry in scored {
            if !entry.item.is_consistent() {
                tracing::warn!(
                    item_id = entry.item.item_id,
                    category = ?entry.item.category,
                    subtype = ?entry.item.subtype,
                    "Item subtype does not match its category, it can only fill matching slots"
                );
            }
            buckets.entry(Slot::of(&entry.item)).or_default().push(entry);
        }

        for bucket in buckets.values_mut() {
            // sort_by is stable, so ties stay in input order
            bucket.sort_by(|a, b| sanitize(b.score).total_cmp(&sanitize(a.score)));
        }

        Self { buckets }
    }

    /// Candidates for `slot`, best first. Empty when nothing fits.
    pub fn candidates(&self, slot: &Slot) -> &[&'a ScoredItem] {
        self.buckets.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Non-finite scores rank last
pub(crate) fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        f64::NEG_INFINITY
    }
}
