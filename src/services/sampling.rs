use std::collections::HashSet;

use rand::{distributions::WeightedIndex, prelude::Distribution, Rng};

use crate::models::{ItemId, ScoredItem};

use super::grouping::sanitize;

/// Default number of top-scored candidates a slot draws from
pub const DEFAULT_TOP_N: usize = 5;

/// Default sharpness of the preference for high scores
pub const DEFAULT_ALPHA: f64 = 3.0;

/// Picks one item per slot, biased toward high relevance
///
/// Weights are `exp(alpha * score)` over the best `top_n` unused candidates,
/// so a larger `alpha` concentrates picks on the top item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSampler {
    pub top_n: usize,
    pub alpha: f64,
}

impl Default for SlotSampler {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl SlotSampler {
    pub fn new(top_n: usize, alpha: f64) -> Self {
        Self {
            top_n: top_n.max(1),
            alpha,
        }
    }

    /// Draws one candidate not in `used`.
    ///
    /// `candidates` must already be sorted best-first. Returns `None` when no
    /// unused candidate is left, which fails the slot.
    pub fn pick<'a, R: Rng + ?Sized>(
        &self,
        candidates: &[&'a ScoredItem],
        used: &HashSet<ItemId>,
        rng: &mut R,
    ) -> Option<&'a ScoredItem> {
        let pool: Vec<&'a ScoredItem> = candidates
            .iter()
            .copied()
            .filter(|c| !used.contains(&c.item.item_id))
            .take(self.top_n)
            .collect();

        match pool.len() {
            0 => None,
            1 => Some(pool[0]),
            _ => {
                let weights = self.weights(&pool);
                match WeightedIndex::new(&weights) {
                    Ok(dist) => Some(pool[dist.sample(rng)]),
                    Err(e) => {
                        // Degenerate weights, fall back to the best candidate
                        tracing::warn!(error = %e, "Invalid sampling weights");
                        Some(pool[0])
                    }
                }
            }
        }
    }

    /// Normalised sampling probabilities for `pool`
    pub fn weights(&self, pool: &[&ScoredItem]) -> Vec<f64> {
        // Shifting by the max score keeps exp() finite without changing ratios
        let max = pool
            .iter()
            .map(|c| sanitize(c.score))
            .filter(|s| s.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let max = if max.is_finite() { max } else { 0.0 };

        // Non-finite scores never get drawn, whatever alpha is
        let raw: Vec<f64> = pool
            .iter()
            .map(|c| sanitize(c.score))
            .map(|s| {
                if s.is_finite() {
                    (self.alpha * (s - max)).exp()
                } else {
                    0.0
                }
            })
            .collect();
        let total: f64 = raw.iter().sum();

        if total > 0.0 && total.is_finite() {
            raw.into_iter().map(|w| w / total).collect()
        } else {
            raw
        }
    }
}
