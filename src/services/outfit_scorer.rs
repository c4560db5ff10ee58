use std::collections::HashMap;

use crate::models::{
    ClothingCategory, ClothingItem, ClothingSubtype, ColdnessLevel, ItemId, WeatherSnapshot,
};

use super::{catalog::target_outerwear_warmth, color_harmony::color_harmony};

/// Score given to an outfit with no items, low enough to always rank last
pub const EMPTY_OUTFIT_SCORE: f64 = -1.0e9;

const COLOR_WEIGHT: f64 = 0.5;
const OUTERWEAR_WEIGHT: f64 = 0.2;
const WARMTH_STEP_PENALTY: f64 = 0.35;
const SHORTS_STEP_PENALTY: f64 = 0.3;
const UNPROTECTED_PRECIPITATION_PENALTY: f64 = 1.0;
const UNPROTECTED_WIND_PENALTY: f64 = 0.5;

/// Optional refinements of the outfit score. All off by default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoringExtensions {
    /// Shift coldness by the user's cold sensitivity before composing
    pub cold_sensitivity_shift: bool,
    /// Penalise shorts outside hot weather
    pub shorts_penalty: bool,
    /// Penalise outerwear lacking waterproofing or windproofing the weather calls for
    pub weather_outerwear_penalty: bool,
}

/// Per-request facts the scorer needs besides the outfit itself
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'w> {
    pub coldness: ColdnessLevel,
    pub weather: Option<&'w WeatherSnapshot>,
}

/// Ranks whole outfits on relevance, color harmony and warmth fit
#[derive(Debug, Default, Clone, Copy)]
pub struct OutfitScorer {
    pub extensions: ScoringExtensions,
}

impl OutfitScorer {
    pub fn new(extensions: ScoringExtensions) -> Self {
        Self { extensions }
    }

    /// `base_ml + 0.5 * color − 0.2 * outerwear_penalty`, minus the enabled
    /// extension penalties.
    ///
    /// Item relevance comes from `item_scores`; unknown ids count as `0.0`.
    pub fn score(
        &self,
        items: &[ClothingItem],
        item_scores: &HashMap<ItemId, f64>,
        ctx: &ScoringContext<'_>,
    ) -> f64 {
        if items.is_empty() {
            return EMPTY_OUTFIT_SCORE;
        }

        let base_ml = items
            .iter()
            .map(|item| item_scores.get(&item.item_id).copied().unwrap_or(0.0))
            .sum::<f64>()
            / items.len() as f64;

        let color_score = color_harmony(items);

        let mut outerwear_penalty: f64 = items
            .iter()
            .map(|item| outerwear_warmth_penalty(ctx.coldness, item))
            .sum();

        if self.extensions.weather_outerwear_penalty {
            if let Some(weather) = ctx.weather {
                outerwear_penalty += items
                    .iter()
                    .map(|item| outerwear_weather_penalty(weather, item))
                    .sum::<f64>();
            }
        }

        let mut score = base_ml + COLOR_WEIGHT * color_score - OUTERWEAR_WEIGHT * outerwear_penalty;

        if self.extensions.shorts_penalty {
            score -= items
                .iter()
                .map(|item| shorts_in_cold_penalty(ctx.coldness, item))
                .sum::<f64>();
        }

        score
    }
}

/// `0.35` per ordinal step between the item's warmth and the level's target.
/// Zero for anything that is not outerwear.
pub fn outerwear_warmth_penalty(coldness: ColdnessLevel, item: &ClothingItem) -> f64 {
    if item.category != ClothingCategory::Outerwear {
        return 0.0;
    }
    let target = target_outerwear_warmth(coldness);
    let actual = item.warmth_level.ordinal();
    WARMTH_STEP_PENALTY * f64::from(actual.abs_diff(target))
}

/// Outerwear that will get wet or let wind through
pub fn outerwear_weather_penalty(weather: &WeatherSnapshot, item: &ClothingItem) -> f64 {
    if item.category != ClothingCategory::Outerwear {
        return 0.0;
    }

    let mut penalty = 0.0;
    if weather.has_precipitation() && !item.is_waterproof {
        penalty += UNPROTECTED_PRECIPITATION_PENALTY;
    }
    if weather.is_windy && !item.is_windproof {
        penalty += UNPROTECTED_WIND_PENALTY;
    }
    penalty
}

/// Grows with every level above hot
pub fn shorts_in_cold_penalty(coldness: ColdnessLevel, item: &ClothingItem) -> f64 {
    if item.subtype != ClothingSubtype::Shorts {
        return 0.0;
    }
    SHORTS_STEP_PENALTY * f64::from(coldness.as_u8() - 1)
}
