//! Per-item relevance scoring.
//!
//! The engine only consumes scores in `[0, 1]`; where they come from is up to
//! the [`RelevanceScorer`] plugged into it. [`HeuristicScorer`] is the
//! rule-based scorer the service ships with.

use crate::models::{
    ClothingCategory, ClothingItem, ColdnessLevel, ScoredItem, Style, TopGroup, User,
    WeatherSnapshot,
};

use super::weather_classifier::classify_weather;

/// Maps wardrobe items to relevance scores for one user, day and style
///
/// Implementations must return exactly one entry per input item, in any order.
#[cfg_attr(test, mockall::automock)]
pub trait RelevanceScorer: Send + Sync {
    fn score(
        &self,
        user: &User,
        wardrobe: &[ClothingItem],
        weather: &WeatherSnapshot,
        style: Option<Style>,
    ) -> Vec<ScoredItem>;

    /// Scorer name for logging
    fn name(&self) -> &'static str;
}

const NEUTRAL_SCORE: f64 = 0.5;
const STYLE_MATCH_BOOST: f64 = 0.2;
const STYLE_SIMILAR_BOOST: f64 = 0.1;
const STYLE_MISMATCH_PENALTY: f64 = 0.15;
const WARMTH_STEP_PENALTY: f64 = 0.1;
const WATERPROOF_BOOST: f64 = 0.1;
const WINDPROOF_BOOST: f64 = 0.05;

/// Rule-based relevance: style affinity, warmth fit and weather protection
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl RelevanceScorer for HeuristicScorer {
    fn score(
        &self,
        user: &User,
        wardrobe: &[ClothingItem],
        weather: &WeatherSnapshot,
        style: Option<Style>,
    ) -> Vec<ScoredItem> {
        let coldness = classify_weather(weather);
        let target_style = style.or(user.favourite_style);

        wardrobe
            .iter()
            .map(|item| {
                let mut score = NEUTRAL_SCORE;
                if let Some(target) = target_style {
                    score += style_boost(target, item.style);
                }
                score -= WARMTH_STEP_PENALTY
                    * f64::from(item.warmth_level.ordinal().abs_diff(warmth_target(item, coldness)));
                if item.category == ClothingCategory::Outerwear {
                    if weather.has_precipitation() && item.is_waterproof {
                        score += WATERPROOF_BOOST;
                    }
                    if weather.is_windy && item.is_windproof {
                        score += WINDPROOF_BOOST;
                    }
                }
                ScoredItem::new(item.clone(), score.clamp(0.0, 1.0))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

/// Nudge toward the requested style and its close relatives
pub fn style_boost(target: Style, item_style: Style) -> f64 {
    if item_style == target {
        STYLE_MATCH_BOOST
    } else if target.similar().contains(&item_style) {
        STYLE_SIMILAR_BOOST
    } else {
        -STYLE_MISMATCH_PENALTY
    }
}

/// Warmth ordinal an item of this kind should have at `coldness`.
///
/// Outerwear carries the full level; tops other than base layers top out at
/// medium; bottoms run one step lighter than the weather.
pub fn warmth_target(item: &ClothingItem, coldness: ColdnessLevel) -> u8 {
    let level = coldness.as_u8();
    match item.category {
        ClothingCategory::Outerwear => level,
        ClothingCategory::Top => match item.top_group() {
            Some(TopGroup::Base) => 1,
            _ if coldness == ColdnessLevel::Hot => 1,
            _ => 2,
        },
        ClothingCategory::Bottom => level.saturating_sub(1).max(1),
    }
}
