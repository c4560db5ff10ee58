use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

use crate::models::{
    ClothingItem, ColdnessLevel, ItemId, ScoredItem, ScoredOutfit, Style, User, WeatherSnapshot,
};

use super::{
    candidates::{build_candidates, PoolBounds},
    catalog::{TemplateCatalog, DEFAULT_CATALOG},
    grouping::ItemIndex,
    outfit_scorer::{OutfitScorer, ScoringContext, ScoringExtensions},
    relevance::RelevanceScorer,
    sampling::{SlotSampler, DEFAULT_ALPHA, DEFAULT_TOP_N},
    weather_classifier::{classify_weather, effective_coldness},
};

/// Tunable engine parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub top_n: usize,
    pub alpha: f64,
    pub extensions: ScoringExtensions,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            alpha: DEFAULT_ALPHA,
            extensions: ScoringExtensions::default(),
        }
    }
}

/// Composes ranked outfits from a wardrobe
///
/// Holds only read-only configuration, so one builder can serve any number of
/// concurrent requests. Every call brings its own random generator.
pub struct OutfitBuilder {
    scorer: Arc<dyn RelevanceScorer>,
    catalog: &'static TemplateCatalog,
    sampler: SlotSampler,
    outfit_scorer: OutfitScorer,
}

impl OutfitBuilder {
    pub fn new(scorer: Arc<dyn RelevanceScorer>, params: EngineParams) -> Self {
        Self::with_catalog(scorer, params, &DEFAULT_CATALOG)
    }

    pub fn with_catalog(
        scorer: Arc<dyn RelevanceScorer>,
        params: EngineParams,
        catalog: &'static TemplateCatalog,
    ) -> Self {
        Self {
            scorer,
            catalog,
            sampler: SlotSampler::new(params.top_n, params.alpha),
            outfit_scorer: OutfitScorer::new(params.extensions),
        }
    }

    /// Builds up to `count_max` outfits (at least one is attempted), best first.
    ///
    /// Returns an empty list when the wardrobe cannot fill any template for
    /// today's weather. Identical inputs and seed give identical outfits.
    pub fn build<R: Rng + ?Sized>(
        &self,
        user: &User,
        wardrobe: &[ClothingItem],
        weather: &WeatherSnapshot,
        style: Option<Style>,
        count_max: usize,
        rng: &mut R,
    ) -> Vec<ScoredOutfit> {
        if wardrobe.is_empty() {
            tracing::info!(user_id = user.user_id, "Empty wardrobe, nothing to compose");
            return Vec::new();
        }

        let coldness = self.coldness_for(user, weather);
        let scored = self.scorer.score(user, wardrobe, weather, style);
        if scored.len() != wardrobe.len() {
            tracing::warn!(
                scorer = self.scorer.name(),
                expected = wardrobe.len(),
                received = scored.len(),
                "Relevance scorer did not score every item"
            );
        }

        let ctx = ScoringContext {
            coldness,
            weather: Some(weather),
        };
        self.compose(&scored, &ctx, count_max, rng)
    }

    /// Runs the composition pipeline over an already scored pool
    pub fn compose<R: Rng + ?Sized>(
        &self,
        scored: &[ScoredItem],
        ctx: &ScoringContext<'_>,
        count_max: usize,
        rng: &mut R,
    ) -> Vec<ScoredOutfit> {
        let start = Instant::now();
        let bounds = PoolBounds::for_count(count_max);

        tracing::info!(
            items = scored.len(),
            coldness = ctx.coldness.as_u8(),
            count_max = bounds.max_outfits,
            "Composing outfits"
        );

        let templates = self.catalog.templates_for(ctx.coldness);
        if templates.is_empty() {
            tracing::warn!(coldness = ctx.coldness.as_u8(), "No templates for coldness level");
            return Vec::new();
        }

        let index = ItemIndex::build(scored);
        let candidates = build_candidates(&index, templates, &self.sampler, bounds, rng);

        if candidates.is_empty() {
            tracing::warn!(
                coldness = ctx.coldness.as_u8(),
                attempts = bounds.max_attempts,
                "No outfit could be composed from the wardrobe"
            );
            return Vec::new();
        }

        let item_scores: HashMap<ItemId, f64> = scored
            .iter()
            .map(|entry| (entry.item.item_id, entry.score))
            .collect();

        let ranked: Vec<ScoredOutfit> = candidates
            .into_iter()
            .map(|candidate| {
                let outfit = candidate.into_outfit();
                let score = self.outfit_scorer.score(&outfit.items, &item_scores, ctx);
                ScoredOutfit { outfit, score }
            })
            .collect();

        let selected = select_top(ranked, bounds.max_outfits);

        tracing::info!(
            outfits = selected.len(),
            best_score = selected.first().map(|o| o.score),
            processing_time_ms = start.elapsed().as_millis(),
            "Outfits composed"
        );

        selected
    }

    /// Coldness level the templates are chosen for, after the optional
    /// per-user sensitivity shift
    pub fn coldness_for(&self, user: &User, weather: &WeatherSnapshot) -> ColdnessLevel {
        let level = classify_weather(weather);
        if self.outfit_scorer.extensions.cold_sensitivity_shift {
            effective_coldness(level, user)
        } else {
            level
        }
    }
}

/// Best `k` outfits by score. Ties keep pool order.
pub fn select_top(mut outfits: Vec<ScoredOutfit>, k: usize) -> Vec<ScoredOutfit> {
    outfits.sort_by(|a, b| b.score.total_cmp(&a.score));
    outfits.truncate(k);
    outfits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClothingSubtype, Color, Outfit, Slot, TemperaturePeriod, Template, TopGroup, WarmthLevel,
    };
    use crate::services::{color_harmony::color_harmony, relevance::MockRelevanceScorer};
    use chrono::NaiveDate;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    const BASE_BOTTOM_ONLY: &[Template] = &[Template::new(
        "base_bottom",
        &[Slot::top(TopGroup::Base), Slot::bottom()],
    )];
    static SINGLE_SHAPE: TemplateCatalog = TemplateCatalog::new([
        BASE_BOTTOM_ONLY,
        BASE_BOTTOM_ONLY,
        BASE_BOTTOM_ONLY,
        BASE_BOTTOM_ONLY,
    ]);
    static NO_SHAPES: TemplateCatalog = TemplateCatalog::new([&[], &[], &[], &[]]);

    fn item(id: ItemId, subtype: ClothingSubtype, color: Color) -> ClothingItem {
        ClothingItem::new(id, 1, format!("item-{}", id), subtype, color)
    }

    fn weather(temp: f64) -> WeatherSnapshot {
        WeatherSnapshot::calm(
            "TestCity",
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            TemperaturePeriod::new(temp, temp, temp),
        )
    }

    /// Scorer mock that gives every item the same score
    fn flat_scorer(score: f64) -> Arc<dyn RelevanceScorer> {
        let mut mock = MockRelevanceScorer::new();
        mock.expect_score().returning(move |_, wardrobe, _, _| {
            wardrobe
                .iter()
                .map(|item| ScoredItem::new(item.clone(), score))
                .collect()
        });
        mock.expect_name().return_const("flat");
        Arc::new(mock)
    }

    fn big_wardrobe() -> Vec<ClothingItem> {
        vec![
            item(1, ClothingSubtype::Tshirt, Color::White),
            item(2, ClothingSubtype::Longsleeve, Color::Black),
            item(3, ClothingSubtype::TankTop, Color::Red),
            item(4, ClothingSubtype::Shirt, Color::Blue),
            item(5, ClothingSubtype::Cardigan, Color::Beige),
            item(6, ClothingSubtype::Hoodie, Color::Grey),
            item(7, ClothingSubtype::Sweater, Color::Green),
            item(8, ClothingSubtype::Vest, Color::Navy),
            item(9, ClothingSubtype::Dress, Color::Pink),
            item(10, ClothingSubtype::Jeans, Color::Blue),
            item(11, ClothingSubtype::Trousers, Color::Khaki),
            item(12, ClothingSubtype::Skirt, Color::Black),
            item(13, ClothingSubtype::Coat, Color::Brown).with_warmth(WarmthLevel::Warm),
            item(14, ClothingSubtype::Puffer, Color::Black).with_warmth(WarmthLevel::VeryWarm),
            item(15, ClothingSubtype::Trench, Color::Beige).with_warmth(WarmthLevel::Medium),
        ]
    }

    fn ids(outfit: &Outfit) -> Vec<ItemId> {
        outfit.signature()
    }

    #[test]
    fn test_hot_day_with_base_top_and_bottom() {
        let builder = OutfitBuilder::new(flat_scorer(0.9), EngineParams::default());
        let user = User::new(1, "test", "TestCity");
        let wardrobe = vec![
            item(1, ClothingSubtype::Tshirt, Color::White),
            item(2, ClothingSubtype::Jeans, Color::Blue),
        ];
        let expected_score = 0.9 + 0.5 * color_harmony(&wardrobe);

        // only base_bottom is fillable, so every seed must find it
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = builder.build(&user, &wardrobe, &weather(30.0), None, 1, &mut rng);
            assert_eq!(result.len(), 1, "seed {} composed nothing", seed);
            assert_eq!(ids(&result[0].outfit), vec![1, 2]);
            assert!((result[0].score - expected_score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_template_catalog_always_composes() {
        let builder =
            OutfitBuilder::with_catalog(flat_scorer(0.9), EngineParams::default(), &SINGLE_SHAPE);
        let user = User::new(1, "test", "TestCity");
        let wardrobe = vec![
            item(1, ClothingSubtype::Tshirt, Color::White),
            item(2, ClothingSubtype::Jeans, Color::Blue),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        let result = builder.build(&user, &wardrobe, &weather(30.0), None, 1, &mut rng);

        assert_eq!(result.len(), 1);
        assert_eq!(ids(&result[0].outfit), vec![1, 2]);
        assert!((result[0].score - (0.9 + 0.5 * color_harmony(&wardrobe))).abs() < 1e-9);
    }

    #[test]
    fn test_very_cold_without_outerwear_returns_nothing() {
        let builder = OutfitBuilder::new(flat_scorer(0.7), EngineParams::default());
        let user = User::new(1, "test", "TestCity");
        let wardrobe: Vec<ClothingItem> = big_wardrobe()
            .into_iter()
            .filter(|i| i.category != crate::models::ClothingCategory::Outerwear)
            .collect();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = builder.build(&user, &wardrobe, &weather(-15.0), None, 3, &mut rng);
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_empty_wardrobe_returns_nothing() {
        let builder = OutfitBuilder::new(flat_scorer(0.5), EngineParams::default());
        let user = User::new(1, "test", "TestCity");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(builder.build(&user, &[], &weather(15.0), None, 5, &mut rng).is_empty());
    }

    #[test]
    fn test_no_templates_returns_nothing() {
        let builder =
            OutfitBuilder::with_catalog(flat_scorer(0.5), EngineParams::default(), &NO_SHAPES);
        let user = User::new(1, "test", "TestCity");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(builder
            .build(&user, &big_wardrobe(), &weather(15.0), None, 2, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_results_respect_invariants_across_levels_and_seeds() {
        let builder = OutfitBuilder::new(flat_scorer(0.6), EngineParams::default());
        let user = User::new(1, "test", "TestCity");
        let wardrobe = big_wardrobe();

        for temp in [30.0, 15.0, 5.0, -15.0] {
            for seed in 0..20 {
                for count_max in [0, 1, 3] {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let result =
                        builder.build(&user, &wardrobe, &weather(temp), None, count_max, &mut rng);

                    assert!(result.len() <= count_max.max(1));

                    let mut signatures = HashSet::new();
                    for scored in &result {
                        let outfit = &scored.outfit;
                        let unique: HashSet<ItemId> =
                            outfit.items.iter().map(|i| i.item_id).collect();
                        assert_eq!(unique.len(), outfit.items.len(), "duplicate item");
                        assert!(signatures.insert(outfit.signature()), "duplicate outfit");
                        for (slot, item) in outfit.slots.iter().zip(&outfit.items) {
                            assert!(slot.accepts(item), "{:?} in {:?}", item.subtype, slot);
                        }
                    }

                    assert!(result.windows(2).all(|w| w[0].score >= w[1].score));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_outfits() {
        let builder = OutfitBuilder::new(flat_scorer(0.6), EngineParams::default());
        let user = User::new(1, "test", "TestCity");
        let wardrobe = big_wardrobe();

        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            builder
                .build(&user, &wardrobe, &weather(5.0), None, 3, &mut rng)
                .into_iter()
                .map(|o| (o.outfit.signature(), o.score))
                .collect::<Vec<_>>()
        };

        for seed in [1, 17, 42] {
            assert_eq!(run(seed), run(seed));
        }
    }

    #[test]
    fn test_identical_bottoms_are_both_acceptable() {
        let builder =
            OutfitBuilder::with_catalog(flat_scorer(0.5), EngineParams::default(), &SINGLE_SHAPE);
        let user = User::new(1, "test", "TestCity");
        let wardrobe = vec![
            item(1, ClothingSubtype::Tshirt, Color::White),
            item(2, ClothingSubtype::Jeans, Color::Blue),
            item(3, ClothingSubtype::Jeans, Color::Blue),
        ];

        let mut chosen = HashSet::new();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = builder.build(&user, &wardrobe, &weather(30.0), None, 1, &mut rng);
            assert_eq!(result.len(), 1);
            let bottom = result[0].outfit.items[1].item_id;
            assert!(bottom == 2 || bottom == 3);
            chosen.insert(bottom);
        }
        assert_eq!(chosen.len(), 2);
    }

    #[test]
    fn test_cold_sensitivity_shift_changes_templates() {
        let params = EngineParams {
            extensions: ScoringExtensions {
                cold_sensitivity_shift: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let builder = OutfitBuilder::new(flat_scorer(0.5), params);
        let mut user = User::new(1, "test", "TestCity");
        user.cold_sensitivity = crate::models::ColdSensitivity::High;

        // mild day feels cold, every cold template wants outerwear
        assert_eq!(builder.coldness_for(&user, &weather(15.0)), ColdnessLevel::Cold);

        let plain = OutfitBuilder::new(flat_scorer(0.5), EngineParams::default());
        assert_eq!(plain.coldness_for(&user, &weather(15.0)), ColdnessLevel::Mild);
    }

    #[test]
    fn test_select_top_is_stable_for_ties() {
        let outfit = |template: &'static str| Outfit {
            template,
            slots: Vec::new(),
            items: Vec::new(),
        };
        let pool = vec![
            ScoredOutfit { outfit: outfit("a"), score: 0.5 },
            ScoredOutfit { outfit: outfit("b"), score: 0.9 },
            ScoredOutfit { outfit: outfit("c"), score: 0.5 },
            ScoredOutfit { outfit: outfit("d"), score: 0.1 },
        ];

        let top: Vec<&str> = select_top(pool, 3).iter().map(|o| o.outfit.template).collect();
        assert_eq!(top, vec!["b", "a", "c"]);
    }
}
