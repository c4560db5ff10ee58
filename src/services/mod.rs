pub mod build_outfit;
pub mod candidates;
pub mod catalog;
pub mod color_harmony;
pub mod grouping;
pub mod manage_wardrobe;
pub mod outfit_builder;
pub mod outfit_scorer;
pub mod providers;
pub mod relevance;
pub mod sampling;
pub mod season_change;
pub mod season_mailing;
pub mod take_with;
pub mod weather_classifier;

pub use build_outfit::BuildOutfit;
pub use catalog::{TemplateCatalog, DEFAULT_CATALOG};
pub use manage_wardrobe::ManageWardrobe;
pub use outfit_builder::{select_top, EngineParams, OutfitBuilder};
pub use outfit_scorer::{OutfitScorer, ScoringContext, ScoringExtensions};
pub use providers::{InMemoryWeatherProvider, WeatherProvider};
pub use relevance::{HeuristicScorer, RelevanceScorer};
pub use season_change::detect_season_change;
pub use season_mailing::SeasonMailing;
pub use take_with::take_with;
pub use weather_classifier::{classify_weather, summarize};
