use std::sync::Arc;

use crate::{
    config::Config,
    db::{InMemoryUserRepository, InMemoryWardrobeRepository},
    services::{
        BuildOutfit, HeuristicScorer, InMemoryWeatherProvider, ManageWardrobe, OutfitBuilder,
        SeasonMailing,
    },
};

/// Shared application state
///
/// Everything here is read-only or synchronises internally, so handlers
/// only ever clone `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub outfits: Arc<BuildOutfit>,
    pub wardrobe: Arc<ManageWardrobe>,
    pub mailing: Arc<SeasonMailing>,
    /// Weather is pushed in over HTTP until a forecast provider is wired up
    pub weather_store: Arc<InMemoryWeatherProvider>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    /// In-memory state with the heuristic scorer and the configured engine
    pub fn new(config: &Config) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let wardrobe = Arc::new(InMemoryWardrobeRepository::new());
        let weather_store = Arc::new(InMemoryWeatherProvider::new());
        let builder = Arc::new(OutfitBuilder::new(
            Arc::new(HeuristicScorer),
            config.engine_params(),
        ));

        Self {
            outfits: Arc::new(BuildOutfit::new(
                users.clone(),
                wardrobe.clone(),
                weather_store.clone(),
                builder,
                config.outfit_seed,
            )),
            mailing: Arc::new(SeasonMailing::new(users.clone(), weather_store.clone())),
            wardrobe: Arc::new(ManageWardrobe::new(users, wardrobe)),
            weather_store,
        }
    }
}
