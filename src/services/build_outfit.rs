use std::sync::Arc;

use chrono::NaiveDate;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    db::{UserRepository, WardrobeRepository},
    error::{AppError, AppResult},
    models::{BuildOutfitRequest, BuildOutfitResponse, UserId, WeatherReport, WeatherSnapshot},
};

use super::{
    outfit_builder::OutfitBuilder, providers::WeatherProvider, season_change::detect_season_change,
    take_with::take_with, weather_classifier::summarize,
};

/// Upper bound on outfits per request
pub const MAX_OUTFITS_PER_REQUEST: usize = 20;

/// Outfit recommendation for a user and a day
pub struct BuildOutfit {
    users: Arc<dyn UserRepository>,
    wardrobe: Arc<dyn WardrobeRepository>,
    weather: Arc<dyn WeatherProvider>,
    builder: Arc<OutfitBuilder>,
    default_seed: Option<u64>,
}

impl BuildOutfit {
    pub fn new(
        users: Arc<dyn UserRepository>,
        wardrobe: Arc<dyn WardrobeRepository>,
        weather: Arc<dyn WeatherProvider>,
        builder: Arc<OutfitBuilder>,
        default_seed: Option<u64>,
    ) -> Self {
        Self {
            users,
            wardrobe,
            weather,
            builder,
            default_seed,
        }
    }

    /// Loads the user, wardrobe and weather, then runs the engine.
    ///
    /// An empty `outfits` list is a successful answer: the wardrobe simply
    /// cannot dress the user for this weather.
    pub async fn execute(
        &self,
        user_id: UserId,
        request: BuildOutfitRequest,
    ) -> AppResult<BuildOutfitResponse> {
        if request.count_max > MAX_OUTFITS_PER_REQUEST {
            return Err(AppError::InvalidInput(format!(
                "count_max must be at most {}",
                MAX_OUTFITS_PER_REQUEST
            )));
        }

        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;

        let wardrobe = self.wardrobe.get_user_wardrobe(user_id).await?;

        let city = request
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&user.location);
        let weather = self.fetch_weather(request.date, city).await?;

        let seed = request.seed.or(self.default_seed);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        tracing::info!(
            user_id,
            city,
            date = %request.date,
            wardrobe_size = wardrobe.len(),
            seeded = seed.is_some(),
            "Building outfits"
        );

        let outfits = self.builder.build(
            &user,
            &wardrobe,
            &weather,
            request.style,
            request.count_max,
            &mut rng,
        );

        Ok(BuildOutfitResponse {
            outfits,
            weather: summarize(&weather),
            take_with: take_with(&weather),
        })
    }

    /// Weather summary with accessory advice and any season notice
    pub async fn weather_report(&self, city: &str, date: NaiveDate) -> AppResult<WeatherReport> {
        let weather = self.fetch_weather(date, city).await?;
        Ok(WeatherReport {
            summary: summarize(&weather),
            take_with: take_with(&weather),
            season_notice: detect_season_change(&weather),
        })
    }

    async fn fetch_weather(&self, date: NaiveDate, city: &str) -> AppResult<WeatherSnapshot> {
        match self.weather.get_weather(date, city).await? {
            Some(weather) => Ok(weather),
            None => {
                tracing::warn!(
                    provider = self.weather.name(),
                    city,
                    date = %date,
                    "No weather available"
                );
                Err(AppError::WeatherUnavailable(format!("{} on {}", city, date)))
            }
        }
    }
}
