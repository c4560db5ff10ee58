use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{error::AppResult, models::WeatherSnapshot};

use super::WeatherProvider;

/// Snapshots pushed in ahead of time, keyed by city and date.
/// City lookups ignore case and surrounding whitespace.
#[derive(Debug, Default)]
pub struct InMemoryWeatherProvider {
    snapshots: RwLock<HashMap<(String, NaiveDate), WeatherSnapshot>>,
}

fn city_key(city: &str) -> String {
    city.trim().to_lowercase()
}

impl InMemoryWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `snapshot`, replacing any earlier one for the same city and day
    pub async fn set(&self, snapshot: WeatherSnapshot) {
        let key = (city_key(&snapshot.location), snapshot.date);
        tracing::debug!(city = %snapshot.location, date = %snapshot.date, "Weather snapshot stored");
        self.snapshots.write().await.insert(key, snapshot);
    }
}

#[async_trait::async_trait]
impl WeatherProvider for InMemoryWeatherProvider {
    async fn get_weather(&self, date: NaiveDate, city: &str) -> AppResult<Option<WeatherSnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.get(&(city_key(city), date)).cloned())
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
