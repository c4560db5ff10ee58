/// Weather data provider abstraction
///
/// Forecast sources plug in behind [`WeatherProvider`]. The engine never calls
/// a provider itself; the use-cases fetch one snapshot per request and hand it
/// over.
use chrono::NaiveDate;

use crate::{error::AppResult, models::WeatherSnapshot};

pub mod memory;

pub use memory::InMemoryWeatherProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Weather for `city` on `date`
    ///
    /// `Ok(None)` means the provider has no data for that day; transport
    /// failures are errors.
    async fn get_weather(&self, date: NaiveDate, city: &str) -> AppResult<Option<WeatherSnapshot>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
