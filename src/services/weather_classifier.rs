use crate::models::{ColdnessLevel, User, WeatherSnapshot, WeatherSummary};

/// Maps a day's weather to a coldness level from its mean temperature.
///
/// Bands: mean ≤ −5 very cold, ≤ 10 cold, ≤ 20 mild, above that hot.
pub fn classify_weather(weather: &WeatherSnapshot) -> ColdnessLevel {
    classify_mean_temperature(weather.temperatures.mean())
}

pub fn classify_mean_temperature(mean: f64) -> ColdnessLevel {
    if mean <= -5.0 {
        ColdnessLevel::VeryCold
    } else if mean <= 10.0 {
        ColdnessLevel::Cold
    } else if mean <= 20.0 {
        ColdnessLevel::Mild
    } else {
        ColdnessLevel::Hot
    }
}

/// Coldness as felt by `user`
pub fn effective_coldness(level: ColdnessLevel, user: &User) -> ColdnessLevel {
    level.shifted(user.cold_sensitivity.coldness_shift())
}

pub fn summarize(weather: &WeatherSnapshot) -> WeatherSummary {
    let temps = weather.temperatures;
    WeatherSummary {
        city: weather.location.clone(),
        date: weather.date,
        temp_morning: temps.morning.round() as i32,
        temp_day: temps.day.round() as i32,
        temp_evening: temps.evening.round() as i32,
        is_rain: weather.is_rain,
        is_snow: weather.is_snow,
        is_windy: weather.is_windy,
        coldness_level: classify_weather(weather),
    }
}
