//! Accessory advice for the day's weather.

use crate::models::{Season, WeatherSnapshot};

type Rule = fn(&WeatherSnapshot, &mut TakeWith);

/// Rules run in this order; the first rule to suggest an item decides its position
const RULES: &[Rule] = &[
    sunny_or_hot,
    precipitation,
    wind,
    cold,
    humidity,
    fog,
    cloudy,
    evening_cooling,
];

/// Ordered accessory list without duplicates
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TakeWith {
    items: Vec<String>,
}

impl TakeWith {
    pub fn add(&mut self, item: &str) {
        if !self.items.iter().any(|existing| existing == item) {
            self.items.push(item.to_string());
        }
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Things worth taking along given `weather`
pub fn take_with(weather: &WeatherSnapshot) -> Vec<String> {
    let mut advice = TakeWith::default();
    for rule in RULES {
        rule(weather, &mut advice);
    }
    advice.into_items()
}

fn sunny_or_hot(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_sunny || weather.temperatures.day >= 25.0 {
        advice.add("hat");
        advice.add("sunglasses");
        if weather.is_uv_high {
            advice.add("sunscreen");
        }
    }
}

fn precipitation(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_rain {
        advice.add("umbrella");
        advice.add("raincoat");
    }
    if weather.is_storm {
        advice.add("raincoat");
    }
}

fn wind(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_windy {
        advice.add("windbreaker");
    }
}

fn cold(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.temperatures.any_below(10.0) {
        advice.add("beanie");
        advice.add("scarf");
        advice.add("gloves");
    }
}

fn humidity(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_humid && weather.temperatures.day < 20.0 {
        advice.add("light waterproof jacket");
    }
}

fn fog(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_fog {
        advice.add("reflective accessories");
    }
}

fn cloudy(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    if weather.is_cloudy && !weather.is_rain && !weather.is_snow && !weather.is_sleet {
        advice.add("light jacket");
    }
}

/// Something to throw on when the evening is much cooler than the day
fn evening_cooling(weather: &WeatherSnapshot, advice: &mut TakeWith) {
    let drop = weather.temperatures.day - weather.temperatures.evening;
    match Season::of(weather.date) {
        Season::Spring if drop >= 8.0 => {
            advice.add("light jacket");
            advice.add("scarf");
        }
        Season::Summer if drop >= 10.0 => advice.add("light sweater"),
        Season::Autumn if drop >= 7.0 => {
            advice.add("warm sweater");
            advice.add("beanie");
            advice.add("gloves");
        }
        _ => {}
    }
}
