use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Temperature readings for one day, in °C
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TemperaturePeriod {
    pub morning: f64,
    pub day: f64,
    pub evening: f64,
}

impl TemperaturePeriod {
    pub fn new(morning: f64, day: f64, evening: f64) -> Self {
        Self {
            morning,
            day,
            evening,
        }
    }

    pub fn mean(&self) -> f64 {
        (self.morning + self.day + self.evening) / 3.0
    }

    /// True when any reading is below `threshold`
    pub fn any_below(&self, threshold: f64) -> bool {
        self.morning < threshold || self.day < threshold || self.evening < threshold
    }
}

/// Daily weather for a city, as supplied by the weather collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSnapshot {
    pub location: String,
    pub date: NaiveDate,
    pub temperatures: TemperaturePeriod,
    #[serde(default)]
    pub is_rain: bool,
    #[serde(default)]
    pub is_snow: bool,
    #[serde(default)]
    pub is_sleet: bool,
    #[serde(default)]
    pub is_storm: bool,
    #[serde(default)]
    pub is_windy: bool,
    #[serde(default)]
    pub is_uv_high: bool,
    #[serde(default)]
    pub is_humid: bool,
    #[serde(default)]
    pub is_sunny: bool,
    #[serde(default)]
    pub is_fog: bool,
    #[serde(default)]
    pub is_cloudy: bool,
}

impl WeatherSnapshot {
    /// Snapshot with the given temperatures and every condition flag off
    pub fn calm(location: impl Into<String>, date: NaiveDate, temperatures: TemperaturePeriod) -> Self {
        Self {
            location: location.into(),
            date,
            temperatures,
            is_rain: false,
            is_snow: false,
            is_sleet: false,
            is_storm: false,
            is_windy: false,
            is_uv_high: false,
            is_humid: false,
            is_sunny: false,
            is_fog: false,
            is_cloudy: false,
        }
    }

    /// Any form of precipitation, storms included
    pub fn has_precipitation(&self) -> bool {
        self.is_rain || self.is_snow || self.is_sleet || self.is_storm
    }
}

/// Ordinal coldness of a day, 1 (hot) to 4 (very cold)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "u8", try_from = "u8")]
pub enum ColdnessLevel {
    Hot = 1,
    Mild = 2,
    Cold = 3,
    VeryCold = 4,
}

impl ColdnessLevel {
    pub const ALL: [ColdnessLevel; 4] = [
        ColdnessLevel::Hot,
        ColdnessLevel::Mild,
        ColdnessLevel::Cold,
        ColdnessLevel::VeryCold,
    ];

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Moves the level by `delta` steps, saturating at both ends
    pub fn shifted(self, delta: i8) -> Self {
        let level = (i16::from(self.as_u8()) + i16::from(delta)).clamp(1, 4) as u8;
        Self::ALL[usize::from(level - 1)]
    }
}

impl From<ColdnessLevel> for u8 {
    fn from(level: ColdnessLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for ColdnessLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=4 => Ok(Self::ALL[usize::from(value - 1)]),
            other => Err(format!("coldness level must be 1-4, got {}", other)),
        }
    }
}
