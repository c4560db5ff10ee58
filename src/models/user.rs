use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::{Season, Style, UserId};

/// How strongly a user feels the cold
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColdSensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl ColdSensitivity {
    /// Shift applied to the weather coldness level
    pub const fn coldness_shift(self) -> i8 {
        match self {
            ColdSensitivity::Low => -1,
            ColdSensitivity::Medium => 0,
            ColdSensitivity::High => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    /// Default city for weather lookups
    pub location: String,
    #[serde(default)]
    pub favourite_style: Option<Style>,
    #[serde(default)]
    pub cold_sensitivity: ColdSensitivity,
    /// Daily outfit notification at `notification_time`
    #[serde(default)]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub season_notifications_enabled: bool,
    #[serde(default)]
    pub notification_time: Option<NaiveTime>,
    /// Season the user was last told about; each season is announced once
    #[serde(default)]
    pub last_season_notified: Option<Season>,
}

impl User {
    pub fn new(user_id: UserId, username: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            location: location.into(),
            favourite_style: None,
            cold_sensitivity: ColdSensitivity::default(),
            notifications_enabled: false,
            season_notifications_enabled: false,
            notification_time: None,
            last_season_notified: None,
        }
    }

    /// True when the daily notification time falls in `start..=end`.
    ///
    /// A window with `start > end` wraps past midnight.
    pub fn notifies_between(&self, start: NaiveTime, end: NaiveTime) -> bool {
        let Some(at) = self.notification_time.filter(|_| self.notifications_enabled) else {
            return false;
        };
        if start <= end {
            start <= at && at <= end
        } else {
            at >= start || at <= end
        }
    }
}
