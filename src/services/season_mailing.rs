use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, NaiveTime};

use crate::{
    db::UserRepository,
    error::AppResult,
    models::{SeasonMailResult, User, UserId},
};

use super::{providers::WeatherProvider, season_change::detect_season_change};

/// Decides who gets a notification and marks season announcements as sent
pub struct SeasonMailing {
    users: Arc<dyn UserRepository>,
    weather: Arc<dyn WeatherProvider>,
}

impl SeasonMailing {
    pub fn new(users: Arc<dyn UserRepository>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { users, weather }
    }

    /// Season announcements due on `date`, ordered by user id.
    ///
    /// Each user's own city decides the season. A user is told about a
    /// season once; users without weather for the day are skipped.
    pub async fn execute(&self, date: NaiveDate) -> AppResult<Vec<SeasonMailResult>> {
        let start = Instant::now();
        let users = self.users.users_with_seasonal_notifications().await?;
        let subscribers = users.len();

        let mut results = Vec::new();
        for user in users {
            if let Some(result) = self.announce(user, date).await? {
                results.push(result);
            }
        }

        tracing::info!(
            %date,
            subscribers,
            announced = results.len(),
            processing_time_ms = start.elapsed().as_millis(),
            "Season mailing done"
        );
        Ok(results)
    }

    /// Users whose daily notification is due in `start..=end`
    pub async fn daily_recipients(&self, start: NaiveTime, end: NaiveTime) -> AppResult<Vec<UserId>> {
        let users = self.users.users_to_notify_between(start, end).await?;
        tracing::debug!(%start, %end, due = users.len(), "Daily notifications due");
        Ok(users.into_iter().map(|user| user.user_id).collect())
    }

    async fn announce(&self, mut user: User, date: NaiveDate) -> AppResult<Option<SeasonMailResult>> {
        let weather = match self.weather.get_weather(date, &user.location).await {
            Ok(Some(weather)) => weather,
            Ok(None) => {
                tracing::debug!(user_id = user.user_id, city = %user.location, "No weather, skipping");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(
                    user_id = user.user_id,
                    provider = self.weather.name(),
                    error = %e,
                    "Weather lookup failed, skipping"
                );
                return Ok(None);
            }
        };

        let Some(season) = detect_season_change(&weather) else {
            return Ok(None);
        };
        if user.last_season_notified == Some(season) {
            return Ok(None);
        }

        user.last_season_notified = Some(season);
        let user_id = user.user_id;
        self.users.upsert_user(user).await?;

        Ok(Some(SeasonMailResult { user_id, season }))
    }
}
