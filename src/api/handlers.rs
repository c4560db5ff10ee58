use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{
    BuildOutfitRequest, BuildOutfitResponse, ClothingItem, ItemId, ItemPatch, NewClothingItem,
    SeasonMailResult, TemperaturePeriod, User, UserId, WeatherReport, WeatherSnapshot,
};

use super::AppState;

// Request types

/// Weather for one city and day; the city and date come from the path
#[derive(Debug, Deserialize)]
pub struct WeatherInput {
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

impl WeatherInput {
    fn into_snapshot(self, city: String, date: NaiveDate) -> WeatherSnapshot {
        WeatherSnapshot {
            location: city,
            date,
            temperatures: self.temperatures,
            is_rain: self.is_rain,
            is_snow: self.is_snow,
            is_sleet: self.is_sleet,
            is_storm: self.is_storm,
            is_windy: self.is_windy,
            is_uv_high: self.is_uv_high,
            is_humid: self.is_humid,
            is_sunny: self.is_sunny,
            is_fog: self.is_fog,
            is_cloudy: self.is_cloudy,
        }
    }
}

/// Notification window, e.g. `?from=08:58:00&to=09:00:00`
#[derive(Debug, Deserialize)]
pub struct NotificationWindow {
    pub from: NaiveTime,
    pub to: NaiveTime,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Create or replace a user
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.wardrobe.register_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<User>> {
    Ok(Json(state.wardrobe.get_user(user_id).await?))
}

/// Delete a user and their wardrobe
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<StatusCode> {
    state.wardrobe.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_wardrobe(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    Ok(Json(state.wardrobe.list_items(user_id).await?))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(new_item): Json<NewClothingItem>,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let item = state.wardrobe.add_item(user_id, new_item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(UserId, ItemId)>,
    Json(patch): Json<ItemPatch>,
) -> AppResult<Json<ClothingItem>> {
    Ok(Json(state.wardrobe.update_item(user_id, item_id, patch).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((user_id, item_id)): Path<(UserId, ItemId)>,
) -> AppResult<StatusCode> {
    state.wardrobe.delete_item(user_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Store the weather for a city and day
pub async fn put_weather(
    State(state): State<AppState>,
    Path((city, date)): Path<(String, NaiveDate)>,
    Json(input): Json<WeatherInput>,
) -> StatusCode {
    state.weather_store.set(input.into_snapshot(city, date)).await;
    StatusCode::NO_CONTENT
}

/// Weather summary, accessory advice and season notice
pub async fn weather_summary(
    State(state): State<AppState>,
    Path((city, date)): Path<(String, NaiveDate)>,
) -> AppResult<Json<WeatherReport>> {
    Ok(Json(state.outfits.weather_report(&city, date).await?))
}

/// Compose outfits for a user
pub async fn build_outfits(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(request): Json<BuildOutfitRequest>,
) -> AppResult<Json<BuildOutfitResponse>> {
    Ok(Json(state.outfits.execute(user_id, request).await?))
}

/// Run the season mailing for a day and mark the announced users
pub async fn season_mailing(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<SeasonMailResult>>> {
    Ok(Json(state.mailing.execute(date).await?))
}

/// Users whose daily notification is due in the window
pub async fn daily_recipients(
    State(state): State<AppState>,
    Query(window): Query<NotificationWindow>,
) -> AppResult<Json<Vec<UserId>>> {
    Ok(Json(state.mailing.daily_recipients(window.from, window.to).await?))
}
