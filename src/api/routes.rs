use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:user_id",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        // Wardrobe
        .route(
            "/users/:user_id/wardrobe",
            get(handlers::list_wardrobe).post(handlers::add_item),
        )
        .route(
            "/users/:user_id/wardrobe/:item_id",
            patch(handlers::update_item).delete(handlers::delete_item),
        )
        // Weather
        .route("/weather/:city/:date", put(handlers::put_weather))
        .route("/weather/:city/:date/summary", get(handlers::weather_summary))
        // Outfits
        .route("/users/:user_id/outfits", post(handlers::build_outfits))
        // Notifications
        .route("/notifications/season/:date", post(handlers::season_mailing))
        .route("/notifications/daily", get(handlers::daily_recipients))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
