use axum::{
    Router,
    routing::{get, post},
};
use foodgram_shopping::ShoppingListRenderer;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::{command::Command, query::Query};

mod health;
mod shopping_cart;

#[derive(Clone)]
pub struct AppState {
    pub query: Query,
    pub command: Command,
    pub renderer: ShoppingListRenderer,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route(
            "/api/recipes/download_shopping_cart/",
            get(shopping_cart::download),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(shopping_cart::add).delete(shopping_cart::remove),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
