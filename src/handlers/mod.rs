pub mod common;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Routes mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/item", post(items::get_item))
        .route("/item/add", post(items::add_item))
        .route("/item/delete", post(items::delete_item))
        .route("/warehouse/stats", get(stats::warehouse_stats))
}
