//! Warehouse Inventory API Library
//!
//! This crate provides the core functionality for the warehouse inventory
//! dashboard: item lookup, inventory mutations, and utilization statistics
//! backed by a document store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod capacity;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod store;
pub mod utilization;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::services::{inventory::InventoryService, stats::StatsService};
use crate::store::InventoryStore;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub store: Arc<dyn InventoryStore>,
    pub inventory_service: InventoryService,
    pub stats_service: StatsService,
}

impl AppState {
    /// Composes the service layer on top of a store implementation.
    pub fn new(config: config::AppConfig, store: Arc<dyn InventoryStore>) -> Self {
        let inventory_service = InventoryService::new(store.clone());
        let stats_service = StatsService::new(store.clone());
        Self {
            config,
            store,
            inventory_service,
            stats_service,
        }
    }
}

/// Build the application router: dashboard + JSON API + health + Swagger UI.
///
/// Cross-cutting layers that depend on configuration (CORS, compression,
/// static assets) are applied by the binary on top of this router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard::dashboard))
        .nest("/api", handlers::api_routes())
        .nest("/health", handlers::health::routes())
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
