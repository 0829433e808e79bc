//! Operator console for a remote inventory service.
//!
//! Serves one page at `/stockmanagement` for looking up a product's stock,
//! increasing or decreasing its quantity and browsing the low-stock report.
//! All inventory logic lives in the backend reached through [`service::StockService`].

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

use crate::view::StockView;

/// Path the single view is mounted at.
pub const VIEW_PATH: &str = "/stockmanagement";

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<StockView>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── View ────────────────────────────────────────────────────────────
        .route("/", get(handlers::stock::index))
        .route(VIEW_PATH, get(handlers::stock::show))
        .route("/stockmanagement/state", get(handlers::stock::view_state))

        // ── Actions ─────────────────────────────────────────────────────────
        .route("/stockmanagement/search", post(handlers::stock::search))
        .route("/stockmanagement/increase", post(handlers::stock::increase))
        .route("/stockmanagement/decrease", post(handlers::stock::decrease))
        .route("/stockmanagement/select/:id", post(handlers::stock::select))
        .route(
            "/stockmanagement/low-stock/refresh",
            post(handlers::stock::refresh_low_stock),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
