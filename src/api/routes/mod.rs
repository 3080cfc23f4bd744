//! API routes module

pub mod heatmap;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Heatmap routes
        .nest("/heatmap", heatmap::router())
}
