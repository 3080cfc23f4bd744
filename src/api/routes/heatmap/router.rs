//! Router for the heatmap API

use std::sync::{Arc, RwLock};

use axum::response::{IntoResponse, Json, Response};
use axum::{Router, extract::State};
use axum_extra::extract::Query;
use chrono::{Datelike, Utc};
use http::{HeaderValue, header};

use super::public;
use crate::api::state::AppState;
use crate::heatmap::svg::SvgOptions;
use crate::heatmap::{aggregate, grid, svg};
use crate::sources::REPORTING_TZ;

type SharedState = Arc<RwLock<AppState>>;

/// The month currently in progress in the reporting timezone. Both
/// endpoints always target this month.
fn current_month() -> (i32, u32) {
    let now = Utc::now().with_timezone(&REPORTING_TZ);
    (now.year(), now.month())
}

/// Render the current month as a static SVG image
async fn heatmap_image(
    State(state): State<SharedState>,
    Query(params): Query<public::ImageQuery>,
) -> Result<Response, crate::api::public::ApiError> {
    let config = state
        .read()
        .expect("Unable to read shared state")
        .config
        .clone();

    let (year, month) = current_month();
    let table = aggregate(&config, &params.github, &params.gitlab, year, month).await?;
    let options = SvgOptions {
        mode: params.mode,
        background: params.bg,
    };
    let image = svg::render(&table, &options);

    // The image reflects live data so it must never be cached
    let mut response = image.into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("image/svg+xml"),
    );
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    Ok(response)
}

/// Aggregate the current month and return the interactive grid tree
async fn heatmap_grid(
    State(state): State<SharedState>,
    Query(params): Query<public::GridQuery>,
) -> Result<Json<public::HeatmapGrid>, crate::api::public::ApiError> {
    let config = state
        .read()
        .expect("Unable to read shared state")
        .config
        .clone();

    if params.embed {
        tracing::debug!("Serving embed view for {}/{}", params.github, params.gitlab);
    }

    let (year, month) = current_month();
    let table = aggregate(&config, &params.github, &params.gitlab, year, month).await?;
    Ok(Json(grid::render(&table, params.theme)))
}

/// Create the heatmap router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::get(heatmap_image))
        .route("/grid", axum::routing::get(heatmap_grid))
}
