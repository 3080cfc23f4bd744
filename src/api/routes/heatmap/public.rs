//! Public types for the heatmap API

use serde::Deserialize;

pub use crate::heatmap::Mode;
pub use crate::heatmap::grid::{GridCell, HeatmapGrid, WeekRow};

/// Query parameters for the static image endpoint
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub gitlab: String,
    #[serde(default)]
    pub mode: Mode,
    /// Explicit background color override
    pub bg: Option<String>,
}

/// Query parameters for the interactive/embed grid endpoint
#[derive(Debug, Deserialize)]
pub struct GridQuery {
    #[serde(default)]
    pub embed: bool,
    #[serde(default)]
    pub theme: Mode,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub gitlab: String,
}
