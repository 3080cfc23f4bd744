//! The heatmap engine: day-count aggregation over the activity
//! sources plus the two renderers that consume the table.

pub mod aggregate;
pub mod color;
pub mod grid;
pub mod layout;
pub mod svg;

pub use aggregate::{DayCountTable, aggregate};
pub use color::{LEGEND_COUNTS, Mode, color};
pub use grid::HeatmapGrid;
pub use layout::{CELL_SIZE, CELL_SPACING, CalendarGrid, Cell};
pub use svg::SvgOptions;
