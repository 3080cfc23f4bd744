//! Calendar grid geometry. Cells are indexed in scan order with one
//! column per week and one row per weekday (Sunday first), matching
//! the reference rendering: `column = index / 7`, `row = index % 7`.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};

/// Day cell edge length in pixels, shared by both renderers.
pub const CELL_SIZE: u32 = 30;
/// Gap between cells in pixels.
pub const CELL_SPACING: u32 = 2;
/// Legend swatch edge length in the static image.
pub const LEGEND_SWATCH_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGrid {
    /// Weekday of the 1st of the month, Sunday = 0.
    pub start_weekday: u32,
    pub days_in_month: u32,
    pub weeks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty { column: u32, row: u32 },
    Day { day: u32, column: u32, row: u32 },
}

impl CalendarGrid {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .with_context(|| format!("invalid year/month: {year}-{month}"))?;
        Ok(Self::from_first_day(first))
    }

    pub(crate) fn from_first_day(first: NaiveDate) -> Self {
        let days_in_month = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .count() as u32;
        let start_weekday = first.weekday().num_days_from_sunday();
        let weeks = (start_weekday + days_in_month).div_ceil(7);

        Self {
            start_weekday,
            days_in_month,
            weeks,
        }
    }

    pub fn cell_count(&self) -> u32 {
        self.weeks * 7
    }

    /// Classify one cell index. Day cells occupy the contiguous index
    /// range starting at `start_weekday`; everything before or after
    /// is an empty placeholder.
    pub fn cell(&self, index: u32) -> Cell {
        let column = index / 7;
        let row = index % 7;
        if index >= self.start_weekday {
            let day = index - self.start_weekday + 1;
            if day <= self.days_in_month {
                return Cell::Day { day, column, row };
            }
        }
        Cell::Empty { column, row }
    }

    /// All cells in scan order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).map(|index| self.cell(index))
    }
}
