//! Interactive renderer: turns a day-count table into a serializable
//! tree of week rows for the client and embed views. Day numbers are
//! not included here; the hover label carries the date instead.

use chrono::Duration;
use serde::Serialize;

use super::aggregate::DayCountTable;
use super::color::{Mode, color};
use super::layout::Cell;

#[derive(Debug, Serialize)]
pub struct HeatmapGrid {
    /// Human-readable month label, e.g. "June 2025".
    pub label: String,
    /// Total events across the month.
    pub total: u32,
    pub weeks: Vec<WeekRow>,
}

#[derive(Debug, Serialize)]
pub struct WeekRow {
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    /// Fixed-size transparent placeholder before day 1 or after the
    /// last day.
    Empty,
    Day {
        date: String,
        count: u32,
        color: String,
        label: String,
    },
}

fn hover_label(date: &str, count: u32) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("Date: {date} — {count} event{suffix}")
}

pub fn render(table: &DayCountTable, mode: Mode) -> HeatmapGrid {
    let grid = table.grid();
    let first_day = table.first_day();

    let weeks = (0..grid.weeks)
        .map(|week| {
            let cells = (0..7)
                .map(|weekday| match grid.cell(week * 7 + weekday) {
                    Cell::Empty { .. } => GridCell::Empty,
                    Cell::Day { day, .. } => {
                        let date = first_day + Duration::days(i64::from(day) - 1);
                        let count = table.get(date);
                        let date = date.to_string();
                        let label = hover_label(&date, count);
                        GridCell::Day {
                            date,
                            count,
                            color: color(count, mode).to_string(),
                            label,
                        }
                    }
                })
                .collect();
            WeekRow { cells }
        })
        .collect();

    HeatmapGrid {
        label: first_day.format("%B %Y").to_string(),
        total: table.total(),
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ActivityItem, EventKind};

    fn june_table() -> DayCountTable {
        let mut table = DayCountTable::new(2025, 6).unwrap();
        let timestamps = [
            "2025-06-05T08:00:00Z",
            "2025-06-05T10:00:00Z",
            "2025-06-05T12:00:00Z",
            "2025-06-05T14:00:00Z",
            "2025-06-20T09:00:00Z",
        ];
        table.fold(timestamps.map(|t| ActivityItem {
            kind: EventKind::Commit,
            occurred_at: t.parse().unwrap(),
        }));
        table
    }

    #[test]
    fn test_grid_shape_for_june_2025() {
        let grid = render(&june_table(), Mode::Light);
        assert_eq!(grid.label, "June 2025");
        assert_eq!(grid.total, 5);
        assert_eq!(grid.weeks.len(), 5);
        for week in &grid.weeks {
            assert_eq!(week.cells.len(), 7);
        }
        // June 2025 starts on a Sunday: the first cell is day 1 and
        // the last five cells of the final week are placeholders
        assert!(matches!(grid.weeks[0].cells[0], GridCell::Day { .. }));
        for cell in &grid.weeks[4].cells[2..] {
            assert_eq!(*cell, GridCell::Empty);
        }
    }

    #[test]
    fn test_day_cell_content() {
        let grid = render(&june_table(), Mode::Light);
        // June 5 is the fifth cell of the first week
        let GridCell::Day { date, count, color, label } = &grid.weeks[0].cells[4] else {
            panic!("expected a day cell");
        };
        assert_eq!(date, "2025-06-05");
        assert_eq!(*count, 4);
        assert_eq!(color, "#AB47BC");
        assert_eq!(label, "Date: 2025-06-05 — 4 events");
    }

    #[test]
    fn test_label_pluralization() {
        assert_eq!(hover_label("2025-06-20", 1), "Date: 2025-06-20 — 1 event");
        assert_eq!(hover_label("2025-06-20", 0), "Date: 2025-06-20 — 0 events");
        assert_eq!(hover_label("2025-06-20", 2), "Date: 2025-06-20 — 2 events");
    }

    #[test]
    fn test_leading_placeholders_for_offset_month() {
        // March 2025 starts on a Saturday
        let table = DayCountTable::new(2025, 3).unwrap();
        let grid = render(&table, Mode::Dark);
        for cell in &grid.weeks[0].cells[..6] {
            assert_eq!(*cell, GridCell::Empty);
        }
        assert!(matches!(grid.weeks[0].cells[6], GridCell::Day { .. }));
    }

    #[test]
    fn test_serializes_with_kind_tags() {
        let grid = render(&june_table(), Mode::Light);
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["weeks"][0]["cells"][0]["kind"], "day");
        assert_eq!(json["weeks"][4]["cells"][6]["kind"], "empty");
    }
}
