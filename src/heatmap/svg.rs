//! Static image renderer. Produces a self-contained SVG document with
//! a header line, a Less..More legend, and the calendar grid. Every
//! dimension is computed from the cell geometry and the grid, so the
//! output is byte-for-byte deterministic for a given table.

use super::aggregate::DayCountTable;
use super::color::{LEGEND_COUNTS, Mode, color};
use super::layout::{CELL_SIZE, CELL_SPACING, Cell, LEGEND_SWATCH_SIZE};

const PADDING: u32 = 10;
const HEADER_HEIGHT: u32 = 34;
const LEGEND_HEIGHT: u32 = 30;
const LEGEND_GAP: u32 = 4;
/// Keeps the header and legend readable for narrow (4-week) months.
const MIN_CONTENT_WIDTH: u32 = 200;

#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    pub mode: Mode,
    /// Explicit background override; defaults per mode.
    pub background: Option<String>,
}

fn text_color(mode: Mode) -> &'static str {
    match mode {
        Mode::Light => "#1F2328",
        Mode::Dark => "#E6EDF3",
    }
}

fn default_background(mode: Mode) -> &'static str {
    match mode {
        Mode::Light => "#FFFFFF",
        Mode::Dark => "#121212",
    }
}

/// Day numbers sit on the bucket color, so flip to white once the
/// cell is saturated enough.
fn day_number_color(count: u32, mode: Mode) -> &'static str {
    if mode == Mode::Light && count == 0 {
        "#1F2328"
    } else if mode == Mode::Dark && count == 0 {
        "#E6EDF3"
    } else {
        "#FFFFFF"
    }
}

/// Minimal escaping for user-supplied attribute values.
fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

pub fn render(table: &DayCountTable, options: &SvgOptions) -> String {
    let mode = options.mode;
    let grid = table.grid();
    let step = CELL_SIZE + CELL_SPACING;

    let grid_width = grid.weeks * step;
    let grid_height = 7 * step;
    let content_width = grid_width.max(MIN_CONTENT_WIDTH);
    let width = content_width + 2 * PADDING;
    let height = 2 * PADDING + HEADER_HEIGHT + LEGEND_HEIGHT + grid_height;

    let background = options
        .background
        .as_deref()
        .map(xml_escape)
        .unwrap_or_else(|| default_background(mode).to_string());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" font-family="sans-serif">"#
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{background}"/>"#
    ));

    // Header: month label on the left, total on the right
    let label = table.first_day().format("%B %Y");
    let total = table.total();
    let suffix = if total == 1 { "" } else { "s" };
    let header_baseline = PADDING + 20;
    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{header_baseline}" font-size="16" font-weight="bold" fill="{}">{label}</text>"#,
        text_color(mode)
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{header_baseline}" font-size="12" text-anchor="end" fill="{}">{total} event{suffix}</text>"#,
        width - PADDING,
        text_color(mode)
    ));

    // Legend: Less, one swatch per bucket, More
    let legend_y = PADDING + HEADER_HEIGHT;
    let legend_mid = legend_y + LEGEND_SWATCH_SIZE / 2;
    let swatch_step = LEGEND_SWATCH_SIZE + LEGEND_GAP;
    let swatches_x = PADDING + 34;
    svg.push_str(&format!(
        r#"<text x="{PADDING}" y="{legend_mid}" font-size="11" dominant-baseline="central" fill="{}">Less</text>"#,
        text_color(mode)
    ));
    for (i, count) in LEGEND_COUNTS.into_iter().enumerate() {
        let x = swatches_x + i as u32 * swatch_step;
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{legend_y}" width="{LEGEND_SWATCH_SIZE}" height="{LEGEND_SWATCH_SIZE}" fill="{}"/>"#,
            color(count, mode)
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{legend_mid}" font-size="11" dominant-baseline="central" fill="{}">More</text>"#,
        swatches_x + LEGEND_COUNTS.len() as u32 * swatch_step + LEGEND_GAP,
        text_color(mode)
    ));

    // Calendar grid, one column per week
    let grid_y = PADDING + HEADER_HEIGHT + LEGEND_HEIGHT;
    for cell in grid.cells() {
        let Cell::Day { day, column, row } = cell else {
            continue;
        };
        let x = PADDING + column * step;
        let y = grid_y + row * step;
        let date = table.first_day() + chrono::Duration::days(i64::from(day) - 1);
        let count = table.get(date);
        let day_suffix = if count == 1 { "" } else { "s" };
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{}"><title>{date}: {count} event{day_suffix}</title></rect>"#,
            color(count, mode)
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="10" text-anchor="middle" dominant-baseline="central" fill="{}">{day}</text>"#,
            x + CELL_SIZE / 2,
            y + CELL_SIZE / 2,
            day_number_color(count, mode)
        ));
    }

    svg.push_str("</svg>");
    svg
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
            "2025-06-20T11:00:00Z",
        ];
        table.fold(timestamps.map(|t| ActivityItem {
            kind: EventKind::Commit,
            occurred_at: t.parse().unwrap(),
        }));
        table
    }

    #[test]
    fn test_dimensions_are_analytic() {
        let svg = render(&june_table(), &SvgOptions::default());
        // June 2025 is 5 weeks: grid 160px wide, below the 200px
        // minimum, so the image is 220 x 308
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="220" height="308""#));

        // March 2025 spans 6 weeks, pushing the grid just under the
        // minimum content width
        let march = DayCountTable::new(2025, 3).unwrap();
        let svg = render(&march, &SvgOptions::default());
        assert!(svg.contains(r#"width="220""#));
    }

    #[test]
    fn test_header_and_legend() {
        let svg = render(&june_table(), &SvgOptions::default());
        assert!(svg.contains(">June 2025</text>"));
        assert!(svg.contains(">6 events</text>"));
        assert!(svg.contains(">Less</text>"));
        assert!(svg.contains(">More</text>"));
        // One swatch per legend bucket in the light palette
        for count in LEGEND_COUNTS {
            assert!(svg.contains(&format!(r#"height="20" fill="{}""#, color(count, Mode::Light))));
        }
    }

    #[test]
    fn test_day_cells_and_titles() {
        let svg = render(&june_table(), &SvgOptions::default());
        assert!(svg.contains("<title>2025-06-05: 4 events</title>"));
        assert!(svg.contains("<title>2025-06-01: 0 events</title>"));
        // Day numbers are rendered for the whole month
        assert!(svg.contains(">1</text>"));
        assert!(svg.contains(">30</text>"));
        // 30 day rects plus 5 legend swatches plus the background
        assert_eq!(svg.matches("<rect ").count(), 36);
    }

    #[test]
    fn test_single_event_title_is_singular() {
        let mut table = DayCountTable::new(2025, 6).unwrap();
        table.fold([ActivityItem {
            kind: EventKind::Commit,
            occurred_at: "2025-06-05T08:00:00Z".parse().unwrap(),
        }]);
        let svg = render(&table, &SvgOptions::default());
        assert!(svg.contains("<title>2025-06-05: 1 event</title>"));
        assert!(svg.contains(">1 event</text>"));
    }

    #[test]
    fn test_background_defaults_per_mode_and_escapes_overrides() {
        let light = render(&june_table(), &SvgOptions::default());
        assert!(light.contains(r##"fill="#FFFFFF"/>"##));

        let dark = render(
            &june_table(),
            &SvgOptions {
                mode: Mode::Dark,
                background: None,
            },
        );
        assert!(dark.contains(r##"fill="#121212"/>"##));

        let hostile = render(
            &june_table(),
            &SvgOptions {
                mode: Mode::Light,
                background: Some(r#""><script>"#.to_string()),
            },
        );
        assert!(!hostile.contains("<script>"));
        assert!(hostile.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let table = june_table();
        let options = SvgOptions::default();
        assert_eq!(render(&table, &options), render(&table, &options));
    }
}
