//! Count to color mapping. Five contiguous buckets cover every
//! non-negative count; the palettes are fixed per display mode so the
//! interactive view and the static image always agree.

use serde::{Deserialize, Serialize};

/// Representative count for each bucket, rendered as the Less..More
/// legend in both output targets.
pub const LEGEND_COUNTS: [u32; 5] = [0, 1, 3, 6, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

/// Map an event count to its bucket color.
pub fn color(count: u32, mode: Mode) -> &'static str {
    match mode {
        Mode::Light => match count {
            0 => "#F3E5F5",
            1..=2 => "#CE93D8",
            3..=5 => "#AB47BC",
            6..=9 => "#8E24AA",
            _ => "#6A1B9A",
        },
        Mode::Dark => match count {
            0 => "#3A3A3A",
            1..=2 => "#6A1B9A",
            3..=5 => "#7B1FA2",
            6..=9 => "#8E24AA",
            _ => "#9C27B0",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        // One representative count per bucket, probing each boundary
        assert_eq!(color(0, Mode::Light), "#F3E5F5");
        assert_eq!(color(1, Mode::Light), "#CE93D8");
        assert_eq!(color(2, Mode::Light), "#CE93D8");
        assert_eq!(color(3, Mode::Light), "#AB47BC");
        assert_eq!(color(5, Mode::Light), "#AB47BC");
        assert_eq!(color(6, Mode::Light), "#8E24AA");
        assert_eq!(color(9, Mode::Light), "#8E24AA");
        assert_eq!(color(10, Mode::Light), "#6A1B9A");
        assert_eq!(color(u32::MAX, Mode::Light), "#6A1B9A");
    }

    #[test]
    fn test_light_and_dark_differ_in_every_bucket() {
        for count in LEGEND_COUNTS {
            assert_ne!(color(count, Mode::Light), color(count, Mode::Dark));
        }
    }

    #[test]
    fn test_mode_deserializes_from_query_values() {
        assert_eq!(serde_json::from_str::<Mode>("\"light\"").unwrap(), Mode::Light);
        assert_eq!(serde_json::from_str::<Mode>("\"dark\"").unwrap(), Mode::Dark);
    }
}
