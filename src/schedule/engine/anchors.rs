use regex::Regex;
use std::sync::LazyLock;

use crate::schedule::{Fragment, WEEKDAYS};

const ANCHOR_TOLERANCE: f64 = 5.0;

pub(super) static HOUR_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-1]?\d|2[0-3])h00$").expect("valid hour label regex"));

pub(super) struct DayAnchor {
    pub(super) day: &'static str,
    pub(super) x: f64,
}

pub(super) struct HourAnchor {
    pub(super) label: String,
    pub(super) y: f64,
}

// Weekday headers repeat across class blocks; the column anchor is the mean
// x of every occurrence. Sorted left to right.
pub(super) fn detect_day_columns(fragments: &[Fragment]) -> Vec<DayAnchor> {
    let mut columns = Vec::new();
    for day in WEEKDAYS {
        let positions = fragments
            .iter()
            .filter(|fragment| fragment.text.trim() == day)
            .map(|fragment| fragment.x)
            .collect::<Vec<_>>();
        if positions.is_empty() {
            continue;
        }
        let x = positions.iter().sum::<f64>() / positions.len() as f64;
        columns.push(DayAnchor { day, x });
    }
    columns.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
    columns
}

// First-seen y wins for each hour row; repeated labels within tolerance are
// dropped. Sorted top to bottom (page y grows upward).
pub(super) fn detect_hour_rows(fragments: &[Fragment]) -> Vec<HourAnchor> {
    let mut rows: Vec<HourAnchor> = Vec::new();
    for fragment in fragments {
        let text = fragment.text.trim();
        if !HOUR_LABEL_RE.is_match(text) {
            continue;
        }
        if rows
            .iter()
            .any(|anchor| (anchor.y - fragment.y).abs() <= ANCHOR_TOLERANCE)
        {
            continue;
        }
        rows.push(HourAnchor {
            label: text.to_string(),
            y: fragment.y,
        });
    }
    rows.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, x: f64, y: f64) -> Fragment {
        Fragment {
            text: text.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn day_anchor_is_the_mean_of_all_occurrences() {
        let columns = detect_day_columns(&[
            fragment("lunedì", 10.0, 500.0),
            fragment("lunedì", 20.0, 250.0),
            fragment("Storia", 15.0, 400.0),
        ]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].day, "lunedì");
        assert_eq!(columns[0].x, 15.0);
    }

    #[test]
    fn absent_weekday_produces_no_anchor() {
        let columns = detect_day_columns(&[fragment("martedì", 50.0, 500.0)]);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].day, "martedì");
    }

    #[test]
    fn day_columns_are_sorted_left_to_right() {
        let columns = detect_day_columns(&[
            fragment("martedì", 50.0, 500.0),
            fragment("lunedì", 200.0, 500.0),
        ]);
        assert_eq!(columns[0].day, "martedì");
        assert_eq!(columns[1].day, "lunedì");
    }

    #[test]
    fn first_seen_hour_row_wins_within_tolerance() {
        let rows = detect_hour_rows(&[
            fragment("8h00", 20.0, 400.0),
            fragment("8h00", 300.0, 398.0),
            fragment("9h00", 20.0, 300.0),
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "8h00");
        assert_eq!(rows[0].y, 400.0);
    }

    #[test]
    fn hour_rows_are_sorted_top_to_bottom() {
        let rows = detect_hour_rows(&[
            fragment("9h00", 20.0, 300.0),
            fragment("8h00", 20.0, 400.0),
        ]);
        assert_eq!(rows[0].label, "8h00");
        assert_eq!(rows[1].label, "9h00");
    }

    #[test]
    fn non_hour_labels_are_ignored() {
        assert!(detect_hour_rows(&[
            fragment("24h00", 20.0, 400.0),
            fragment("8h15", 20.0, 300.0),
            fragment("orario", 20.0, 200.0),
        ])
        .is_empty());
    }
}
