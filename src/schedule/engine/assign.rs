use super::anchors::{DayAnchor, HourAnchor};

// Strict-less-than scans: on an exact tie the anchor encountered first in
// the sorted list keeps the assignment.

pub(super) fn nearest_day(x: f64, columns: &[DayAnchor]) -> Option<&'static str> {
    let mut best = None;
    let mut best_dx = f64::INFINITY;
    for column in columns {
        let dx = (column.x - x).abs();
        if dx < best_dx {
            best_dx = dx;
            best = Some(column.day);
        }
    }
    best
}

pub(super) fn nearest_hour(y: f64, rows: &[HourAnchor]) -> Option<&str> {
    let mut best = None;
    let mut best_dy = f64::INFINITY;
    for row in rows {
        let dy = (row.y - y).abs();
        if dy < best_dy {
            best_dy = dy;
            best = Some(row.label.as_str());
        }
    }
    best
}
