use regex::Regex;
use std::sync::LazyLock;

use crate::schedule::Fragment;

use super::rows::Row;

const MAX_DX: f64 = 200.0;
const MAX_DY: f64 = 120.0;

// Looser than the filter's variant: no word boundaries, room labels ride
// inside larger fragments.
static LOCATION_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(ITIS|IPSIA|Lab\.)").expect("valid location marker regex"));

// Nearby rows first, under independent x/y bounds; page-wide unbounded
// fallback only when the window holds no marker inside the bounds.
pub(super) fn nearest_location(subject: &Fragment, rows: &[Row], row_index: usize) -> Option<String> {
    let mut best: Option<&Fragment> = None;
    let mut best_dist = f64::INFINITY;

    let first = row_index.saturating_sub(2);
    let last = (row_index + 2).min(rows.len().saturating_sub(1));
    for row in &rows[first..=last] {
        for fragment in &row.fragments {
            if !LOCATION_MARKER_RE.is_match(&fragment.text) {
                continue;
            }
            let dx = (fragment.x - subject.x).abs();
            let dy = (fragment.y - subject.y).abs();
            if dx > MAX_DX || dy > MAX_DY {
                continue;
            }
            let dist = dx.hypot(dy);
            if dist < best_dist {
                best_dist = dist;
                best = Some(fragment);
            }
        }
    }

    if best.is_none() {
        for row in rows {
            for fragment in &row.fragments {
                if !LOCATION_MARKER_RE.is_match(&fragment.text) {
                    continue;
                }
                let dist = (fragment.x - subject.x).hypot(fragment.y - subject.y);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some(fragment);
                }
            }
        }
    }

    best.map(|fragment| fragment.text.trim().to_string())
}
