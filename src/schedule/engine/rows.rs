use crate::schedule::Fragment;

const ROW_TOLERANCE: f64 = 5.0;

pub(super) struct Row {
    pub(super) fragments: Vec<Fragment>,
}

impl Row {
    // The first-inserted fragment's y stands for the whole row.
    fn representative_y(&self) -> f64 {
        self.fragments[0].y
    }
}

// First-fit, top of page first. A borderline fragment joins the first row
// within tolerance, not the closest one; downstream assignment depends on
// this exact tie-breaking.
pub(super) fn cluster_rows(fragments: &[Fragment]) -> Vec<Row> {
    let mut sorted = fragments.to_vec();
    sorted.sort_by(|a, b| b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal));

    let mut rows: Vec<Row> = Vec::new();
    for fragment in sorted {
        match rows
            .iter_mut()
            .find(|row| (row.representative_y() - fragment.y).abs() <= ROW_TOLERANCE)
        {
            Some(row) => row.fragments.push(fragment),
            None => rows.push(Row {
                fragments: vec![fragment],
            }),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, y: f64) -> Fragment {
        Fragment {
            text: text.to_string(),
            x: 0.0,
            y,
        }
    }

    #[test]
    fn adjacent_fragments_share_a_row() {
        let rows = cluster_rows(&[fragment("a", 100.0), fragment("b", 96.0)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fragments.len(), 2);
    }

    #[test]
    fn rows_are_built_top_down() {
        let rows = cluster_rows(&[fragment("low", 10.0), fragment("high", 200.0)]);
        assert_eq!(rows[0].fragments[0].text, "high");
        assert_eq!(rows[1].fragments[0].text, "low");
    }

    #[test]
    fn first_fit_prefers_the_earliest_open_row() {
        // 6.0 is within tolerance of both 10.0 and 2.0; it must join the row
        // opened first (10.0), leaving 2.0 alone.
        let rows = cluster_rows(&[fragment("a", 2.0), fragment("b", 10.0), fragment("c", 6.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fragments.len(), 2);
        assert_eq!(rows[0].fragments[1].text, "c");
        assert_eq!(rows[1].fragments[0].text, "a");
    }
}
