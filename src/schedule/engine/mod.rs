mod anchors;
mod assign;
mod filter;
mod location;
mod merge;
mod rows;

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::schedule::{Fragment, PageSource, Schedule, ScheduleEntry};

use anchors::{detect_day_columns, detect_hour_rows};
use rows::{cluster_rows, Row};

pub(crate) use filter::is_hour_label;

/// Class-header token: one digit 1-5 followed by 2-4 uppercase letters.
pub(crate) static CLASS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([1-5][A-Z]{2,4})\b").expect("valid class name regex"));

pub fn extract_schedule(source: &dyn PageSource) -> Result<Schedule> {
    let mut schedule = Schedule::new();
    for page in 0..source.page_count() {
        let fragments = source.fragments(page)?;
        scan_page(&fragments, &mut schedule);
    }

    for days in schedule.values_mut() {
        for periods in days.values_mut() {
            *periods = merge::merge_double_periods(periods);
        }
    }
    Ok(schedule)
}

fn scan_page(fragments: &[Fragment], schedule: &mut Schedule) {
    let day_columns = detect_day_columns(fragments);
    let hour_rows = detect_hour_rows(fragments);
    let rows = cluster_rows(fragments);
    debug!(
        "page scan: {} fragments, {} rows, {} day columns, {} hour rows",
        fragments.len(),
        rows.len(),
        day_columns.len(),
        hour_rows.len()
    );

    let mut context: Option<String> = None;
    for (index, row) in rows.iter().enumerate() {
        context = class_context(row, context, schedule);
        let Some(class) = context.clone() else {
            continue;
        };

        for fragment in &row.fragments {
            if !filter::is_subject_candidate(&fragment.text) {
                continue;
            }
            let Some(day) = assign::nearest_day(fragment.x, &day_columns) else {
                continue;
            };
            let Some(hour) = assign::nearest_hour(fragment.y, &hour_rows) else {
                continue;
            };
            let room = location::nearest_location(fragment, &rows, index);
            schedule
                .entry(class.clone())
                .or_default()
                .entry(day.to_string())
                .or_default()
                .insert(
                    hour.to_string(),
                    ScheduleEntry {
                        subject: fragment.text.trim().to_string(),
                        room,
                    },
                );
        }
    }
}

// A class-header row switches the context; anything else leaves it untouched.
fn class_context(row: &Row, context: Option<String>, schedule: &mut Schedule) -> Option<String> {
    let header = row
        .fragments
        .iter()
        .map(|fragment| fragment.text.trim())
        .collect::<Vec<_>>()
        .join(" ");
    match CLASS_NAME_RE.find(&header) {
        Some(found) => {
            let class = found.as_str().to_string();
            schedule.entry(class.clone()).or_default();
            Some(class)
        }
        None => context,
    }
}
