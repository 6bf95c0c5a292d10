mod engine;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub use engine::extract_schedule;

pub(crate) const WEEKDAYS: [&str; 5] = ["lunedì", "martedì", "mercoledì", "giovedì", "venerdì"];

pub(crate) const HOUR_ORDER: [&str; 8] = [
    "8h00", "9h00", "10h00", "11h00", "12h00", "13h00", "14h00", "15h00",
];

/// One positioned text token from a rendered page. Page y grows upward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// Content of one occupied timetable cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub subject: String,
    pub room: Option<String>,
}

/// Periods of one class on one weekday, keyed by hour label or "start-end" range.
pub type DaySchedule = BTreeMap<String, ScheduleEntry>;
pub type ClassSchedule = BTreeMap<String, DaySchedule>;
pub type Schedule = BTreeMap<String, ClassSchedule>;

/// Boundary to the rendering collaborator: positioned fragments, one page at
/// a time, in no particular order. Pages are indexed `0..page_count()`.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn fragments(&self, page: usize) -> Result<Vec<Fragment>>;
}

/// A serialized rendering: one JSON array of `{text, x, y}` objects per page.
pub struct PageDump {
    pages: Vec<Vec<Fragment>>,
}

impl PageDump {
    pub fn from_json(json: &str) -> Result<Self> {
        let pages: Vec<Vec<Fragment>> =
            serde_json::from_str(json).with_context(|| "failed to parse fragment page dump")?;
        Ok(Self { pages })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fragment page dump: {}", path.display()))?;
        Self::from_json(&content)
    }
}

impl PageSource for PageDump {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn fragments(&self, page: usize) -> Result<Vec<Fragment>> {
        self.pages
            .get(page)
            .cloned()
            .ok_or_else(|| anyhow!("page {} out of range ({} pages)", page, self.pages.len()))
    }
}

pub fn is_class_name(value: &str) -> bool {
    engine::CLASS_NAME_RE
        .find(value)
        .map(|found| found.start() == 0 && found.end() == value.len())
        .unwrap_or(false)
}

pub fn is_hour_label(value: &str) -> bool {
    engine::is_hour_label(value)
}

/// Resolves a period by exact key first, then by the range key containing the
/// queried hour. Range ends are exclusive, except that a range ending at the
/// final hour of the chronological ordering includes it.
pub fn lookup_period<'a>(
    schedule: &'a Schedule,
    class: &str,
    day: &str,
    hour: &str,
) -> Option<&'a ScheduleEntry> {
    let periods = schedule.get(class)?.get(day)?;
    if let Some(entry) = periods.get(hour) {
        return Some(entry);
    }

    let wanted = hour_value(hour)?;
    let last = hour_value(HOUR_ORDER[HOUR_ORDER.len() - 1]).unwrap_or(u32::MAX);
    for (key, entry) in periods {
        let Some((start, end)) = key.split_once('-') else {
            continue;
        };
        let (Some(start), Some(end)) = (hour_value(start), hour_value(end)) else {
            continue;
        };
        if wanted >= start && (wanted < end || (end == last && wanted == end)) {
            return Some(entry);
        }
    }
    None
}

fn hour_value(label: &str) -> Option<u32> {
    label.strip_suffix("h00")?.parse().ok()
}
