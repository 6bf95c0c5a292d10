use crate::schedule::{DaySchedule, ScheduleEntry, HOUR_ORDER};

// Collapses consecutive identical (subject, room) hours into one range key.
// Keys outside the chronological ordering (already-merged ranges, off-grid
// hours) pass through untouched, so a second application is a no-op.
pub(super) fn merge_double_periods(periods: &DaySchedule) -> DaySchedule {
    let mut merged = DaySchedule::new();
    for (key, entry) in periods {
        if !HOUR_ORDER.contains(&key.as_str()) {
            merged.insert(key.clone(), entry.clone());
        }
    }

    let mut i = 0;
    while i < HOUR_ORDER.len() {
        let hour = HOUR_ORDER[i];
        let Some(entry) = periods.get(hour) else {
            i += 1;
            continue;
        };
        let mut j = i + 1;
        while j < HOUR_ORDER.len() && periods.get(HOUR_ORDER[j]) == Some(entry) {
            j += 1;
        }
        if j - i > 1 {
            // the end label is the hour after the run, or the final hour
            // itself when the run reaches the end of the ordering
            let end = HOUR_ORDER.get(j).copied().unwrap_or(HOUR_ORDER[j - 1]);
            merged.insert(format!("{}-{}", hour, end), entry.clone());
        } else {
            merged.insert(hour.to_string(), entry.clone());
        }
        i = j;
    }
    merged
}
