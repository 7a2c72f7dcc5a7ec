use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Display string for a task with no due date.
pub const UNSCHEDULED: &str = "Unscheduled";

const DUE_FORMAT: &str = "%-d %b %H:%M";

/// Inclusive start/end timestamps of a calendar day, used to ask the
/// backend for the "today" window.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    let end = date.and_hms_opt(23, 59, 59).unwrap_or(start);
    (start, end)
}

/// Short due-date label: day, abbreviated month, hour and minute.
/// Absence is a real state, not a formatting error.
pub fn format_due(due: Option<NaiveDateTime>) -> String {
    match due {
        Some(dt) => dt.format(DUE_FORMAT).to_string(),
        None => UNSCHEDULED.to_string(),
    }
}
