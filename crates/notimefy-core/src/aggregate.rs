use crate::kimai::TimeRecord;

/// Sum of record durations in minutes.
pub fn total_minutes(records: &[TimeRecord]) -> u64 {
    records.iter().map(TimeRecord::duration_minutes).sum()
}

/// Whole hours logged across `records`, rounded down.
pub fn total_hours(records: &[TimeRecord]) -> u64 {
    hours_from_minutes(total_minutes(records))
}

pub fn hours_from_minutes(minutes: u64) -> u64 {
    minutes / 60
}
