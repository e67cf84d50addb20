//! Historical lift-record lookup
//!
//! When an actual log exists for a date the caller serves it instead of
//! invoking the schedule generator. The store is read-only per lookup;
//! loading real log files is the deployment's concern.

use crate::models::{RecordedLift, ScheduleEntry};
use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;

/// Collaborator answering "did the bridge actually lift on this date?"
pub trait HistoricalLookup: Send + Sync {
    /// Returns the recorded lifts for a date, sorted by start time, or
    /// `None` when the date has no historical record at all
    fn lifts_on(&self, date: NaiveDate) -> Option<Vec<RecordedLift>>;
}

/// In-memory record store grouped by date
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    by_date: HashMap<NaiveDate, Vec<RecordedLift>>,
}

impl InMemoryHistory {
    pub fn new(records: Vec<RecordedLift>) -> Self {
        let mut by_date: HashMap<NaiveDate, Vec<RecordedLift>> = HashMap::new();
        for record in records {
            by_date.entry(record.start.date()).or_default().push(record);
        }
        for lifts in by_date.values_mut() {
            lifts.sort_by_key(|l| l.start);
        }
        Self { by_date }
    }

    pub fn record_count(&self) -> usize {
        self.by_date.values().map(Vec::len).sum()
    }

    pub fn day_count(&self) -> usize {
        self.by_date.len()
    }
}

impl HistoricalLookup for InMemoryHistory {
    fn lifts_on(&self, date: NaiveDate) -> Option<Vec<RecordedLift>> {
        self.by_date.get(&date).cloned()
    }
}

/// Convert a day's records into display rows with 1-based lift indices
pub fn to_schedule_entries(records: &[RecordedLift]) -> Vec<ScheduleEntry> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_schedule_entry(i as u32 + 1))
        .collect()
}

/// Demonstration history covering the 30 days before `today`: 2-7 lifts
/// per day, starts on quarter-hour marks between 06:00 and 21:45,
/// durations of 10-24 minutes
pub fn sample_history(today: NaiveDate, seed: u64) -> InMemoryHistory {
    const MINUTES: [u32; 4] = [0, 15, 30, 45];
    const DIRECTIONS: [&str; 3] = ["IN", "OUT", "IN/OUT"];

    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for day_offset in 1..=30 {
        let date = today - Duration::days(day_offset);
        let lifts_today = rng.gen_range(2..8);

        for _ in 0..lifts_today {
            let hour = rng.gen_range(6..22);
            let minute = *MINUTES.choose(&mut rng).unwrap_or(&0);
            let duration = rng.gen_range(10..25);

            // Quarter-hour marks within 06:00-21:45 are always valid
            let Some(start) = date.and_hms_opt(hour, minute, 0) else {
                continue;
            };

            records.push(RecordedLift {
                start,
                end: start + Duration::minutes(duration),
                direction: DIRECTIONS.choose(&mut rng).unwrap_or(&"OUT").to_string(),
                vessel: "Sample Vessel".to_string(),
            });
        }
    }

    InMemoryHistory::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let history = sample_history(today(), 42);

        // Every one of the past 30 days has a record
        for day_offset in 1..=30 {
            let date = today() - Duration::days(day_offset);
            let lifts = history.lifts_on(date).expect("sampled day");
            assert!((2..=7).contains(&lifts.len()), "{} lifts", lifts.len());
        }

        // Today and the future have none
        assert!(history.lifts_on(today()).is_none());
        assert!(history.lifts_on(today() + Duration::days(1)).is_none());
    }

    #[test]
    fn test_records_sorted_within_day() {
        let history = sample_history(today(), 7);
        let date = today() - Duration::days(3);
        let lifts = history.lifts_on(date).unwrap();
        for pair in lifts.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
    }

    #[test]
    fn test_sample_history_is_seed_deterministic() {
        let a = sample_history(today(), 5);
        let b = sample_history(today(), 5);
        let date = today() - Duration::days(10);
        assert_eq!(a.lifts_on(date), b.lifts_on(date));
    }

    #[test]
    fn test_schedule_entry_conversion_indexing() {
        let history = sample_history(today(), 42);
        let date = today() - Duration::days(1);
        let lifts = history.lifts_on(date).unwrap();
        let entries = to_schedule_entries(&lifts);

        assert_eq!(entries.len(), lifts.len());
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.lift, i as u32 + 1);
            assert!(entry.confidence.is_none());
        }
    }

    #[test]
    fn test_empty_history() {
        let history = InMemoryHistory::default();
        assert_eq!(history.record_count(), 0);
        assert!(history.lifts_on(today()).is_none());
    }
}
