//! Schedule generation
//!
//! Turns the fixed candidate grid into a bounded, temporally-spaced lift
//! schedule: jitter each slot, clamp durations, drop candidates outside
//! the operational window, then apply the greedy minimum-gap filter.

use super::features::{FeatureVector, CANDIDATE_HOURS, CANDIDATE_MINUTES};
use crate::models::{CandidateEvent, ModelCapability, ScheduleEntry};
use crate::weather::AmbientReading;
use chrono::NaiveDate;
use rand::Rng;
use rand_distr::StandardNormal;
use std::ops::RangeInclusive;
use tracing::debug;

/// Minimum gap between consecutive kept lifts; lifts cannot usefully
/// overlap or cluster closer than this
pub const MIN_SPACING_MINUTES: i64 = 45;

/// Upper bound on lifts reported for one day
pub const MAX_LIFTS_PER_DAY: usize = 6;

/// Hours during which the bridge crew operates
pub const OPERATIONAL_HOURS: RangeInclusive<u32> = 6..=22;

/// Standard deviation of the start-time jitter (minutes)
const START_JITTER_SIGMA: f64 = 8.0;

/// Standard deviation of the duration jitter (minutes)
const DURATION_SIGMA: f64 = 4.0;

/// Nominal lift duration before jitter (minutes)
const BASE_DURATION_MINUTES: f64 = 15.0;

/// Duration clamp bounds (minutes)
const MIN_DURATION_MINUTES: f64 = 10.0;
const MAX_DURATION_MINUTES: f64 = 30.0;

/// Spacing-filter sentinel: guarantees the first candidate survives
const SPACING_SENTINEL: i64 = -60;

/// Tunables for schedule generation
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub min_spacing_minutes: i64,
    pub max_lifts: usize,
    pub start_jitter_sigma: f64,
    pub duration_sigma: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_spacing_minutes: MIN_SPACING_MINUTES,
            max_lifts: MAX_LIFTS_PER_DAY,
            start_jitter_sigma: START_JITTER_SIGMA,
            duration_sigma: DURATION_SIGMA,
        }
    }
}

/// Generates the daily lift schedule for a date and ambient reading.
///
/// The randomness source is injected so seeded callers get deterministic
/// schedules; repeated unseeded calls may differ.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    capability: ModelCapability,
    config: GeneratorConfig,
}

impl ScheduleGenerator {
    pub fn new(capability: ModelCapability) -> Self {
        Self {
            capability,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(capability: ModelCapability, config: GeneratorConfig) -> Self {
        Self { capability, config }
    }

    pub fn capability(&self) -> ModelCapability {
        self.capability
    }

    /// Generate at most `max_lifts` schedule entries, strictly ordered by
    /// start time with the minimum spacing enforced. Never fails; an empty
    /// schedule is a valid result.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        ambient: &AmbientReading,
        rng: &mut R,
    ) -> Vec<ScheduleEntry> {
        let confidence = self.capability.confidence();
        let mut candidates = Vec::with_capacity(CANDIDATE_HOURS.len() * CANDIDATE_MINUTES.len());

        for &hour in &CANDIDATE_HOURS {
            for &minute in &CANDIDATE_MINUTES {
                // Features feed the real model when one is present.
                let features = FeatureVector::build(date, hour, minute, ambient, rng);

                let start_noise: f64 = rng.sample::<f64, _>(StandardNormal)
                    * self.config.start_jitter_sigma;
                let duration_noise: f64 =
                    rng.sample::<f64, _>(StandardNormal) * self.config.duration_sigma;

                let raw_start =
                    f64::from(features.start_hour * 60 + features.start_minute) + start_noise;
                let duration = (BASE_DURATION_MINUTES + duration_noise)
                    .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES);

                // Wrap into a valid time of day before the window check
                let minutes_of_day = raw_start.rem_euclid(1440.0);
                let pred_hour = (minutes_of_day / 60.0).floor() as u32;
                let pred_minute = (minutes_of_day % 60.0).floor() as u32;

                if OPERATIONAL_HOURS.contains(&pred_hour) {
                    candidates.push(CandidateEvent {
                        hour: pred_hour,
                        minute: pred_minute,
                        duration_minutes: duration,
                        confidence,
                    });
                }
            }
        }

        candidates.sort_by_key(CandidateEvent::minutes_of_day);

        let mut kept: Vec<CandidateEvent> = Vec::new();
        let mut last_kept = SPACING_SENTINEL;
        for candidate in candidates {
            let t = i64::from(candidate.minutes_of_day());
            if t - last_kept >= self.config.min_spacing_minutes {
                kept.push(candidate);
                last_kept = t;
            }
        }
        kept.truncate(self.config.max_lifts);

        let entries: Vec<ScheduleEntry> = kept
            .iter()
            .enumerate()
            .map(|(i, c)| ScheduleEntry::from_candidate(i as u32 + 1, c))
            .collect();

        debug!(
            date = %date,
            lifts = entries.len(),
            tier = ?self.capability.tier(),
            "Generated lift schedule"
        );

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfidenceTier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> ScheduleGenerator {
        ScheduleGenerator::new(ModelCapability::Available(ConfidenceTier::Ensemble))
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn test_schedule_bounds_and_ordering() {
        let ambient = AmbientReading::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let entries = generator().generate(test_date(), &ambient, &mut rng);

            assert!(entries.len() <= MAX_LIFTS_PER_DAY);
            for pair in entries.windows(2) {
                let gap =
                    i64::from(pair[1].start_minutes()) - i64::from(pair[0].start_minutes());
                assert!(gap >= MIN_SPACING_MINUTES, "gap {} below minimum", gap);
            }
        }
    }

    #[test]
    fn test_durations_and_hours_within_limits() {
        let ambient = AmbientReading::default();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for entry in generator().generate(test_date(), &ambient, &mut rng) {
                assert!((10.0..=30.0).contains(&entry.duration_minutes));
                assert!(OPERATIONAL_HOURS.contains(&entry.hour));
                assert!(entry.minute < 60);
            }
        }
    }

    #[test]
    fn test_lift_indices_are_sequential() {
        let ambient = AmbientReading::default();
        let mut rng = StdRng::seed_from_u64(3);
        let entries = generator().generate(test_date(), &ambient, &mut rng);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.lift, i as u32 + 1);
        }
    }

    #[test]
    fn test_confidence_matches_tier() {
        let ambient = AmbientReading::default();
        let mut rng = StdRng::seed_from_u64(5);
        let gen = ScheduleGenerator::new(ModelCapability::Unavailable);
        for entry in gen.generate(test_date(), &ambient, &mut rng) {
            assert_eq!(entry.confidence, Some(0.70));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let ambient = AmbientReading::default();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first = generator().generate(test_date(), &ambient, &mut a);
        let second = generator().generate(test_date(), &ambient, &mut b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let ambient = AmbientReading::default();
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let first = generator().generate(test_date(), &ambient, &mut a);
        let second = generator().generate(test_date(), &ambient, &mut b);
        assert_ne!(first, second);
    }

    #[test]
    fn test_spacing_filter_keeps_first_candidate() {
        // With the -60 sentinel the earliest surviving candidate is always
        // kept, so a non-empty candidate pool yields a non-empty schedule.
        let ambient = AmbientReading::default();
        let mut rng = StdRng::seed_from_u64(17);
        let entries = generator().generate(test_date(), &ambient, &mut rng);
        assert!(!entries.is_empty());
    }

    #[test]
    fn test_zero_max_lifts_yields_empty_schedule() {
        let ambient = AmbientReading::default();
        let config = GeneratorConfig {
            max_lifts: 0,
            ..GeneratorConfig::default()
        };
        let gen = ScheduleGenerator::with_config(
            ModelCapability::Available(ConfidenceTier::Enhanced),
            config,
        );
        let mut rng = StdRng::seed_from_u64(4);
        assert!(gen.generate(test_date(), &ambient, &mut rng).is_empty());
    }
}
