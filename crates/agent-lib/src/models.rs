//! Core data models for the bridge lift predictor

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A raw candidate lift event derived for one slot of the candidate grid.
///
/// Candidates are created fresh per prediction call and never mutated;
/// the spacing filter discards or promotes them into [`ScheduleEntry`]s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvent {
    pub hour: u32,
    pub minute: u32,
    pub duration_minutes: f64,
    pub confidence: f32,
}

impl CandidateEvent {
    /// Start time expressed as minutes since midnight
    pub fn minutes_of_day(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// A candidate that survived the spacing filter, with its 1-based lift index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub lift: u32,
    pub hour: u32,
    pub minute: u32,
    pub duration_minutes: f64,
    /// Present for predicted entries, absent for historical records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ScheduleEntry {
    pub fn from_candidate(lift: u32, candidate: &CandidateEvent) -> Self {
        Self {
            lift,
            hour: candidate.hour,
            minute: candidate.minute,
            duration_minutes: candidate.duration_minutes,
            confidence: Some(candidate.confidence),
        }
    }

    /// Start time expressed as minutes since midnight
    pub fn start_minutes(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// End time as (hour, minute), wrapped across midnight
    pub fn end_time(&self) -> (u32, u32) {
        let end_total = self.start_minutes() + self.duration_minutes as u32;
        ((end_total / 60) % 24, end_total % 60)
    }
}

/// Confidence tier reported in place of a real model output probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    /// Primary model and scaler both present
    Ensemble,
    /// Secondary model and scaler present
    Enhanced,
    /// No usable model artifacts, heuristic output only
    Heuristic,
}

impl ConfidenceTier {
    /// Fixed confidence value reported for every prediction in this tier
    pub fn value(&self) -> f32 {
        match self {
            ConfidenceTier::Ensemble => 0.87,
            ConfidenceTier::Enhanced => 0.75,
            ConfidenceTier::Heuristic => 0.70,
        }
    }

    /// Operator-facing mode label
    pub fn status_label(&self) -> &'static str {
        match self {
            ConfidenceTier::Ensemble => "Full AI Ensemble",
            ConfidenceTier::Enhanced => "Enhanced Mode",
            ConfidenceTier::Heuristic => "Basic Mode",
        }
    }

    /// Headline accuracy figure shown next to the mode label
    pub fn accuracy_label(&self) -> &'static str {
        match self {
            ConfidenceTier::Ensemble => "87%+",
            ConfidenceTier::Enhanced => "82%",
            ConfidenceTier::Heuristic => "70%",
        }
    }
}

/// Which optional prediction collaborators are reported as present.
///
/// No inference is ever invoked; these flags only select the confidence
/// tier attached to generated entries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ModelAvailability {
    pub primary_model_present: bool,
    pub secondary_model_present: bool,
    pub scaler_present: bool,
}

impl ModelAvailability {
    pub fn capability(&self) -> ModelCapability {
        if self.primary_model_present && self.scaler_present {
            ModelCapability::Available(ConfidenceTier::Ensemble)
        } else if self.secondary_model_present && self.scaler_present {
            ModelCapability::Available(ConfidenceTier::Enhanced)
        } else {
            ModelCapability::Unavailable
        }
    }
}

/// Capability seam between the schedule generator and the (stubbed) model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCapability {
    Unavailable,
    Available(ConfidenceTier),
}

impl ModelCapability {
    pub fn tier(&self) -> ConfidenceTier {
        match self {
            ModelCapability::Unavailable => ConfidenceTier::Heuristic,
            ModelCapability::Available(tier) => *tier,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.tier().value()
    }
}

/// An actual past bridge lift from the historical log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedLift {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub direction: String,
    pub vessel: String,
}

impl RecordedLift {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// View a recorded lift as a schedule row (no confidence attached)
    pub fn to_schedule_entry(&self, lift: u32) -> ScheduleEntry {
        ScheduleEntry {
            lift,
            hour: self.start.hour(),
            minute: self.start.minute(),
            duration_minutes: self.duration_minutes() as f64,
            confidence: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_end_time_same_hour() {
        let entry = ScheduleEntry {
            lift: 1,
            hour: 9,
            minute: 10,
            duration_minutes: 20.0,
            confidence: Some(0.87),
        };
        assert_eq!(entry.end_time(), (9, 30));
    }

    #[test]
    fn test_end_time_wraps_midnight() {
        let entry = ScheduleEntry {
            lift: 1,
            hour: 23,
            minute: 50,
            duration_minutes: 25.0,
            confidence: None,
        };
        assert_eq!(entry.end_time(), (0, 15));
    }

    #[test]
    fn test_confidence_tier_values() {
        assert_eq!(ConfidenceTier::Ensemble.value(), 0.87);
        assert_eq!(ConfidenceTier::Enhanced.value(), 0.75);
        assert_eq!(ConfidenceTier::Heuristic.value(), 0.70);
    }

    #[test]
    fn test_capability_requires_scaler() {
        let availability = ModelAvailability {
            primary_model_present: true,
            secondary_model_present: true,
            scaler_present: false,
        };
        assert_eq!(availability.capability(), ModelCapability::Unavailable);
        assert_eq!(availability.capability().confidence(), 0.70);
    }

    #[test]
    fn test_capability_tier_selection() {
        let ensemble = ModelAvailability {
            primary_model_present: true,
            secondary_model_present: false,
            scaler_present: true,
        };
        assert_eq!(
            ensemble.capability(),
            ModelCapability::Available(ConfidenceTier::Ensemble)
        );

        let enhanced = ModelAvailability {
            primary_model_present: false,
            secondary_model_present: true,
            scaler_present: true,
        };
        assert_eq!(
            enhanced.capability(),
            ModelCapability::Available(ConfidenceTier::Enhanced)
        );
    }

    #[test]
    fn test_recorded_lift_duration() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let lift = RecordedLift {
            start: date.and_hms_opt(9, 15, 0).unwrap(),
            end: date.and_hms_opt(9, 33, 0).unwrap(),
            direction: "OUT".to_string(),
            vessel: "Tanker".to_string(),
        };
        assert_eq!(lift.duration_minutes(), 18);

        let entry = lift.to_schedule_entry(2);
        assert_eq!(entry.lift, 2);
        assert_eq!(entry.hour, 9);
        assert_eq!(entry.minute, 15);
        assert_eq!(entry.confidence, None);
    }
}
