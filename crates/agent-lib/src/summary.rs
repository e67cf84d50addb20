//! Schedule summary and traffic-impact banner

use crate::models::ScheduleEntry;
use serde::{Deserialize, Serialize};

/// Headline numbers for a day's schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub lift_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_confidence: Option<f32>,
    /// Upcoming lift as "HH:MM", `None` when no lift remains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_lift: Option<String>,
}

/// Summarize a schedule.
///
/// `reference_minutes` is the current minutes-of-day when summarizing
/// today (only later lifts count as upcoming); `None` means a future
/// date, where the first lift is the next one.
pub fn summarize(entries: &[ScheduleEntry], reference_minutes: Option<u32>) -> ScheduleSummary {
    let lift_count = entries.len();

    let avg_duration_minutes = (lift_count > 0).then(|| {
        entries.iter().map(|e| e.duration_minutes).sum::<f64>() / lift_count as f64
    });

    let confidences: Vec<f32> = entries.iter().filter_map(|e| e.confidence).collect();
    let avg_confidence = (!confidences.is_empty())
        .then(|| confidences.iter().sum::<f32>() / confidences.len() as f32);

    let next_lift = match reference_minutes {
        Some(now) => entries.iter().find(|e| e.start_minutes() > now),
        None => entries.first(),
    }
    .map(|e| format!("{:02}:{:02}", e.hour, e.minute));

    ScheduleSummary {
        lift_count,
        avg_duration_minutes,
        avg_confidence,
        next_lift,
    }
}

/// Banner tier shown above the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficImpact {
    Clear,
    Moderate,
    Heavy,
}

impl TrafficImpact {
    pub fn for_lift_count(count: usize) -> Self {
        match count {
            0 => TrafficImpact::Clear,
            1..=3 => TrafficImpact::Moderate,
            _ => TrafficImpact::Heavy,
        }
    }

    /// Operator-facing banner message for a lift count
    pub fn banner(count: usize) -> String {
        match Self::for_lift_count(count) {
            TrafficImpact::Clear => {
                "No bridge lifts predicted today - clear travel!".to_string()
            }
            TrafficImpact::Moderate => {
                format!("{} bridge lifts predicted - plan accordingly", count)
            }
            TrafficImpact::Heavy => format!("{} lifts predicted - expect delays", count),
        }
    }
}
