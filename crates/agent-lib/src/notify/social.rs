//! Social-post text rendering
//!
//! Produces the fixed-format schedule post. The format is an external
//! contract consumed verbatim by the posting tooling, so every literal
//! below is load-bearing.

use crate::models::ScheduleEntry;
use chrono::{Datelike, NaiveDate};

/// Render the social-post text for a date's schedule.
///
/// Pure: the same entries always render to byte-identical text.
pub fn render_social(date: NaiveDate, entries: &[ScheduleEntry]) -> String {
    // Month/day without zero padding
    let date_str = format!("{}/{}", date.month(), date.day());

    if entries.is_empty() {
        return format!(
            "{} Expected Bridge Lifts\n\nNo lifts expected today.\n\n* Subject to Change *",
            date_str
        );
    }

    let mut lines = vec![format!("{} Expected Bridge Lifts\n", date_str)];

    for entry in entries {
        let duration = entry.duration_minutes as i64;
        let range = if duration > 15 {
            format!("{}-{}", duration - 5, duration + 5)
        } else {
            "15".to_string()
        };
        lines.push(format!(
            "{} estimated duration {} min",
            clock_12h(entry.hour, entry.minute),
            range
        ));
    }

    lines.push("\n* Subject to Change *".to_string());
    lines.join("\n")
}

/// 12-hour clock with lowercase am/pm and no leading zero on the hour
fn clock_12h(hour: u32, minute: u32) -> String {
    match hour {
        0 => format!("12:{:02}am", minute),
        1..=11 => format!("{}:{:02}am", hour, minute),
        12 => format!("12:{:02}pm", minute),
        _ => format!("{}:{:02}pm", hour - 12, minute),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hour: u32, minute: u32, duration: f64) -> ScheduleEntry {
        ScheduleEntry {
            lift: 1,
            hour,
            minute,
            duration_minutes: duration,
            confidence: Some(0.87),
        }
    }

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_empty_schedule_literal() {
        let text = render_social(june_first(), &[]);
        assert_eq!(
            text,
            "6/1 Expected Bridge Lifts\n\nNo lifts expected today.\n\n* Subject to Change *"
        );
    }

    #[test]
    fn test_date_is_not_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let text = render_social(date, &[]);
        assert!(text.starts_with("3/7 Expected Bridge Lifts"));
    }

    #[test]
    fn test_single_entry_with_duration_range() {
        let text = render_social(june_first(), &[entry(9, 30, 20.0)]);
        assert_eq!(
            text,
            "6/1 Expected Bridge Lifts\n\n9:30am estimated duration 15-25 min\n\n* Subject to Change *"
        );
    }

    #[test]
    fn test_short_duration_renders_literal_fifteen() {
        let text = render_social(june_first(), &[entry(0, 0, 10.0)]);
        assert!(text.contains("12:00am estimated duration 15 min"));
    }

    #[test]
    fn test_duration_exactly_fifteen_is_not_a_range() {
        let text = render_social(june_first(), &[entry(8, 0, 15.0)]);
        assert!(text.contains("8:00am estimated duration 15 min"));
    }

    #[test]
    fn test_fractional_duration_truncates_before_threshold() {
        // 15.9 truncates to 15, which is not > 15
        let text = render_social(june_first(), &[entry(8, 0, 15.9)]);
        assert!(text.contains("estimated duration 15 min"));
    }

    #[test]
    fn test_noon_and_afternoon_times() {
        let entries = [entry(12, 0, 20.0), entry(17, 45, 25.0)];
        let text = render_social(june_first(), &entries);
        assert!(text.contains("12:00pm estimated duration 15-25 min"));
        assert!(text.contains("5:45pm estimated duration 20-30 min"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let entries = [entry(9, 30, 20.0), entry(14, 0, 12.0)];
        let first = render_social(june_first(), &entries);
        let second = render_social(june_first(), &entries);
        assert_eq!(first, second);
    }
}
