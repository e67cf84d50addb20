//! Schedule display command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, ScheduleResponse};
use crate::output::{
    color_confidence, color_status, format_duration, format_time, print_info, print_warning,
    OutputFormat,
};

/// Row for the schedule table
#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "Lift")]
    lift: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

/// Append date/seed query parameters to an API path
pub fn query_path(base: &str, date: Option<&str>, seed: Option<u64>) -> String {
    let mut params = Vec::new();
    if let Some(d) = date {
        params.push(format!("date={}", d));
    }
    if let Some(s) = seed {
        params.push(format!("seed={}", s));
    }

    if params.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, params.join("&"))
    }
}

/// Fetch and display a day's lift schedule
pub async fn show_schedule(
    client: &ApiClient,
    date: Option<String>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let path = query_path("api/v1/schedule", date.as_deref(), seed);
    let schedule: ScheduleResponse = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&schedule)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_info(&format!(
                "{} ({}) - {} [{}]",
                schedule.date,
                color_status(&schedule.source),
                schedule.model_status,
                schedule.accuracy
            ));
            println!("{}", schedule.banner);

            if schedule.entries.is_empty() {
                print_warning("No lifts scheduled");
                return Ok(());
            }

            let rows: Vec<ScheduleRow> = schedule
                .entries
                .iter()
                .map(|e| {
                    let end = (e.hour * 60 + e.minute + e.duration_minutes as u32) % 1440;
                    ScheduleRow {
                        lift: e.lift.to_string(),
                        start: format_time(e.hour, e.minute),
                        end: format_time(end / 60, end % 60),
                        duration: format_duration(e.duration_minutes),
                        confidence: e
                            .confidence
                            .map(color_confidence)
                            .unwrap_or_else(|| "--".to_string()),
                    }
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            if let Some(next) = &schedule.summary.next_lift {
                println!("\nNext lift: {}", next);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_path_without_parameters() {
        assert_eq!(query_path("api/v1/schedule", None, None), "api/v1/schedule");
    }

    #[test]
    fn test_query_path_with_date_and_seed() {
        assert_eq!(
            query_path("api/v1/schedule", Some("2025-06-15"), Some(7)),
            "api/v1/schedule?date=2025-06-15&seed=7"
        );
    }

    #[test]
    fn test_query_path_with_seed_only() {
        assert_eq!(
            query_path("api/v1/notify/sign", None, Some(3)),
            "api/v1/notify/sign?seed=3"
        );
    }
}
