//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a 24-hour clock time with zero padding
pub fn format_time(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Format a duration in whole minutes
pub fn format_duration(minutes: f64) -> String {
    format!("{} min", minutes as i64)
}

/// Format confidence as percentage
pub fn format_confidence(confidence: f32) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Color status based on value
pub fn color_status(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "healthy" | "sent" | "predicted" => status.green().to_string(),
        "degraded" | "warning" | "historical" => status.yellow().to_string(),
        "unhealthy" | "error" | "failed" => status.red().to_string(),
        _ => status.to_string(),
    }
}

/// Color confidence based on value
pub fn color_confidence(confidence: f32) -> String {
    let formatted = format_confidence(confidence);
    if confidence >= 0.8 {
        formatted.green().to_string()
    } else if confidence >= 0.6 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_zero_pads() {
        assert_eq!(format_time(9, 5), "09:05");
        assert_eq!(format_time(14, 30), "14:30");
    }

    #[test]
    fn test_format_duration_truncates() {
        assert_eq!(format_duration(15.0), "15 min");
        assert_eq!(format_duration(17.9), "17 min");
    }

    #[test]
    fn test_format_confidence_rounds_to_percent() {
        assert_eq!(format_confidence(0.87), "87%");
        assert_eq!(format_confidence(0.7), "70%");
    }
}
