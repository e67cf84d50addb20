//! Agent configuration

use anyhow::Result;
use serde::Deserialize;

/// Agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Site identifier carried in structured log events
    #[serde(default = "default_site_name")]
    pub site_name: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Bridge latitude for weather lookups
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Bridge longitude for weather lookups
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Local UTC offset in hours, used to decide what "today" means
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset_hours: i64,

    /// Furthest date ahead the forecast endpoint covers
    #[serde(default = "default_max_forecast_days")]
    pub max_forecast_days: i64,

    /// Number of roadway signs on the VMS network
    #[serde(default = "default_vms_sign_count")]
    pub vms_sign_count: u32,

    /// Directory holding the trained model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// Seed for the demonstration history store
    #[serde(default = "default_history_seed")]
    pub history_seed: u64,
}

fn default_site_name() -> String {
    "chelsea-st-bridge".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_latitude() -> f64 {
    42.3601
}

fn default_longitude() -> f64 {
    -71.0589
}

fn default_timezone_offset() -> i64 {
    -5
}

fn default_max_forecast_days() -> i64 {
    16
}

fn default_vms_sign_count() -> u32 {
    3
}

fn default_model_dir() -> String {
    "models".to_string()
}

fn default_history_seed() -> u64 {
    42
}

impl AgentConfig {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("BRIDGE"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| AgentConfig {
            site_name: default_site_name(),
            api_port: default_api_port(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone_offset_hours: default_timezone_offset(),
            max_forecast_days: default_max_forecast_days(),
            vms_sign_count: default_vms_sign_count(),
            model_dir: default_model_dir(),
            history_seed: default_history_seed(),
        }))
    }
}
