//! Bridge Agent - drawbridge lift prediction service
//!
//! Serves predicted (or recorded) daily lift schedules, the social and
//! roadway-sign notification texts, and the simulated VMS dispatcher
//! over HTTP.

use anyhow::Result;
use bridge_agent::{api, config::AgentConfig, weather::OpenMeteoClient};
use bridge_lib::{
    health::{components, HealthRegistry},
    history::sample_history,
    models::ModelAvailability,
    notify::{CommunicationLog, SimulatedVms},
    observability::{AgentMetrics, StructuredLogger},
};
use chrono::{Duration, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check which trained artifacts are present on disk. Only their
/// presence matters; the heuristic generator never loads them.
fn probe_models(dir: &Path) -> ModelAvailability {
    ModelAvailability {
        primary_model_present: dir.join("mlp_model.bin").exists(),
        secondary_model_present: dir.join("tabnet_model.bin").exists(),
        scaler_present: dir.join("scaler.bin").exists(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting bridge-agent");

    // Load configuration
    let config = AgentConfig::load()?;
    info!(site_name = %config.site_name, "Agent configured");

    // Initialize health registry
    let health_registry = HealthRegistry::new();
    health_registry.register(components::WEATHER).await;
    health_registry.register(components::PREDICTOR).await;
    health_registry.register(components::HISTORY).await;
    health_registry.register(components::DISPATCH).await;

    // Probe model artifacts and pick the confidence tier
    let capability = probe_models(Path::new(&config.model_dir)).capability();
    let tier = capability.tier();

    // Initialize metrics
    let metrics = AgentMetrics::new();
    metrics.set_model_tier(tier.status_label(), tier.accuracy_label());

    // Initialize structured logger
    let logger = StructuredLogger::new(&config.site_name);
    logger.log_startup(AGENT_VERSION, tier.status_label());

    // Demonstration history for the 30 days before today
    let local_today =
        (Utc::now() + Duration::hours(config.timezone_offset_hours)).date_naive();
    let history = sample_history(local_today, config.history_seed);

    let weather = OpenMeteoClient::new(
        config.latitude,
        config.longitude,
        config.timezone_offset_hours,
        config.max_forecast_days,
    )?;

    // Create shared application state
    let app_state = Arc::new(api::AppState {
        health_registry: health_registry.clone(),
        metrics,
        logger: logger.clone(),
        capability,
        history: Arc::new(history),
        weather: Arc::new(weather),
        vms: Arc::new(SimulatedVms::new(config.vms_sign_count)),
        comm_log: CommunicationLog::new(),
        timezone_offset_hours: config.timezone_offset_hours,
    });

    // Mark agent as ready after initialization
    health_registry.set_ready(true).await;

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    logger.log_shutdown("SIGINT received");
    info!("Shutting down");

    Ok(())
}
