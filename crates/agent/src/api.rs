//! HTTP API: health checks, Prometheus metrics, and the schedule,
//! notification, and dispatch endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bridge_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    history::{to_schedule_entries, HistoricalLookup},
    models::{ModelCapability, ScheduleEntry},
    notify::{render_sign, render_social, x_intent_url, Channel, CommunicationLog, VmsDispatcher},
    observability::{AgentMetrics, StructuredLogger},
    predictor::ScheduleGenerator,
    summary::{summarize, ScheduleSummary, TrafficImpact},
    weather::AmbientProvider,
};
use chrono::{Duration, NaiveDate, Timelike, Utc};
use prometheus::{Encoder, TextEncoder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub metrics: AgentMetrics,
    pub logger: StructuredLogger,
    pub capability: ModelCapability,
    pub history: Arc<dyn HistoricalLookup>,
    pub weather: Arc<dyn AmbientProvider>,
    pub vms: Arc<dyn VmsDispatcher>,
    pub comm_log: CommunicationLog,
    /// Local UTC offset deciding what "today" means
    pub timezone_offset_hours: i64,
}

impl AppState {
    fn local_now(&self) -> chrono::NaiveDateTime {
        (Utc::now() + Duration::hours(self.timezone_offset_hours)).naive_utc()
    }

    fn local_today(&self) -> NaiveDate {
        self.local_now().date()
    }
}

/// Where a served schedule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSource {
    Historical,
    Predicted,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    date: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct DispatchRequest {
    date: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub date: String,
    pub source: ScheduleSource,
    pub model_status: String,
    pub accuracy: String,
    pub banner: String,
    pub entries: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

#[derive(Debug, Serialize)]
struct SocialResponse {
    date: String,
    text: String,
    intent_url: String,
}

#[derive(Debug, Serialize)]
struct SignResponse {
    text: String,
}

/// Resolve a date parameter, defaulting to the local today
fn parse_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ApiError> {
    match raw {
        None => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| bad_request(format!("invalid date '{}', expected YYYY-MM-DD", s))),
    }
}

/// Serve a date's schedule: the historical record wins, otherwise a
/// prediction is generated
async fn resolve_schedule(
    state: &AppState,
    date: NaiveDate,
    seed: Option<u64>,
) -> (ScheduleSource, Vec<ScheduleEntry>) {
    if let Some(records) = state.history.lifts_on(date) {
        state.metrics.inc_historical_hits();
        state
            .logger
            .log_historical_hit(&date.to_string(), records.len());
        return (ScheduleSource::Historical, to_schedule_entries(&records));
    }

    let raw = state.weather.ambient_for(date).await;
    if raw.is_complete() {
        state.health_registry.set_healthy(components::WEATHER).await;
    } else {
        state
            .health_registry
            .set_degraded(components::WEATHER, "Using seasonal defaults")
            .await;
        state.metrics.inc_weather_fallbacks();
        state
            .logger
            .log_weather_fallback(&date.to_string(), "incomplete reading");
    }
    let ambient = raw.or_defaults();

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let started = Instant::now();
    let generator = ScheduleGenerator::new(state.capability);
    let entries = generator.generate(date, &ambient, &mut rng);
    state
        .metrics
        .observe_prediction_latency(started.elapsed().as_secs_f64());

    state.metrics.record_schedule(entries.len());
    state.logger.log_schedule(
        &date.to_string(),
        entries.len(),
        state.capability.confidence(),
        state.capability.tier().status_label(),
    );

    (ScheduleSource::Predicted, entries)
}

async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let today = state.local_today();
    let date = parse_date(query.date.as_deref(), today)?;
    let (source, entries) = resolve_schedule(&state, date, query.seed).await;

    // Only for today does "next lift" depend on the current time
    let reference_minutes = (date == today).then(|| {
        let now = state.local_now().time();
        now.hour() * 60 + now.minute()
    });
    let summary = summarize(&entries, reference_minutes);

    let tier = state.capability.tier();
    Ok(Json(ScheduleResponse {
        date: date.to_string(),
        source,
        model_status: tier.status_label().to_string(),
        accuracy: tier.accuracy_label().to_string(),
        banner: TrafficImpact::banner(entries.len()),
        entries,
        summary,
    }))
}

async fn get_social(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<SocialResponse>, ApiError> {
    let date = parse_date(query.date.as_deref(), state.local_today())?;
    let (_, entries) = resolve_schedule(&state, date, query.seed).await;

    let text = render_social(date, &entries);
    let intent_url = x_intent_url(&text).to_string();
    Ok(Json(SocialResponse {
        date: date.to_string(),
        text,
        intent_url,
    }))
}

async fn get_sign(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<SignResponse>, ApiError> {
    let date = parse_date(query.date.as_deref(), state.local_today())?;
    let (_, entries) = resolve_schedule(&state, date, query.seed).await;

    Ok(Json(SignResponse {
        text: render_sign(&entries),
    }))
}

async fn dispatch_vms(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DispatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(request.date.as_deref(), state.local_today())?;
    let (_, entries) = resolve_schedule(&state, date, request.seed).await;
    let text = render_sign(&entries);

    match state.vms.send(&text).await {
        Ok(receipt) => {
            state.health_registry.set_healthy(components::DISPATCH).await;
            state.comm_log.record(Channel::Vms, "sent", &text).await;
            state.metrics.inc_dispatches_sent();
            state
                .logger
                .log_dispatch("vms", true, &receipt.message_preview);
            Ok(Json(receipt))
        }
        Err(err) => {
            state
                .health_registry
                .set_unhealthy(components::DISPATCH, err.to_string())
                .await;
            state.comm_log.record(Channel::Vms, "failed", &text).await;
            state.logger.log_dispatch("vms", false, &err.to_string());
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

async fn get_dispatch_log(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LogQuery>,
) -> impl IntoResponse {
    let entries = state.comm_log.recent(query.limit.unwrap_or(20)).await;
    Json(serde_json::json!({ "entries": entries }))
}

/// Health check response - returns 200 if healthy, 503 if degraded/unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            err.to_string().into_bytes(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .route("/api/v1/schedule", get(get_schedule))
        .route("/api/v1/notify/social", get(get_social))
        .route("/api/v1/notify/sign", get(get_sign))
        .route("/api/v1/dispatch/vms", post(dispatch_vms))
        .route("/api/v1/dispatch/log", get(get_dispatch_log))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
