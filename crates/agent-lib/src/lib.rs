//! Core library for drawbridge lift prediction
//!
//! This crate provides the core functionality for:
//! - Feature extraction and schedule generation
//! - Social-post and roadway-sign text rendering
//! - Notification dispatch and communication logging
//! - Historical lift-record lookup
//! - Health checks and observability

pub mod health;
pub mod history;
pub mod models;
pub mod notify;
pub mod observability;
pub mod predictor;
pub mod summary;
pub mod weather;

pub use health::{
    ComponentHealth, ComponentStatus, HealthRegistry, HealthResponse, ReadinessResponse,
};
pub use models::*;
pub use observability::{AgentMetrics, StructuredLogger};
