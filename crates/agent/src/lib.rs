//! Bridge agent service crate: HTTP API, configuration, and the
//! Open-Meteo weather client. The binary in `main.rs` wires these
//! together; integration tests drive the router directly.

pub mod api;
pub mod config;
pub mod weather;
