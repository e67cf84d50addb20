//! Outbound dispatch collaborators
//!
//! The core only builds text; sending it belongs to external channels.
//! This module provides the X intent-URL builder, the VMS dispatcher
//! seam with a simulated implementation, and an in-memory log of what
//! was sent.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;
use url::Url;

/// Base URL for the X (Twitter) web intent
pub const X_INTENT_BASE: &str = "https://twitter.com/intent/tweet";

/// Maximum entries retained in the communication log
const LOG_CAPACITY: usize = 100;

/// Build a pre-filled X post URL for the given text
pub fn x_intent_url(text: &str) -> Url {
    Url::parse_with_params(X_INTENT_BASE, &[("text", text)]).expect("static intent base URL")
}

/// Outbound notification channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Vms,
    X,
}

/// Result of a successful dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReceipt {
    pub channel: Channel,
    pub signs_reached: u32,
    pub message_preview: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("sign network unavailable: {0}")]
    Unavailable(String),
}

/// Collaborator that pushes text out to the roadway signs
#[async_trait]
pub trait VmsDispatcher: Send + Sync {
    async fn send(&self, text: &str) -> Result<DispatchReceipt, DispatchError>;
}

/// Simulated VMS transmission: no network I/O, always reaches the
/// configured sign count
#[derive(Debug, Clone)]
pub struct SimulatedVms {
    sign_count: u32,
}

impl SimulatedVms {
    pub fn new(sign_count: u32) -> Self {
        Self { sign_count }
    }
}

impl Default for SimulatedVms {
    fn default() -> Self {
        Self::new(3)
    }
}

#[async_trait]
impl VmsDispatcher for SimulatedVms {
    async fn send(&self, text: &str) -> Result<DispatchReceipt, DispatchError> {
        if self.sign_count == 0 {
            return Err(DispatchError::Unavailable(
                "no signs configured".to_string(),
            ));
        }

        let preview = first_line(text);
        info!(
            event = "vms_dispatch",
            signs = self.sign_count,
            preview = %preview,
            "Sent text to VMS network (simulated)"
        );

        Ok(DispatchReceipt {
            channel: Channel::Vms,
            signs_reached: self.sign_count,
            message_preview: preview,
            sent_at: Utc::now(),
        })
    }
}

/// A single dispatch event as shown to operators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<Utc>,
    pub channel: Channel,
    pub status: String,
    pub message: String,
}

/// Bounded in-memory log of recent dispatches, newest first
#[derive(Debug, Clone, Default)]
pub struct CommunicationLog {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl CommunicationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, channel: Channel, status: impl Into<String>, message: &str) {
        let mut entries = self.entries.write().await;
        entries.insert(
            0,
            LogEntry {
                time: Utc::now(),
                channel,
                status: status.into(),
                message: first_line(message),
            },
        );
        entries.truncate(LOG_CAPACITY);
    }

    pub async fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let entries = self.entries.read().await;
        entries.iter().take(limit).cloned().collect()
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_url_encodes_text() {
        let url = x_intent_url("6/1 Expected Bridge Lifts\n\nNo lifts expected today.");
        assert!(url.as_str().starts_with("https://twitter.com/intent/tweet?text="));
        // Raw newlines and spaces never appear in the query
        assert!(!url.as_str().contains('\n'));
        assert!(!url.query().unwrap().contains(' '));
    }

    #[tokio::test]
    async fn test_simulated_dispatch_reports_sign_count() {
        let vms = SimulatedVms::new(3);
        let receipt = vms.send("NEXT LIFT EXPECTED\n2:30 PM").await.unwrap();
        assert_eq!(receipt.signs_reached, 3);
        assert_eq!(receipt.channel, Channel::Vms);
        assert_eq!(receipt.message_preview, "NEXT LIFT EXPECTED");
    }

    #[tokio::test]
    async fn test_dispatch_fails_without_signs() {
        let vms = SimulatedVms::new(0);
        let err = vms.send("CHELSEA BRIDGE").await.unwrap_err();
        assert!(err.to_string().contains("unavailable"));
    }

    #[tokio::test]
    async fn test_log_is_newest_first_and_bounded() {
        let log = CommunicationLog::new();
        for i in 0..120 {
            log.record(Channel::Vms, "sent", &format!("message {}", i))
                .await;
        }

        let recent = log.recent(10).await;
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].message, "message 119");
        assert_eq!(log.recent(1000).await.len(), 100);
    }
}
