//! Ambient-conditions contract
//!
//! The core only consumes a per-date weather reading; fetching is left to
//! a provider collaborator. Missing fields always degrade to fixed
//! defaults rather than failing a prediction.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default temperature when the provider has no reading (degrees C)
pub const DEFAULT_TEMP_C: f64 = 18.0;

/// Default precipitation when the provider has no reading (mm)
pub const DEFAULT_PRECIP_MM: f64 = 0.0;

/// Default wind speed when the provider has no reading (m/s)
pub const DEFAULT_WIND_MS: f64 = 4.0;

/// Provider output: any field may be missing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawAmbient {
    pub temp_c: Option<f64>,
    pub precip_mm: Option<f64>,
    pub wind_ms: Option<f64>,
}

impl RawAmbient {
    /// True when no field needed a default
    pub fn is_complete(&self) -> bool {
        self.temp_c.is_some() && self.precip_mm.is_some() && self.wind_ms.is_some()
    }

    /// Resolve missing fields to the fixed defaults
    pub fn or_defaults(self) -> AmbientReading {
        AmbientReading {
            temp_c: self.temp_c.unwrap_or(DEFAULT_TEMP_C),
            precip_mm: self.precip_mm.unwrap_or(DEFAULT_PRECIP_MM),
            wind_ms: self.wind_ms.unwrap_or(DEFAULT_WIND_MS),
        }
    }
}

/// Resolved ambient reading, supplied once per prediction date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientReading {
    pub temp_c: f64,
    pub precip_mm: f64,
    pub wind_ms: f64,
}

impl Default for AmbientReading {
    fn default() -> Self {
        RawAmbient::default().or_defaults()
    }
}

/// Collaborator supplying ambient conditions for a date
#[async_trait]
pub trait AmbientProvider: Send + Sync {
    async fn ambient_for(&self, date: NaiveDate) -> RawAmbient;
}

/// Fixed reading, used in tests and when no weather endpoint is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAmbient(pub RawAmbient);

#[async_trait]
impl AmbientProvider for FixedAmbient {
    async fn ambient_for(&self, _date: NaiveDate) -> RawAmbient {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reading_uses_defaults() {
        let reading = RawAmbient::default().or_defaults();
        assert_eq!(reading.temp_c, 18.0);
        assert_eq!(reading.precip_mm, 0.0);
        assert_eq!(reading.wind_ms, 4.0);
    }

    #[test]
    fn test_partial_reading_fills_missing_fields() {
        let raw = RawAmbient {
            temp_c: Some(3.5),
            precip_mm: None,
            wind_ms: Some(11.0),
        };
        assert!(!raw.is_complete());

        let reading = raw.or_defaults();
        assert_eq!(reading.temp_c, 3.5);
        assert_eq!(reading.precip_mm, 0.0);
        assert_eq!(reading.wind_ms, 11.0);
    }

    #[tokio::test]
    async fn test_fixed_provider_returns_reading() {
        let raw = RawAmbient {
            temp_c: Some(21.0),
            precip_mm: Some(0.2),
            wind_ms: Some(6.0),
        };
        let provider = FixedAmbient(raw);
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(provider.ambient_for(date).await.temp_c, Some(21.0));
    }
}
