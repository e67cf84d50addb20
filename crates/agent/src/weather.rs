//! Open-Meteo weather client
//!
//! Past dates come from the ERA5 archive, today and the near future from
//! the forecast endpoint. Any failure degrades to an empty reading so
//! the predictor falls back to its seasonal defaults.

use anyhow::Result;
use async_trait::async_trait;
use bridge_lib::weather::{AmbientProvider, RawAmbient};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;
use url::Url;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/era5";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

/// Wind field is sometimes missing from archive responses
const DEFAULT_WIND_MS: f64 = 5.0;

pub struct OpenMeteoClient {
    client: reqwest::Client,
    latitude: f64,
    longitude: f64,
    timezone_offset_hours: i64,
    max_forecast_days: i64,
}

/// Daily block of an Open-Meteo response
#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m_max: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailyBlock,
}

impl OpenMeteoClient {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timezone_offset_hours: i64,
        max_forecast_days: i64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            latitude,
            longitude,
            timezone_offset_hours,
            max_forecast_days,
        })
    }

    fn local_today(&self) -> NaiveDate {
        (Utc::now() + Duration::hours(self.timezone_offset_hours)).date_naive()
    }

    /// Endpoint covering a date: archive for the past, forecast otherwise
    fn endpoint_for(date: NaiveDate, today: NaiveDate) -> &'static str {
        if date < today {
            ARCHIVE_URL
        } else {
            FORECAST_URL
        }
    }

    /// Build the daily-aggregate request URL for one date
    fn build_url(&self, base: &str, date: NaiveDate) -> Result<Url> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let url = Url::parse_with_params(
            base,
            &[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "America/New_York".to_string()),
                ("start_date", date_str.clone()),
                ("end_date", date_str),
            ],
        )?;
        Ok(url)
    }

    async fn fetch(&self, date: NaiveDate) -> Result<RawAmbient> {
        let today = self.local_today();
        if date > today + Duration::days(self.max_forecast_days) {
            // Beyond the forecast horizon there is nothing to ask for
            return Ok(RawAmbient::default());
        }

        let url = self.build_url(Self::endpoint_for(date, today), date)?;
        let response: DailyResponse = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self::reading_from(&response.daily))
    }

    /// Reduce the single-day daily arrays into one ambient reading
    fn reading_from(daily: &DailyBlock) -> RawAmbient {
        let first = |values: &[Option<f64>]| values.first().copied().flatten();

        let temp_c = match (
            first(&daily.temperature_2m_max),
            first(&daily.temperature_2m_min),
        ) {
            (Some(max), Some(min)) => Some((max + min) / 2.0),
            _ => None,
        };

        RawAmbient {
            temp_c,
            precip_mm: Some(first(&daily.precipitation_sum).unwrap_or(0.0)),
            wind_ms: Some(first(&daily.wind_speed_10m_max).unwrap_or(DEFAULT_WIND_MS)),
        }
    }
}

#[async_trait]
impl AmbientProvider for OpenMeteoClient {
    async fn ambient_for(&self, date: NaiveDate) -> RawAmbient {
        match self.fetch(date).await {
            Ok(reading) => reading,
            Err(err) => {
                warn!(date = %date, error = %err, "Weather fetch failed");
                RawAmbient::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_endpoint_selection() {
        let today = date(2025, 6, 15);
        assert_eq!(
            OpenMeteoClient::endpoint_for(date(2025, 6, 10), today),
            ARCHIVE_URL
        );
        assert_eq!(
            OpenMeteoClient::endpoint_for(today, today),
            FORECAST_URL
        );
        assert_eq!(
            OpenMeteoClient::endpoint_for(date(2025, 6, 20), today),
            FORECAST_URL
        );
    }

    #[test]
    fn test_build_url_parameters() {
        let client = OpenMeteoClient::new(42.3601, -71.0589, -5, 16).unwrap();
        let url = client.build_url(FORECAST_URL, date(2025, 6, 15)).unwrap();
        let query = url.query().unwrap();

        assert!(url.as_str().starts_with(FORECAST_URL));
        assert!(query.contains("latitude=42.3601"));
        assert!(query.contains("longitude=-71.0589"));
        assert!(query.contains("start_date=2025-06-15"));
        assert!(query.contains("end_date=2025-06-15"));
        assert!(query.contains("temperature_2m_max"));
        assert!(query.contains("wind_speed_10m_max"));
    }

    #[test]
    fn test_reading_averages_temperature() {
        let daily = DailyBlock {
            temperature_2m_max: vec![Some(24.0)],
            temperature_2m_min: vec![Some(12.0)],
            precipitation_sum: vec![Some(1.5)],
            wind_speed_10m_max: vec![Some(6.0)],
        };
        let reading = OpenMeteoClient::reading_from(&daily);
        assert_eq!(reading.temp_c, Some(18.0));
        assert_eq!(reading.precip_mm, Some(1.5));
        assert_eq!(reading.wind_ms, Some(6.0));
    }

    #[test]
    fn test_reading_with_missing_fields() {
        let daily = DailyBlock {
            temperature_2m_max: vec![Some(24.0)],
            temperature_2m_min: vec![],
            precipitation_sum: vec![None],
            wind_speed_10m_max: vec![],
        };
        let reading = OpenMeteoClient::reading_from(&daily);

        // Temperature needs both bounds; precip and wind take in-band defaults
        assert_eq!(reading.temp_c, None);
        assert_eq!(reading.precip_mm, Some(0.0));
        assert_eq!(reading.wind_ms, Some(DEFAULT_WIND_MS));
    }
}
