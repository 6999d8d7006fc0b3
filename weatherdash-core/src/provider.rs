use crate::{
    Config,
    model::{ForecastDay, HourlyPoint},
    provider::weatherbit::WeatherbitClient,
};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod weatherbit;

/// Hours requested for the detail breakdown.
pub const HOURLY_WINDOW: u32 = 24;

/// Why a forecast could not be shown. Each variant renders as the single
/// message the user sees.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Could not fetch weather for {city}")]
    Transport {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not fetch weather for {city}")]
    Status { city: String, status: u16 },

    #[error("Could not fetch weather for {city}")]
    Decode {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No data available for {city}")]
    Empty { city: String },
}

impl FetchError {
    pub fn city(&self) -> &str {
        match self {
            FetchError::Transport { city, .. }
            | FetchError::Status { city, .. }
            | FetchError::Decode { city, .. }
            | FetchError::Empty { city } => city,
        }
    }
}

#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Multi-day forecast for `city`, oldest day first.
    async fn daily(&self, city: &str) -> Result<Vec<ForecastDay>, FetchError>;

    /// The next `hours` hours for `city`.
    async fn hourly(&self, city: &str, hours: u32) -> Result<Vec<HourlyPoint>, FetchError>;
}

/// Construct the forecast source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    build_source(config.api_key(), config.base_url.as_deref())
}

fn build_source(
    api_key: Option<String>,
    base_url: Option<&str>,
) -> anyhow::Result<Box<dyn ForecastSource>> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No Weatherbit API key configured.\n\
             Hint: run `weatherdash configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    let client = match base_url {
        Some(url) => WeatherbitClient::with_base_url(api_key, url),
        None => WeatherbitClient::new(api_key),
    };

    Ok(Box::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_source_errors_when_missing_api_key() {
        let err = build_source(None, None).unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("No Weatherbit API key configured"));
        assert!(msg.contains("Hint: run `weatherdash configure`"));
    }

    #[test]
    fn source_from_config_works_when_key_stored() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        assert!(source_from_config(&cfg).is_ok());
    }

    #[test]
    fn every_failure_reads_as_one_message() {
        let status = FetchError::Status { city: "Paris".into(), status: 500 };
        let empty = FetchError::Empty { city: "Paris".into() };

        assert_eq!(status.to_string(), "Could not fetch weather for Paris");
        assert_eq!(empty.to_string(), "No data available for Paris");
        assert_eq!(empty.city(), "Paris");
    }
}
