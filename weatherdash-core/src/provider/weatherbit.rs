use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::model::{ForecastDay, HourlyPoint};

use super::{FetchError, ForecastSource};

const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0";

/// Client for the Weatherbit v2.0 forecast endpoints.
#[derive(Debug, Clone)]
pub struct WeatherbitClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherbitClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        extra: &[(&str, String)],
    ) -> Result<Vec<T>, FetchError> {
        let url = format!("{}/forecast/{endpoint}", self.base_url);

        let mut query = vec![("city", city.to_string()), ("key", self.api_key.clone())];
        query.extend(extra.iter().map(|(k, v)| (*k, v.clone())));

        tracing::debug!(%url, city, "requesting {endpoint} forecast");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { city: city.to_string(), source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { city: city.to_string(), source })?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                body = %truncate_body(&body),
                "Weatherbit {endpoint} request failed"
            );
            return Err(FetchError::Status { city: city.to_string(), status: status.as_u16() });
        }

        // Unknown cities come back as 204 with no body.
        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Err(FetchError::Empty { city: city.to_string() });
        }

        let parsed: WbResponse<T> = serde_json::from_str(&body)
            .map_err(|source| FetchError::Decode { city: city.to_string(), source })?;

        match parsed.data {
            Some(data) if !data.is_empty() => Ok(data),
            _ => Err(FetchError::Empty { city: city.to_string() }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WbResponse<T> {
    data: Option<Vec<T>>,
}

#[async_trait]
impl ForecastSource for WeatherbitClient {
    async fn daily(&self, city: &str) -> Result<Vec<ForecastDay>, FetchError> {
        self.fetch("daily", city, &[]).await
    }

    async fn hourly(&self, city: &str, hours: u32) -> Result<Vec<HourlyPoint>, FetchError> {
        self.fetch("hourly", city, &[("hours", hours.to_string())]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
