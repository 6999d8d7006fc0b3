//! View models. Each view fetches what it needs once and keeps at most one
//! user-facing error; when there is an error the forecast is empty.

use crate::{
    filter::{FilterState, filter_forecast, summarize},
    model::{ForecastDay, SeriesPoint, Summary, daily_series},
    provider::ForecastSource,
};

async fn load_daily(source: &dyn ForecastSource, city: &str) -> (Vec<ForecastDay>, Option<String>) {
    match source.daily(city).await {
        Ok(days) => {
            tracing::debug!(city, days = days.len(), "forecast loaded");
            (days, None)
        }
        Err(err) => {
            tracing::warn!(city = err.city(), error = ?err, "forecast fetch failed");
            (Vec::new(), Some(err.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub city: String,
    pub forecast: Vec<ForecastDay>,
    pub filter: FilterState,
    pub error: Option<String>,
}

impl DashboardView {
    pub async fn load(source: &dyn ForecastSource, city: &str, filter: FilterState) -> Self {
        let (forecast, error) = load_daily(source, city).await;
        Self { city: city.to_string(), forecast, filter, error }
    }

    pub fn filtered(&self) -> Vec<&ForecastDay> {
        filter_forecast(&self.forecast, &self.filter)
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.filtered())
    }

    /// Chart series over the whole forecast; filters only narrow the cards.
    pub fn series(&self) -> Vec<SeriesPoint> {
        daily_series(&self.forecast)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// A standalone chart page (trend or comparison).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub title: String,
    pub city: String,
    pub series: Vec<SeriesPoint>,
    pub error: Option<String>,
}

impl ChartView {
    pub async fn trend(source: &dyn ForecastSource, city: &str) -> Self {
        Self::load(source, city, ChartKind::Line, format!("7-Day Trend for {city}")).await
    }

    pub async fn comparison(source: &dyn ForecastSource, city: &str) -> Self {
        Self::load(source, city, ChartKind::Bar, format!("Temperature Comparison for {city}")).await
    }

    async fn load(source: &dyn ForecastSource, city: &str, kind: ChartKind, title: String) -> Self {
        let (forecast, error) = load_daily(source, city).await;
        Self { kind, title, city: city.to_string(), series: daily_series(&forecast), error }
    }
}
