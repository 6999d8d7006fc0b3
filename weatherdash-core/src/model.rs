use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily forecast record as returned by the daily endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date, `YYYY-MM-DD`.
    pub datetime: String,
    pub temp: f64,
    pub weather: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub description: String,
}

impl ForecastDay {
    pub fn new(datetime: impl Into<String>, temp: f64, description: impl Into<String>) -> Self {
        Self {
            datetime: datetime.into(),
            temp,
            weather: Conditions { description: description.into() },
        }
    }

    /// English weekday name of the forecast date, e.g. "Wednesday".
    pub fn weekday(&self) -> Option<String> {
        NaiveDate::parse_from_str(&self.datetime, "%Y-%m-%d")
            .ok()
            .map(|date| date.format("%A").to_string())
    }
}

/// One hour of the hourly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    /// Local timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp_local: String,
    pub temp: f64,
}

/// A labelled temperature, the unit every chart is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub temp: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, temp: f64) -> Self {
        Self { label: label.into(), temp }
    }
}

/// Aggregate over the currently filtered forecast.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean_temp: f64,
    pub max_temp: f64,
}

/// Daily series keyed by date, used by the trend and comparison charts.
pub fn daily_series(days: &[ForecastDay]) -> Vec<SeriesPoint> {
    days.iter().map(|d| SeriesPoint::new(d.datetime.clone(), d.temp)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_from_date() {
        let day = ForecastDay::new("2024-05-01", 18.5, "Few clouds");
        assert_eq!(day.weekday().as_deref(), Some("Wednesday"));
    }

    #[test]
    fn weekday_is_none_for_garbage_date() {
        let day = ForecastDay::new("tomorrow", 18.5, "Few clouds");
        assert!(day.weekday().is_none());
    }

    #[test]
    fn deserializes_api_record_ignoring_extra_fields() {
        let json = r#"{
            "datetime": "2024-05-02",
            "temp": 21.3,
            "max_temp": 25.0,
            "weather": { "icon": "c02d", "code": 802, "description": "Scattered clouds" }
        }"#;

        let day: ForecastDay = serde_json::from_str(json).expect("valid record");
        assert_eq!(day, ForecastDay::new("2024-05-02", 21.3, "Scattered clouds"));
    }
}
