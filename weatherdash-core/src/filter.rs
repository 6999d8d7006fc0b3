//! Search / threshold filtering of a fetched forecast and the summary
//! computed over whatever survives.

use anyhow::{Context, Result};

use crate::model::{ForecastDay, Summary};

/// User-entered filters for the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Matched case-insensitively against date, description and weekday.
    pub search: String,
    /// `None` means no threshold.
    pub min_temp: Option<f64>,
}

impl FilterState {
    pub fn new(search: impl Into<String>, min_temp: Option<f64>) -> Self {
        Self { search: search.into(), min_temp }
    }

    /// Parse a min-temperature field; blank input clears the threshold.
    pub fn parse_min_temp(text: &str) -> Result<Option<f64>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let value = text
            .parse::<f64>()
            .with_context(|| format!("Minimum temperature '{text}' is not a number"))?;

        Ok(Some(value))
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.min_temp.is_none()
    }

    fn matches_text(&self, day: &ForecastDay) -> bool {
        let query = self.search.to_lowercase();
        if query.is_empty() {
            return true;
        }

        day.datetime.to_lowercase().contains(&query)
            || day.weather.description.to_lowercase().contains(&query)
            || day.weekday().is_some_and(|w| w.to_lowercase().contains(&query))
    }

    fn matches_threshold(&self, day: &ForecastDay) -> bool {
        self.min_temp.is_none_or(|min| day.temp >= min)
    }
}

/// Keep the days passing both predicates, in their original order.
pub fn filter_forecast<'a>(days: &'a [ForecastDay], filter: &FilterState) -> Vec<&'a ForecastDay> {
    days.iter()
        .filter(|d| filter.matches_text(d))
        .filter(|d| filter.matches_threshold(d))
        .collect()
}

/// Count, mean and max of `days`; all zero when `days` is empty.
pub fn summarize(days: &[&ForecastDay]) -> Summary {
    if days.is_empty() {
        return Summary::default();
    }

    let count = days.len();
    let total: f64 = days.iter().map(|d| d.temp).sum();
    let max_temp = days.iter().map(|d| d.temp).fold(f64::NEG_INFINITY, f64::max);

    Summary { count, mean_temp: total / count as f64, max_temp }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week() -> Vec<ForecastDay> {
        vec![
            ForecastDay::new("2024-05-01", 18.0, "Few clouds"),
            ForecastDay::new("2024-05-02", 21.5, "Light rain"),
            ForecastDay::new("2024-05-03", 25.0, "Clear Sky"),
            ForecastDay::new("2024-05-04", 12.0, "Heavy rain"),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let days = week();
        let out = filter_forecast(&days, &FilterState::default());

        assert_eq!(out.len(), days.len());
        assert!(out.iter().zip(&days).all(|(a, b)| *a == b));
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let days = week();
        let out = filter_forecast(&days, &FilterState::new("RAIN", None));

        let dates: Vec<_> = out.iter().map(|d| d.datetime.as_str()).collect();
        assert_eq!(dates, ["2024-05-02", "2024-05-04"]);
    }

    #[test]
    fn search_matches_weekday_and_date() {
        let days = week();

        let by_weekday = filter_forecast(&days, &FilterState::new("friday", None));
        assert_eq!(by_weekday.len(), 1);
        assert_eq!(by_weekday[0].datetime, "2024-05-03");

        let by_date = filter_forecast(&days, &FilterState::new("05-04", None));
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].datetime, "2024-05-04");
    }

    #[test]
    fn threshold_holds_for_every_result() {
        let days = week();

        for min in [-5.0, 12.0, 18.0, 21.5, 22.0, 30.0] {
            let out = filter_forecast(&days, &FilterState::new("", Some(min)));
            assert!(out.iter().all(|d| d.temp >= min), "threshold {min}");
        }
    }

    #[test]
    fn predicates_combine() {
        let days = week();
        let out = filter_forecast(&days, &FilterState::new("rain", Some(15.0)));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].datetime, "2024-05-02");
    }

    #[test]
    fn summary_of_empty_set_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary { count: 0, mean_temp: 0.0, max_temp: 0.0 });
    }

    #[test]
    fn summary_counts_mean_and_max() {
        let days = week();
        let all = filter_forecast(&days, &FilterState::default());
        let summary = summarize(&all);

        assert_eq!(summary.count, 4);
        assert!((summary.mean_temp - 19.125).abs() < 1e-9);
        assert_eq!(summary.max_temp, 25.0);
    }

    #[test]
    fn summary_max_handles_all_negative_temps() {
        let days = vec![
            ForecastDay::new("2024-01-01", -8.0, "Snow"),
            ForecastDay::new("2024-01-02", -3.5, "Snow"),
        ];
        let all = filter_forecast(&days, &FilterState::default());

        assert_eq!(summarize(&all).max_temp, -3.5);
    }

    #[test]
    fn parse_min_temp_accepts_blank_and_numbers() {
        assert_eq!(FilterState::parse_min_temp("  ").unwrap(), None);
        assert_eq!(FilterState::parse_min_temp("-2.5").unwrap(), Some(-2.5));

        let err = FilterState::parse_min_temp("warm").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }
}
