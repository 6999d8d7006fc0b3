//! Single-day detail: the selected day plus a temperature-over-the-day series.

use crate::{
    model::{ForecastDay, HourlyPoint, SeriesPoint},
    provider::{ForecastSource, HOURLY_WINDOW},
};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub city: String,
    pub day: ForecastDay,
    pub series: Vec<SeriesPoint>,
    /// Whether `series` came from the hourly endpoint.
    pub hourly: bool,
}

impl DetailView {
    /// Build the view from an already fetched day. Uses the hourly points for
    /// that day when there are any, the coarse three-point series otherwise.
    pub fn build(day: ForecastDay, city: impl Into<String>, hourly: Option<&[HourlyPoint]>) -> Self {
        let hours = hourly.map(|h| hours_for_day(h, &day.datetime)).unwrap_or_default();

        let (series, hourly) = if hours.is_empty() {
            (coarse_series(&day), false)
        } else {
            (hours, true)
        };

        Self { city: city.into(), day, series, hourly }
    }

    /// Build the view, fetching the hourly breakdown first when asked to.
    /// The day is already known, so a failed hourly fetch only costs detail.
    pub async fn load(
        source: &dyn ForecastSource,
        day: ForecastDay,
        city: &str,
        with_hourly: bool,
    ) -> Self {
        if !with_hourly {
            return Self::build(day, city, None);
        }

        match source.hourly(city, HOURLY_WINDOW).await {
            Ok(hours) => Self::build(day, city, Some(&hours)),
            Err(err) => {
                tracing::warn!(city, error = %err, "hourly forecast unavailable");
                Self::build(day, city, None)
            }
        }
    }
}

/// Hours whose local timestamp falls on `datetime`, labelled `HH:MM`.
pub fn hours_for_day(hourly: &[HourlyPoint], datetime: &str) -> Vec<SeriesPoint> {
    hourly
        .iter()
        .filter(|h| h.timestamp_local.starts_with(datetime))
        .map(|h| {
            let label = h.timestamp_local.get(11..16).unwrap_or(&h.timestamp_local);
            SeriesPoint::new(label, h.temp)
        })
        .collect()
}

fn coarse_series(day: &ForecastDay) -> Vec<SeriesPoint> {
    vec![
        SeriesPoint::new("Morning", day.temp - 2.0),
        SeriesPoint::new("Noon", day.temp),
        SeriesPoint::new("Evening", day.temp + 1.0),
    ]
}

/// Find the day for a `/detail/<datetime>` lookup.
pub fn find_day<'a>(days: &'a [ForecastDay], datetime: &str) -> Option<&'a ForecastDay> {
    days.iter().find(|d| d.datetime == datetime)
}
