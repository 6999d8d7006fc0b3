//! Plain-text rendering of the views.

use weatherdash_core::{ChartKind, ChartView, DashboardView, DetailView, Route, SeriesPoint};

const CHART_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 12;

fn nav(current: &str) -> String {
    Route::nav()
        .iter()
        .map(|(label, path)| if *path == current { format!("[{label}]") } else { label.to_string() })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Join rendered lines, each terminated by a newline.
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn dashboard(view: &DashboardView) -> String {
    let filtered = view.filtered();
    let summary = view.summary();

    let mut lines = vec![format!("Weather Dashboard – {}", view.city), nav("/"), String::new()];

    if let Some(err) = &view.error {
        lines.push(format!("error: {err}"));
        lines.push(String::new());
    }

    lines.push(format!(
        "{} Matching Days   {:.2}°C Average Temp   {}°C Max Temp",
        summary.count, summary.mean_temp, summary.max_temp
    ));

    if !view.filter.is_empty() {
        let min = view.filter.min_temp.map(|t| t.to_string()).unwrap_or_default();
        lines.push(format!("Search: \"{}\"   Min Temp: {min}", view.filter.search));
    }

    lines.push(String::new());
    lines.push("Forecast Cards".to_string());
    if filtered.is_empty() {
        lines.push("  (no matching days)".to_string());
    }
    lines.extend(filtered.iter().map(|day| {
        let weekday = day.weekday().unwrap_or_default();
        format!(
            "  {weekday:<10} {:<LABEL_WIDTH$} {:<24} Temp: {}°C",
            day.datetime, day.weather.description, day.temp
        )
    }));

    let mut out = block(lines);

    let series = view.series();
    if !series.is_empty() {
        out.push_str("\nTemperature Trend\n");
        out.push_str(&line_chart(&series));
        out.push_str("\nTemperature Comparison\n");
        out.push_str(&bar_chart(&series));
    }

    out
}

pub fn chart(view: &ChartView) -> String {
    let current = match view.kind {
        ChartKind::Line => "/trend",
        ChartKind::Bar => "/comparison",
    };

    let mut out = block(vec![nav(current), String::new(), view.title.clone()]);

    match (&view.error, view.kind) {
        (Some(err), _) => out.push_str(&format!("error: {err}\n")),
        (None, ChartKind::Line) => out.push_str(&line_chart(&view.series)),
        (None, ChartKind::Bar) => out.push_str(&bar_chart(&view.series)),
    }
    out
}

pub fn detail(view: &DetailView) -> String {
    let day = &view.day;
    let heading = if view.hourly {
        "Temperature Throughout the Day (hourly)"
    } else {
        "Temperature Throughout the Day"
    };

    let mut out = block(vec![
        format!("Detail for {} ({})", day.datetime, view.city),
        day.weather.description.clone(),
        format!("Temperature: {}°C", day.temp),
        String::new(),
        heading.to_string(),
    ]);
    out.push_str(&line_chart(&view.series));
    out
}

pub fn missing_day(datetime: &str) -> String {
    format!(
        "Detail View\nNo forecast data available for {datetime}.\n\
         Please go back to the Dashboard (`weatherdash dashboard`) and select a forecast.\n"
    )
}

pub fn not_found(path: &str) -> String {
    format!(
        "Page Not Found\nThe page '{path}' does not exist. Go back to Home (`weatherdash open /`).\n"
    )
}

/// One row per point with a marker placed between the series min and max.
pub fn line_chart(series: &[SeriesPoint]) -> String {
    let min = series.iter().map(|p| p.temp).fold(f64::INFINITY, f64::min);
    let max = series.iter().map(|p| p.temp).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let rows = series.iter().map(|point| {
        let pos = if span <= f64::EPSILON {
            CHART_WIDTH / 2
        } else {
            (((point.temp - min) / span) * (CHART_WIDTH - 1) as f64).round() as usize
        };

        let row: String = (0..CHART_WIDTH)
            .map(|i| if i == pos.min(CHART_WIDTH - 1) { '*' } else { ' ' })
            .collect();
        format!("  {:<LABEL_WIDTH$} |{row}| {}°C", point.label, point.temp)
    });

    block(rows.collect())
}

/// Bars grow from zero: their length is the magnitude of the temperature
/// relative to the largest magnitude in the series.
pub fn bar_chart(series: &[SeriesPoint]) -> String {
    let peak = series.iter().map(|p| p.temp.abs()).fold(0.0, f64::max);

    let rows = series.iter().map(|point| {
        let len = if peak <= f64::EPSILON {
            0
        } else {
            ((point.temp.abs() / peak) * CHART_WIDTH as f64).round() as usize
        };
        let glyph = if point.temp < 0.0 { "░" } else { "█" };

        format!(
            "  {:<LABEL_WIDTH$} |{:<CHART_WIDTH$} {}°C",
            point.label,
            glyph.repeat(len),
            point.temp
        )
    });

    block(rows.collect())
}
