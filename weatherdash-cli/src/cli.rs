use std::io::IsTerminal;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use weatherdash_core::{
    CITIES, ChartView, Config, DashboardView, DetailView, FilterState, ForecastSource, Route,
    allowed_city, detail::find_day, source_from_config,
};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Weatherbit API key.
    Configure,

    /// Show or change the selected city.
    City {
        /// One of the supported cities; prompts when omitted on a terminal.
        name: Option<String>,
    },

    /// Summary, forecast cards and charts for the selected city.
    Dashboard {
        /// Switch to this city (must be a supported city) and remember it.
        #[arg(long)]
        city: Option<String>,

        /// Match against date, description or weekday.
        #[arg(long)]
        search: Option<String>,

        /// Only show days at or above this temperature (°C).
        #[arg(long, allow_negative_numbers = true)]
        min_temp: Option<f64>,
    },

    /// Detail for one forecast day.
    Detail {
        /// Forecast date, e.g. 2024-05-01.
        datetime: String,

        #[arg(long)]
        city: Option<String>,

        /// Fetch the hourly breakdown for the day.
        #[arg(long)]
        hourly: bool,
    },

    /// Line chart of the daily forecast.
    Trend {
        /// Any city name; it is remembered.
        #[arg(long)]
        city: Option<String>,
    },

    /// Bar chart of the daily forecast.
    Comparison {
        #[arg(long)]
        city: Option<String>,
    },

    /// Open a view by path, e.g. `/trend` or `/detail/2024-05-01`.
    Open { path: String },

    /// Browse the dashboard with prompts.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;

        match self.command {
            Command::Configure => configure(&mut config)?,
            Command::City { name } => choose_city(&mut config, name)?,
            Command::Dashboard { city, search, min_temp } => {
                if let Some(city) = city {
                    remember_city(&mut config, allowed_city(&city)?)?;
                }
                let source = source_from_config(&config)?;
                let filter = FilterState::new(search.unwrap_or_default(), min_temp);
                show_dashboard(source.as_ref(), config.selected_city(), filter).await;
            }
            Command::Detail { datetime, city, hourly } => {
                let source = source_from_config(&config)?;
                let city = city.as_deref().map(str::trim).filter(|c| !c.is_empty());
                let city = city.unwrap_or(config.selected_city());
                show_detail(source.as_ref(), city, &datetime, hourly).await;
            }
            Command::Trend { city } => {
                if let Some(city) = city {
                    remember_city(&mut config, &city)?;
                }
                let source = source_from_config(&config)?;
                let view = ChartView::trend(source.as_ref(), config.selected_city()).await;
                print!("{}", render::chart(&view));
            }
            Command::Comparison { city } => {
                if let Some(city) = city {
                    remember_city(&mut config, &city)?;
                }
                let source = source_from_config(&config)?;
                let view = ChartView::comparison(source.as_ref(), config.selected_city()).await;
                print!("{}", render::chart(&view));
            }
            Command::Open { path } => open(&config, &path).await?,
            Command::Interactive => {
                let source = source_from_config(&config)?;
                interactive::run(&mut config, source.as_ref()).await?;
            }
        }

        Ok(())
    }
}

/// Store `city` as the selection and persist it.
pub fn remember_city(config: &mut Config, city: &str) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        anyhow::bail!("City name must not be empty.");
    }

    config.select_city(city);
    config.save().context("Failed to remember the selected city")?;
    tracing::info!(city, "selected city");
    Ok(())
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let key = Password::new("Weatherbit API key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherbit.io/account/create")
        .prompt()?;

    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

fn choose_city(config: &mut Config, name: Option<String>) -> anyhow::Result<()> {
    let city = match name {
        Some(name) => allowed_city(&name)?,
        None if std::io::stdin().is_terminal() => {
            let start = CITIES.iter().position(|c| *c == config.selected_city()).unwrap_or(0);
            Select::new("City:", CITIES.to_vec()).with_starting_cursor(start).prompt()?
        }
        None => {
            println!("{}", config.selected_city());
            return Ok(());
        }
    };

    remember_city(config, city)?;
    println!("Selected city: {city}");
    Ok(())
}

async fn show_dashboard(source: &dyn ForecastSource, city: &str, filter: FilterState) {
    let view = DashboardView::load(source, city, filter).await;
    print!("{}", render::dashboard(&view));
}

async fn show_detail(source: &dyn ForecastSource, city: &str, datetime: &str, hourly: bool) {
    let dashboard = DashboardView::load(source, city, FilterState::default()).await;

    if let Some(err) = &dashboard.error {
        println!("error: {err}");
        return;
    }

    match find_day(&dashboard.forecast, datetime) {
        Some(day) => {
            let view = DetailView::load(source, day.clone(), city, hourly).await;
            print!("{}", render::detail(&view));
        }
        None => print!("{}", render::missing_day(datetime)),
    }
}

async fn open(config: &Config, path: &str) -> anyhow::Result<()> {
    let route = Route::parse(path);
    tracing::debug!(%route, "opening");

    if let Route::NotFound(path) = &route {
        print!("{}", render::not_found(path));
        return Ok(());
    }

    let source = source_from_config(config)?;
    let city = config.selected_city();

    match route {
        Route::Dashboard => show_dashboard(source.as_ref(), city, FilterState::default()).await,
        Route::Detail { datetime } => show_detail(source.as_ref(), city, &datetime, false).await,
        Route::Trend => print!("{}", render::chart(&ChartView::trend(source.as_ref(), city).await)),
        Route::Comparison => {
            print!("{}", render::chart(&ChartView::comparison(source.as_ref(), city).await))
        }
        Route::NotFound(_) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dashboard_filters() {
        let cli = Cli::try_parse_from([
            "weatherdash",
            "dashboard",
            "--search",
            "rain",
            "--min-temp",
            "-3.5",
        ])
        .expect("valid args");

        match cli.command {
            Command::Dashboard { city, search, min_temp } => {
                assert!(city.is_none());
                assert_eq!(search.as_deref(), Some("rain"));
                assert_eq!(min_temp, Some(-3.5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_min_temp() {
        let res = Cli::try_parse_from(["weatherdash", "dashboard", "--min-temp", "warm"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_detail_with_hourly() {
        let cli = Cli::try_parse_from(["weatherdash", "detail", "2024-05-01", "--hourly"])
            .expect("valid args");

        assert!(matches!(
            cli.command,
            Command::Detail { ref datetime, hourly: true, .. } if datetime == "2024-05-01"
        ));
    }

    #[test]
    fn blank_city_is_not_remembered() {
        let mut config = Config::default();

        let err = remember_city(&mut config, "   ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert!(config.city.is_none());
        assert_eq!(config.selected_city(), weatherdash_core::DEFAULT_CITY);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
