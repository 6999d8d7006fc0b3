//! Core library for the `weatherdash` CLI.
//!
//! This crate defines:
//! - Configuration and the persisted city selection
//! - The forecast source abstraction and its Weatherbit client
//! - Filtering and summary of a fetched forecast
//! - Routes and the view models rendered by the CLI
//!
//! It is used by `weatherdash-cli`, but can also be reused by other frontends.

pub mod city;
pub mod config;
pub mod detail;
pub mod filter;
pub mod model;
pub mod provider;
pub mod route;
pub mod view;

pub use city::{CITIES, DEFAULT_CITY, allowed_city};
pub use config::Config;
pub use detail::DetailView;
pub use filter::{FilterState, filter_forecast, summarize};
pub use model::{ForecastDay, HourlyPoint, SeriesPoint, Summary};
pub use provider::{FetchError, ForecastSource, source_from_config};
pub use route::Route;
pub use view::{ChartKind, ChartView, DashboardView};
