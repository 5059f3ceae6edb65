//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind a `WeatherProvider` trait
//! - The search session (current conditions + upcoming forecast)
//! - The date × time-of-day pivot used to tabulate the forecast
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod model;
pub mod pivot;
pub mod provider;
pub mod session;
pub mod window;

pub use config::Config;
pub use error::ProviderError;
pub use model::{CurrentConditions, ForecastSample, ForecastSeries, icon_url};
pub use pivot::ForecastGrid;
pub use provider::{WeatherProvider, provider_from_config};
pub use session::Session;
