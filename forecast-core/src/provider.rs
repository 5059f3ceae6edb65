use crate::{
    Config,
    error::ProviderError,
    model::{CurrentConditions, ForecastSeries},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two lookups a weather service offers for a city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`.
    async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError>;

    /// Raw forecast series for `city`, unfiltered, in service order.
    async fn forecast(&self, city: &str) -> Result<ForecastSeries, ProviderError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not rejected here: requests go out without one and the
/// service answers with an authorization error.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let api_key = match config.api_key() {
        Some(key) => key.to_owned(),
        None => {
            tracing::warn!(
                "No OpenWeather API key configured; requests will be rejected by the service. \
                 Hint: run `forecast configure` or set OPENWEATHER_API_KEY."
            );
            String::new()
        }
    };

    Box::new(OpenWeatherProvider::new(api_key).with_base_url(config.base_url()))
}
