//! The search action: two independent lookups folded into a fresh session record.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    model::{CurrentConditions, ForecastSeries},
    pivot::ForecastGrid,
    provider::WeatherProvider,
    window,
};

/// Result of one search. Never mutated; each search yields a new record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub city: String,
    pub current: Option<CurrentConditions>,
    pub forecast: ForecastSeries,
}

impl Session {
    /// Look up current conditions and the upcoming forecast for `city`.
    ///
    /// Both lookups run concurrently. A failure on either side is logged and
    /// leaves that part of the session empty; it never affects the other side
    /// and is never returned to the caller.
    pub async fn search(provider: &dyn WeatherProvider, city: &str) -> Self {
        Self::search_with(provider, city, window::retain_upcoming).await
    }

    /// [`Session::search`] with an explicit forecast filter.
    pub async fn search_with<F>(provider: &dyn WeatherProvider, city: &str, filter: F) -> Self
    where
        F: FnOnce(ForecastSeries) -> ForecastSeries,
    {
        let (current, forecast) = tokio::join!(provider.current(city), provider.forecast(city));

        let current = current
            .inspect_err(|err| error!(city, error = %err, "Error fetching weather data"))
            .ok();

        let forecast = match forecast {
            Ok(series) => {
                let total = series.len();
                let kept = filter(series);
                info!(city, total, kept = kept.len(), "Fetched forecast");
                kept
            }
            Err(err) => {
                error!(city, error = %err, "Error fetching forecast data");
                ForecastSeries::new()
            }
        };

        Self {
            city: city.to_string(),
            current,
            forecast,
        }
    }

    /// Grid view over the forecast, rebuilt on every call.
    pub fn grid(&self) -> ForecastGrid<'_> {
        ForecastGrid::build(&self.forecast)
    }

    pub fn has_results(&self) -> bool {
        self.current.is_some() || !self.forecast.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ProviderError, model::ForecastSample};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Debug, Default)]
    struct FakeProvider {
        fail_current: bool,
        fail_forecast: bool,
    }

    fn not_found(endpoint: &'static str) -> ProviderError {
        ProviderError::Status {
            endpoint,
            status: StatusCode::NOT_FOUND,
            body: r#"{"cod":"404","message":"city not found"}"#.to_string(),
        }
    }

    fn sample(ts: &str, temp: f64) -> ForecastSample {
        ForecastSample {
            timestamp: ts.to_string(),
            temperature_c: temp,
            description: "few clouds".to_string(),
            icon_id: "02d".to_string(),
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
            if self.fail_current {
                return Err(not_found("current weather"));
            }
            Ok(CurrentConditions {
                temperature_c: if city == "Oslo" { 4.0 } else { 30.0 },
                description: "scattered clouds".to_string(),
                humidity_pct: 70,
                wind_speed_mps: 2.5,
                icon_id: "03d".to_string(),
            })
        }

        async fn forecast(&self, _city: &str) -> Result<ForecastSeries, ProviderError> {
            if self.fail_forecast {
                return Err(not_found("forecast"));
            }
            Ok(vec![
                sample("2024-06-10 21:00:00", 19.0),
                sample("2024-06-11 09:00:00", 20.0),
                sample("2024-06-11 12:00:00", 23.0),
                sample("2024-06-12 09:00:00", 18.0),
                sample("2024-06-15 09:00:00", 17.0),
            ])
        }
    }

    fn tenth(series: ForecastSeries) -> ForecastSeries {
        window::retain_window(series, 10)
    }

    #[tokio::test]
    async fn search_populates_both_parts_and_filters_window() {
        let provider = FakeProvider::default();

        let session = Session::search_with(&provider, "Singapore", tenth).await;

        assert_eq!(session.city, "Singapore");
        assert_eq!(session.current.as_ref().map(|c| c.temperature_c), Some(30.0));
        let stamps: Vec<_> = session.forecast.iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(
            stamps,
            vec!["2024-06-11 09:00:00", "2024-06-11 12:00:00", "2024-06-12 09:00:00"]
        );
        assert!(session.has_results());
    }

    #[tokio::test]
    async fn failed_current_lookup_still_yields_forecast() {
        let provider = FakeProvider { fail_current: true, ..Default::default() };

        let session = Session::search_with(&provider, "Atlantis", tenth).await;

        assert!(session.current.is_none());
        assert_eq!(session.forecast.len(), 3);
        let grid = session.grid();
        assert_eq!(grid.times(), &["09:00:00", "12:00:00"]);
        assert!(grid.cell("12:00:00", "2024-06-12").is_none());
    }

    #[tokio::test]
    async fn failed_forecast_lookup_still_yields_current() {
        let provider = FakeProvider { fail_forecast: true, ..Default::default() };

        let session = Session::search_with(&provider, "Singapore", tenth).await;

        assert!(session.current.is_some());
        assert!(session.forecast.is_empty());
        assert!(session.grid().is_empty());
    }

    #[tokio::test]
    async fn both_lookups_failing_gives_empty_session() {
        let provider = FakeProvider { fail_current: true, fail_forecast: true };

        let session = Session::search_with(&provider, "Nowhere", tenth).await;

        assert_eq!(session.city, "Nowhere");
        assert!(!session.has_results());
    }

    #[tokio::test]
    async fn new_search_replaces_previous_session() {
        let ok = FakeProvider::default();
        let failing = FakeProvider { fail_current: true, fail_forecast: true };

        let first = Session::search_with(&ok, "Oslo", tenth).await;
        assert_eq!(first.current.as_ref().map(|c| c.temperature_c), Some(4.0));

        let second = Session::search_with(&failing, "Bergen", tenth).await;

        assert_eq!(second.city, "Bergen");
        assert!(second.current.is_none());
        assert!(second.forecast.is_empty());
    }

    #[derive(Debug)]
    struct SlowProvider {
        delay: Duration,
    }

    #[async_trait]
    impl WeatherProvider for SlowProvider {
        async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
            tokio::time::sleep(self.delay).await;
            FakeProvider::default().current(city).await
        }

        async fn forecast(&self, city: &str) -> Result<ForecastSeries, ProviderError> {
            tokio::time::sleep(self.delay).await;
            FakeProvider::default().forecast(city).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_run_concurrently() {
        let provider = SlowProvider { delay: Duration::from_secs(10) };

        let started = Instant::now();
        let session = Session::search_with(&provider, "Singapore", tenth).await;
        let elapsed = started.elapsed();

        assert!(session.current.is_some());
        assert_eq!(session.forecast.len(), 3);
        assert!(elapsed >= Duration::from_secs(10));
        assert!(elapsed < Duration::from_secs(20), "lookups ran back to back: {elapsed:?}");
    }
}
