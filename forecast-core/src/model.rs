use serde::{Deserialize, Serialize};

/// Default host serving OpenWeather condition icons.
pub const DEFAULT_ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Current conditions for a city, as returned by one lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub description: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub icon_id: String,
}

/// One forecast reading. `timestamp` keeps the service's `"YYYY-MM-DD HH:MM:SS"` text verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon_id: String,
}

/// Ordered forecast samples for one query.
pub type ForecastSeries = Vec<ForecastSample>;

impl ForecastSample {
    /// Date part of the timestamp (everything before the first space).
    pub fn date(&self) -> &str {
        self.timestamp.split(' ').next().unwrap_or_default()
    }

    /// Time-of-day part of the timestamp; empty when the separator is missing.
    pub fn time_of_day(&self) -> &str {
        self.timestamp.split(' ').nth(1).unwrap_or_default()
    }
}

/// Build the image URL for an icon id against `base` (no trailing slash expected).
pub fn icon_url(base: &str, icon_id: &str) -> String {
    format!("{}/{icon_id}.png", base.trim_end_matches('/'))
}
