use chrono::{Datelike, Local, NaiveDateTime};

use crate::model::{ForecastSample, ForecastSeries};

/// Number of days after today kept in the forecast.
pub const WINDOW_DAYS: u32 = 4;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Day of month of a sample, if its timestamp parses.
pub fn day_of_month(sample: &ForecastSample) -> Option<u32> {
    NaiveDateTime::parse_from_str(&sample.timestamp, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.day())
}

/// Keep samples dated strictly after `today` and at most [`WINDOW_DAYS`] days after it.
///
/// Only the day of month is compared, so the window does not roll over month or
/// year boundaries. Unparseable timestamps are dropped.
pub fn retain_window(series: ForecastSeries, today: u32) -> ForecastSeries {
    series
        .into_iter()
        .filter(|s| day_of_month(s).is_some_and(|d| d > today && d <= today + WINDOW_DAYS))
        .collect()
}

/// [`retain_window`] against the local calendar day at call time.
pub fn retain_upcoming(series: ForecastSeries) -> ForecastSeries {
    retain_window(series, Local::now().day())
}
