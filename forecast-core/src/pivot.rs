//! Date × time-of-day pivot of a forecast series, for tabular display.
//!
//! Columns are the distinct dates and rows the distinct times of day, both in
//! order of first appearance. Nothing is sorted: the series is expected to
//! arrive chronologically already.

use crate::model::ForecastSample;

/// Samples of one calendar date, in series order.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: &'a str,
    pub samples: Vec<&'a ForecastSample>,
}

/// Borrowed grid view over a forecast series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastGrid<'a> {
    groups: Vec<DateGroup<'a>>,
    times: Vec<&'a str>,
}

impl<'a> ForecastGrid<'a> {
    /// Pivot `series` into date groups plus the time-of-day axis.
    pub fn build(series: &'a [ForecastSample]) -> Self {
        let mut groups: Vec<DateGroup<'a>> = Vec::new();
        let mut times: Vec<&'a str> = Vec::new();

        for sample in series {
            let date = sample.date();
            match groups.iter_mut().find(|g| g.date == date) {
                Some(group) => group.samples.push(sample),
                None => groups.push(DateGroup { date, samples: vec![sample] }),
            }

            let time = sample.time_of_day();
            if !times.contains(&time) {
                times.push(time);
            }
        }

        Self { groups, times }
    }

    /// Column axis: distinct dates in first-appearance order.
    pub fn dates(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|g| g.date)
    }

    /// Row axis: distinct times of day in first-appearance order.
    pub fn times(&self) -> &[&'a str] {
        &self.times
    }

    pub fn groups(&self) -> &[DateGroup<'a>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sample shown at (`time`, `date`).
    ///
    /// Picks the first sample of that date whose timestamp *contains* `time`.
    /// This is a substring match, so a label that prefixes another can hit the
    /// wrong sample. The empty label of a timestamp without a time part
    /// matches nothing.
    pub fn cell(&self, time: &str, date: &str) -> Option<&'a ForecastSample> {
        if time.is_empty() {
            return None;
        }
        self.groups
            .iter()
            .find(|g| g.date == date)?
            .samples
            .iter()
            .copied()
            .find(|s| s.timestamp.contains(time))
    }
}
