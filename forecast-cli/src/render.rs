//! Plain-text rendering of a search session.

use forecast_core::{CurrentConditions, ForecastGrid, ForecastSample, Session, icon_url};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " | ";

/// Everything shown after a search: current conditions, then the forecast table.
///
/// Parts whose lookup failed are simply left out.
pub fn session(session: &Session, icon_base_url: &str) -> String {
    let mut out = String::new();

    if let Some(current) = &session.current {
        out.push_str(&current_conditions(current, icon_base_url));
    }

    let grid = session.grid();
    if !grid.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Forecast\n");
        out.push_str(&forecast_table(&grid, icon_base_url));
    }

    out
}

pub fn current_conditions(current: &CurrentConditions, icon_base_url: &str) -> String {
    format!(
        "Current Weather\n\
         Temperature: {}°C\n\
         Weather Condition: {}\n\
         Humidity: {}%\n\
         Wind Speed: {} m/s\n\
         Icon: {}\n",
        current.temperature_c,
        current.description,
        current.humidity_pct,
        current.wind_speed_mps,
        icon_url(icon_base_url, &current.icon_id),
    )
}

fn cell_text(sample: Option<&ForecastSample>, icon_base_url: &str) -> String {
    match sample {
        Some(s) => format!(
            "{}°C {} ({})",
            s.temperature_c,
            s.description,
            icon_url(icon_base_url, &s.icon_id)
        ),
        None => String::new(),
    }
}

/// Time-of-day rows against date columns; missing combinations are blank.
pub fn forecast_table(grid: &ForecastGrid<'_>, icon_base_url: &str) -> String {
    let dates: Vec<&str> = grid.dates().collect();

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(grid.times().len() + 1);
    rows.push(
        std::iter::once("Time".to_string())
            .chain(dates.iter().map(|d| d.to_string()))
            .collect(),
    );
    for time in grid.times() {
        rows.push(
            std::iter::once(time.to_string())
                .chain(dates.iter().map(|date| cell_text(grid.cell(time, date), icon_base_url)))
                .collect(),
        );
    }

    let widths: Vec<usize> = (0..=dates.len())
        .map(|col| rows.iter().map(|row| row[col].width()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(text, &w)| pad(text, w))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        out.push_str(line.trim_end());
        out.push('\n');

        if i == 0 {
            let rule = widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>().join("-+-");
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out
}

/// Left-align by display width; `format!` pads by char count, which misaligns "°".
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}
