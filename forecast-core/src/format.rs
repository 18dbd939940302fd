//! Plain-text table rendering of forecast results.

use std::collections::HashMap;

use crate::model::{ForecastResult, NOT_AVAILABLE, WeatherRecord};

/// Cities shown in the table, in display order.
pub const CITIES: [&str; 4] = ["Chisinau", "Madrid", "Kyiv", "Amsterdam"];

pub const HEADERS: [&str; 6] =
    ["City", "Min Temp", "Max Temp", "Humidity", "Wind Speed", "Wind Direction"];

pub const NO_DATA: &str = "No data to display";

/// Render one row per entry of [`CITIES`], looking each city up in `results`.
///
/// Missing cities and failures are shown as `N/A`. Returns [`NO_DATA`] when
/// none of the cities has a successful forecast.
pub fn render(results: &HashMap<String, ForecastResult>) -> String {
    let record_for = |city: &str| results.get(city).and_then(ForecastResult::record);

    let Some(date) = CITIES.into_iter().find_map(record_for).map(WeatherRecord::date) else {
        return NO_DATA.to_string();
    };

    let rows: Vec<[String; 6]> = CITIES
        .into_iter()
        .map(|city| match record_for(city) {
            Some(record) => record_row(city, record),
            None => placeholder_row(city),
        })
        .collect();

    format!("Weather Forecast for {date}\n\n{}", grid(&HEADERS, &rows))
}

fn record_row(city: &str, record: &WeatherRecord) -> [String; 6] {
    [
        city.to_string(),
        format!("{:.1}°C", record.min_temp()),
        format!("{:.1}°C", record.max_temp()),
        format!("{:.0}%", record.humidity()),
        format!("{:.1} kph", record.wind_speed()),
        record.wind_direction().to_string(),
    ]
}

fn placeholder_row(city: &str) -> [String; 6] {
    let na = || NOT_AVAILABLE.to_string();
    [city.to_string(), na(), na(), na(), na(), na()]
}

/// Grid-style table: `+---+` borders, `+===+` under the header, a rule after
/// every row. Headers get two extra columns of padding.
fn grid<const N: usize>(headers: &[&str; N], rows: &[[String; N]]) -> String {
    let widths: Vec<usize> = (0..N)
        .map(|col| {
            let header = headers[col].chars().count() + 2;
            rows.iter().map(|row| row[col].chars().count()).fold(header, usize::max)
        })
        .collect();

    let mut out = vec![rule('-', &widths), grid_line(headers, &widths), rule('=', &widths)];
    for row in rows {
        out.push(grid_line(row, &widths));
        out.push(rule('-', &widths));
    }
    out.join("\n")
}

fn rule(fill: char, widths: &[usize]) -> String {
    let mut line = String::from("+");
    for &width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line
}

fn grid_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, &width) in cells.iter().zip(widths) {
        line.push_str(&format!(" {:<width$} |", cell.as_ref()));
    }
    line
}
