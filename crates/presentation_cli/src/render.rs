//! Plain-text output for the CLI commands

use std::fmt::Write;

use application::{Forecast, GeocodedAddress};
use domain::coverage::{describe_region, is_supported};
use domain::{ApiError, Coordinates, WeatherPeriod};

/// Forecast periods, one block per period in the order received
pub fn forecast_text(forecast: &Forecast) -> String {
    let mut out = format!("📍 {} ({})\n", forecast.address, forecast.coordinates);

    if forecast.periods.is_empty() {
        out.push_str("\nNo forecast periods available.\n");
        return out;
    }

    for period in &forecast.periods {
        out.push('\n');
        out.push_str(&period_text(period));
    }
    out
}

fn period_text(period: &WeatherPeriod) -> String {
    let mut out = format!(
        "{}: {}, {}\n",
        period.name,
        period.temperature_display(),
        period.short_forecast
    );

    let _ = write!(out, "   Wind {} {}", period.wind_speed, period.wind_direction);
    if let Some(chance) = period.precipitation_chance() {
        let _ = write!(out, ", {chance:.0}% chance of precipitation");
    }
    out.push('\n');

    if !period.detailed_forecast.is_empty() {
        let _ = writeln!(out, "   {}", period.detailed_forecast);
    }
    out
}

/// Match details for the geocode command
pub fn geocoded_text(found: &GeocodedAddress) -> String {
    let mut out = format!(
        "📍 {}\n   Latitude:  {}\n   Longitude: {}\n",
        found.matched_address,
        found.coordinates.latitude(),
        found.coordinates.longitude()
    );
    for (layer, name) in &found.areas {
        let _ = writeln!(out, "   {layer}: {name}");
    }
    out
}

/// Support status and region label for a point
pub fn coverage_text(coordinates: &Coordinates) -> String {
    let region = describe_region(coordinates);
    if is_supported(coordinates) {
        format!("✅ {coordinates} is inside NWS coverage ({region})")
    } else {
        format!("❌ {coordinates} is outside NWS coverage ({region})")
    }
}

/// One-line error report with the status code
pub fn error_line(err: &ApiError) -> String {
    match err.status() {
        Some(status) => format!("❌ {err} (status {status})"),
        None => format!("❌ {err}"),
    }
}
