//! Weather service coverage rules
//!
//! A coarse bounding box around the US and its territories, plus a
//! human-readable label for a point that is used in error messages.

use crate::errors::ApiError;
use crate::value_objects::{Coordinates, to_fixed};

const MIN_LAT: f64 = 18.0;
const MAX_LAT: f64 = 72.0;
const MIN_LNG: f64 = -180.0;
const MAX_LNG: f64 = -65.0;

/// Whether the point falls inside the coarse coverage box
///
/// Latitude in [18, 72] and longitude in [-180, -65], both inclusive.
/// Non-finite values are never supported.
#[must_use]
pub fn is_supported(coordinates: &Coordinates) -> bool {
    let (latitude, longitude) = (coordinates.latitude(), coordinates.longitude());
    latitude.is_finite()
        && longitude.is_finite()
        && (MIN_LAT..=MAX_LAT).contains(&latitude)
        && (MIN_LNG..=MAX_LNG).contains(&longitude)
}

/// Label the region a point lies in
///
/// Checks run in a fixed order and the first hit wins, so the broad
/// out-of-area labels shadow the territory labels below them.
#[must_use]
pub fn describe_region(coordinates: &Coordinates) -> String {
    let (latitude, longitude) = (coordinates.latitude(), coordinates.longitude());
    let label = if latitude > 49.5 {
        "Northern Canada/Alaska border region"
    } else if latitude < 24.0 {
        "Caribbean/Central America region"
    } else if longitude > -65.0 {
        "Atlantic Ocean/Eastern Atlantic region"
    } else if longitude < -160.0 {
        "Pacific Ocean/Western Pacific region"
    } else if (25.0..=49.5).contains(&latitude) && (-125.0..=-65.0).contains(&longitude) {
        "Continental United States"
    } else if (18.0..=28.0).contains(&latitude) && (-67.5..=-65.0).contains(&longitude) {
        "Puerto Rico/US Virgin Islands region"
    } else if (19.0..=22.5).contains(&latitude) && (-161.0..=-154.0).contains(&longitude) {
        "Hawaii region"
    } else if (51.0..=72.0).contains(&latitude) && (-180.0..=-130.0).contains(&longitude) {
        "Alaska region"
    } else {
        return format!("{}°N, {}°W", to_fixed(latitude, 2), to_fixed(longitude.abs(), 2));
    };
    label.to_string()
}

/// Reject points outside the coverage box
///
/// # Errors
///
/// Returns a 400 [`ApiError`] naming the region when the point is
/// outside [`is_supported`].
pub fn ensure_supported(coordinates: &Coordinates) -> Result<(), ApiError> {
    if is_supported(coordinates) {
        return Ok(());
    }
    Err(ApiError::invalid_input(format!(
        "Coordinates appear outside NWS primary coverage area ({}). Weather data may not be available.",
        describe_region(coordinates)
    )))
}
