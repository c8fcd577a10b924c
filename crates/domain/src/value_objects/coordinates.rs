//! Geographic coordinates value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair produced by geocoding
///
/// Fields are private so a value cannot be mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl Coordinates {
    /// Create coordinates with range validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN included)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create coordinates without validation (for trusted sources and tests)
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Both components are finite numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Copy rounded to four decimal places, the weather grid resolution
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            latitude: round4(self.latitude),
            longitude: round4(self.longitude),
        }
    }
}

fn round4(value: f64) -> f64 {
    to_fixed(value, 4).parse().unwrap_or(value)
}

/// Format `value` with `digits` decimal places, rounding exact halves away from zero
///
/// Rounding works on the exact decimal expansion of `value`, so `44.44345`
/// (stored just below the half) gives `44.4434` while `24.125` gives `24.13`.
#[must_use]
pub fn to_fixed(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$}");
    if !value.is_finite() {
        return formatted;
    }

    // Every finite f64 has a terminating expansion within 1074 decimal places
    let exact = format!("{:.1074}", value.abs());
    let Some(point) = exact.find('.') else {
        return formatted;
    };
    let Some(tail) = exact.get(point + 1 + digits..) else {
        return formatted;
    };
    let is_tie = tail.starts_with('5') && tail.bytes().skip(1).all(|b| b == b'0');
    if !is_tie {
        return formatted;
    }

    let Ok(exponent) = i32::try_from(digits) else {
        return formatted;
    };
    let truncated: f64 = exact[..=point + digits].parse().unwrap_or(0.0);
    let magnitude = truncated + 10f64.powi(-exponent);
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{magnitude:.digits$}")
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
