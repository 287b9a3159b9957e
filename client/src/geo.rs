//! Coordinate parsing and resolution helpers.
//!
//! Manual text inputs are parsed with explicit `Option` handling so a
//! typed-in `0` is a legal coordinate, not an absent one.

use serde::Serialize;

/// Errors raised while parsing or validating coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// A manual input could not be parsed as a number.
    #[error("{field} is not a number")]
    NotANumber {
        /// Offending input field.
        field: &'static str,
    },
    /// A coordinate parsed but is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending input field.
        field: &'static str,
    },
    /// Latitude outside [-90, 90].
    #[error("latitude must be within [-90, 90]")]
    LatitudeOutOfRange,
    /// Longitude outside [-180, 180].
    #[error("longitude must be within [-180, 180]")]
    LongitudeOutOfRange,
    /// Neither manual nor captured values yielded a full pair.
    #[error("no usable location; enable device location or enter coordinates")]
    Unresolved,
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    ///
    /// # Errors
    /// Returns [`CoordinateError`] when either value is non-finite or out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() {
            return Err(CoordinateError::NotFinite { field: "latitude" });
        }
        if !longitude.is_finite() {
            return Err(CoordinateError::NotFinite { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Parse an optional manual input.
///
/// Blank input means "not provided" and is not an error.
///
/// # Errors
/// Returns [`CoordinateError::NotANumber`] when a non-blank input fails to
/// parse.
pub fn parse_manual_input(
    text: &str,
    field: &'static str,
) -> Result<Option<f64>, CoordinateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| CoordinateError::NotANumber { field })
}

/// Resolve the coordinates to submit.
///
/// Each coordinate prefers the manual override and falls back to the
/// captured device value. Both must resolve for a submission to proceed.
///
/// # Errors
/// Returns [`CoordinateError::Unresolved`] when either coordinate is
/// absent from both sources, or a validation error when the resolved pair
/// is malformed.
pub fn resolve(
    manual_latitude: Option<f64>,
    manual_longitude: Option<f64>,
    captured: Option<Coordinates>,
) -> Result<Coordinates, CoordinateError> {
    let latitude = manual_latitude
        .or_else(|| captured.map(|c| c.latitude()))
        .ok_or(CoordinateError::Unresolved)?;
    let longitude = manual_longitude
        .or_else(|| captured.map(|c| c.longitude()))
        .ok_or(CoordinateError::Unresolved)?;
    Coordinates::new(latitude, longitude)
}
