//! EcoAction record types.
//!
//! One domain entity: a geotagged eco-action logged by a signed-in user.
//! Records are immutable once created; there is no update or delete path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserId;

/// Name of the document collection holding EcoAction records.
pub const ECO_ACTIONS_COLLECTION: &str = "ecoActions";

/// Categorical tag describing what kind of eco-action was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// A tree was planted.
    TreePlanted,
    /// Single-use plastic was avoided.
    PlasticAvoided,
    /// Water consumption was reduced.
    WaterSaved,
    /// Energy consumption was reduced.
    EnergySaved,
}

impl ActionType {
    /// Wire representation stored in the document store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreePlanted => "tree_planted",
            Self::PlasticAvoided => "plastic_avoided",
            Self::WaterSaved => "water_saved",
            Self::EnergySaved => "energy_saved",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an action type tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action type: {value}")]
pub struct ActionTypeParseError {
    /// The rejected tag.
    pub value: String,
}

impl FromStr for ActionType {
    type Err = ActionTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree_planted" => Ok(Self::TreePlanted),
            "plastic_avoided" => Ok(Self::PlasticAvoided),
            "water_saved" => Ok(Self::WaterSaved),
            "energy_saved" => Ok(Self::EnergySaved),
            other => Err(ActionTypeParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Validation errors for EcoAction values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EcoActionValidationError {
    /// A coordinate was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFiniteCoordinate {
        /// Offending coordinate name.
        field: &'static str,
    },
    /// Latitude fell outside [-90, 90].
    #[error("latitude must be within [-90, 90], got {value}")]
    LatitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// Longitude fell outside [-180, 180].
    #[error("longitude must be within [-180, 180], got {value}")]
    LongitudeOutOfRange {
        /// Rejected value.
        value: f64,
    },
    /// The store-assigned identifier was empty.
    #[error("action id must not be empty")]
    EmptyActionId,
}

/// A WGS84 coordinate pair.
///
/// ## Invariants
/// - Both coordinates are finite.
/// - Latitude lies within [-90, 90]; longitude within [-180, 180].
/// - Zero is a legal value for either axis (equator, prime meridian).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "GeoPointDto", into = "GeoPointDto")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Validate and construct a coordinate pair.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::GeoPoint;
    ///
    /// let equator = GeoPoint::new(0.0, 72.5714).expect("valid point");
    /// assert_eq!(equator.latitude(), 0.0);
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, EcoActionValidationError> {
        if !latitude.is_finite() {
            return Err(EcoActionValidationError::NonFiniteCoordinate { field: "latitude" });
        }
        if !longitude.is_finite() {
            return Err(EcoActionValidationError::NonFiniteCoordinate { field: "longitude" });
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EcoActionValidationError::LatitudeOutOfRange { value: latitude });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EcoActionValidationError::LongitudeOutOfRange { value: longitude });
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

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct GeoPointDto {
    latitude: f64,
    longitude: f64,
}

impl From<GeoPoint> for GeoPointDto {
    fn from(value: GeoPoint) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

impl TryFrom<GeoPointDto> for GeoPoint {
    type Error = EcoActionValidationError;

    fn try_from(value: GeoPointDto) -> Result<Self, Self::Error> {
        Self::new(value.latitude, value.longitude)
    }
}

/// Opaque record identifier assigned by the document store at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "8f2Kq1vLx0YcW3TnUzAb")]
pub struct EcoActionId(String);

impl EcoActionId {
    /// Validate and construct an identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, EcoActionValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(EcoActionValidationError::EmptyActionId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for EcoActionId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EcoActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EcoActionId> for String {
    fn from(value: EcoActionId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EcoActionId {
    type Error = EcoActionValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A record ready for its single atomic insert.
///
/// ## Invariants
/// - `user_id` comes from the verified token, never from client input.
/// - `verified` is always `false`; verification is a downstream process
///   with no code path here.
/// - `recorded_at` is server-assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEcoAction {
    user_id: UserId,
    action_type: ActionType,
    notes: String,
    location: GeoPoint,
    recorded_at: DateTime<Utc>,
    verified: bool,
}

impl NewEcoAction {
    /// Assemble a record for insertion. Absent notes default to an empty
    /// string and `verified` is fixed to `false`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        action_type: ActionType,
        notes: Option<String>,
        location: GeoPoint,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            action_type,
            notes: notes.unwrap_or_default(),
            location,
            recorded_at,
            verified: false,
        }
    }

    /// Owner derived from the verified token.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Categorical action tag.
    #[must_use]
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Free-text notes; empty when the submitter provided none.
    #[must_use]
    pub fn notes(&self) -> &str {
        self.notes.as_str()
    }

    /// Geotag captured with the action.
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Server-assigned creation time.
    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Verification flag; always `false` at creation.
    #[must_use]
    pub fn verified(&self) -> bool {
        self.verified
    }
}

/// A stored record, as read back from the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct EcoAction {
    /// Store-assigned identifier.
    pub id: EcoActionId,
    /// Record contents as inserted.
    pub record: NewEcoAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::tree("tree_planted", ActionType::TreePlanted)]
    #[case::plastic("plastic_avoided", ActionType::PlasticAvoided)]
    #[case::water("water_saved", ActionType::WaterSaved)]
    #[case::energy("energy_saved", ActionType::EnergySaved)]
    fn action_type_round_trips(#[case] raw: &str, #[case] parsed: ActionType) {
        assert_eq!(raw.parse::<ActionType>().expect("known tag"), parsed);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn action_type_rejects_unknown_tags() {
        let error = "carpool".parse::<ActionType>().expect_err("unknown tag");
        assert_eq!(error.value, "carpool");
    }

    #[test]
    fn geo_point_accepts_zero_coordinates() {
        let origin = GeoPoint::new(0.0, 0.0).expect("zero is legal");
        assert_eq!(origin.latitude(), 0.0);
        assert_eq!(origin.longitude(), 0.0);
    }

    #[rstest]
    #[case::nan_lat(f64::NAN, 0.0)]
    #[case::inf_lng(0.0, f64::INFINITY)]
    fn geo_point_rejects_non_finite(#[case] latitude: f64, #[case] longitude: f64) {
        let error = GeoPoint::new(latitude, longitude).expect_err("non-finite");
        assert!(matches!(
            error,
            EcoActionValidationError::NonFiniteCoordinate { .. }
        ));
    }

    #[rstest]
    #[case::lat_high(90.5, 0.0)]
    #[case::lat_low(-91.0, 0.0)]
    fn geo_point_rejects_out_of_range_latitude(#[case] latitude: f64, #[case] longitude: f64) {
        let error = GeoPoint::new(latitude, longitude).expect_err("out of range");
        assert!(matches!(
            error,
            EcoActionValidationError::LatitudeOutOfRange { .. }
        ));
    }

    #[test]
    fn geo_point_rejects_out_of_range_longitude() {
        let error = GeoPoint::new(0.0, 180.5).expect_err("out of range");
        assert!(matches!(
            error,
            EcoActionValidationError::LongitudeOutOfRange { .. }
        ));
    }

    #[test]
    fn new_record_defaults_notes_and_verified() {
        let record = NewEcoAction::new(
            UserId::new("U1").expect("uid"),
            ActionType::TreePlanted,
            None,
            GeoPoint::new(23.0225, 72.5714).expect("valid point"),
            Utc::now(),
        );
        assert_eq!(record.notes(), "");
        assert!(!record.verified());
    }

    #[test]
    fn eco_action_id_rejects_blank() {
        assert_eq!(
            EcoActionId::new("  ").expect_err("blank id"),
            EcoActionValidationError::EmptyActionId
        );
    }
}
