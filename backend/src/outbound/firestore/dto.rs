//! Wire DTOs for the document store's typed value encoding.
//!
//! The store wraps every field in a single-key object naming its type
//! (`stringValue`, `geoPointValue`, ...). Documents are created with a
//! `fields` map and answered with the full resource `name`, from which the
//! assigned id is the final path segment.

use std::collections::BTreeMap;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::{EcoActionId, EcoActionValidationError, NewEcoAction};

/// One typed field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) enum FirestoreValue {
    /// UTF-8 string field.
    #[serde(rename = "stringValue")]
    String(String),
    /// Boolean field.
    #[serde(rename = "booleanValue")]
    Boolean(bool),
    /// RFC 3339 timestamp field.
    #[serde(rename = "timestampValue")]
    Timestamp(String),
    /// Coordinate pair field.
    #[serde(rename = "geoPointValue")]
    GeoPoint(LatLngDto),
}

/// Coordinate payload inside a `geoPointValue`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(super) struct LatLngDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Create-document request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct CreateDocumentDto {
    pub fields: BTreeMap<&'static str, FirestoreValue>,
}

/// Create-document response; only the resource name matters here.
#[derive(Debug, Deserialize)]
pub(super) struct DocumentDto {
    pub name: String,
}

impl CreateDocumentDto {
    /// Encode a record into the store's typed field map.
    pub(super) fn from_record(record: &NewEcoAction) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            "userId",
            FirestoreValue::String(record.user_id().to_string()),
        );
        fields.insert(
            "actionType",
            FirestoreValue::String(record.action_type().to_string()),
        );
        fields.insert("notes", FirestoreValue::String(record.notes().to_owned()));
        fields.insert(
            "location",
            FirestoreValue::GeoPoint(LatLngDto {
                latitude: record.location().latitude(),
                longitude: record.location().longitude(),
            }),
        );
        fields.insert(
            "timestamp",
            FirestoreValue::Timestamp(
                record
                    .recorded_at()
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ),
        );
        fields.insert("verified", FirestoreValue::Boolean(record.verified()));
        Self { fields }
    }
}

impl DocumentDto {
    /// Extract the assigned id from the full resource name.
    pub(super) fn into_action_id(self) -> Result<EcoActionId, EcoActionValidationError> {
        let id = self.name.rsplit('/').next().unwrap_or_default();
        EcoActionId::new(id)
    }
}
