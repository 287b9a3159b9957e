//! EcoAction submission HTTP handler.
//!
//! ```text
//! POST /api/v1/eco-actions
//! ```
//!
//! The flow mirrors the submission contract: reject missing or rejected
//! bearer tokens with 401, reject incomplete payloads with 400, then
//! delegate the single insert to the driving port.

use std::str::FromStr;

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{IdTokenVerifierError, LogActionRequest, LogActionResponse};
use crate::domain::{ActionType, Error, GeoPoint, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_coordinate_error, require, unknown_action_type_error,
};

/// Request payload for logging an eco-action.
///
/// Required fields are modelled as `Option` so their absence maps to the
/// contract's 400 envelope instead of a framework deserialization error.
/// Unknown fields (including any client-supplied `userId`) are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogActionRequestBody {
    /// Categorical action tag, e.g. `tree_planted`.
    pub action_type: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Coordinates captured with the action.
    pub location: Option<LocationBody>,
}

/// Coordinate pair payload.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
}

/// Response payload for a logged eco-action.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogActionResponseBody {
    /// Always `true` on the success path.
    pub success: bool,
    /// Store-assigned identifier of the new record.
    pub action_id: String,
}

impl From<LogActionResponse> for LogActionResponseBody {
    fn from(value: LogActionResponse) -> Self {
        Self {
            success: true,
            action_id: value.action_id.to_string(),
        }
    }
}

fn parse_location(location: Option<LocationBody>) -> Result<GeoPoint, Error> {
    let location = require(location, FieldName::new("location"))?;
    let latitude = require(location.latitude, FieldName::new("location.latitude"))?;
    let longitude = require(location.longitude, FieldName::new("location.longitude"))?;
    GeoPoint::new(latitude, longitude).map_err(|err| {
        use crate::domain::EcoActionValidationError as Invalid;
        let field = match &err {
            Invalid::LongitudeOutOfRange { .. } => FieldName::new("location.longitude"),
            Invalid::NonFiniteCoordinate { field } if *field == "longitude" => {
                FieldName::new("location.longitude")
            }
            _ => FieldName::new("location.latitude"),
        };
        invalid_coordinate_error(field, err.to_string())
    })
}

fn parse_log_action_request(
    payload: LogActionRequestBody,
    user_id: UserId,
) -> Result<LogActionRequest, Error> {
    let raw_action_type = require(payload.action_type, FieldName::new("actionType"))?;
    let action_type = ActionType::from_str(raw_action_type.as_str())
        .map_err(|_| unknown_action_type_error(raw_action_type.as_str()))?;
    let location = parse_location(payload.location)?;

    Ok(LogActionRequest {
        user_id,
        action_type,
        notes: payload.notes,
        location,
    })
}

fn map_verifier_error(error: IdTokenVerifierError) -> Error {
    match error {
        IdTokenVerifierError::Rejected { message } => {
            Error::unauthorized(format!("invalid token: {message}"))
        }
        other => Error::internal(other.to_string()),
    }
}

/// Log one eco-action for the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/eco-actions",
    request_body = LogActionRequestBody,
    responses(
        (status = 200, description = "Action recorded", body = LogActionResponseBody),
        (status = 400, description = "Missing or malformed fields", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Downstream failure", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["eco-actions"],
    operation_id = "logEcoAction",
    security(("BearerToken" = []))
)]
#[post("/eco-actions")]
pub async fn log_eco_action(
    state: web::Data<HttpState>,
    token: BearerToken,
    payload: web::Json<LogActionRequestBody>,
) -> ApiResult<web::Json<LogActionResponseBody>> {
    let verified = state
        .verifier
        .verify(token.as_str())
        .await
        .map_err(map_verifier_error)?;

    let request = parse_log_action_request(payload.into_inner(), verified.user_id)?;
    let response = state.actions.log_action(request).await?;

    Ok(web::Json(LogActionResponseBody::from(response)))
}

#[cfg(test)]
#[path = "eco_actions_tests.rs"]
mod tests;
