//! Driving port for logging eco-actions.

use async_trait::async_trait;

use crate::domain::{ActionType, EcoActionId, Error, GeoPoint, UserId};

/// Request to log one eco-action for an authenticated user.
///
/// `user_id` is always the verified token subject; the HTTP adapter never
/// copies it from client input.
#[derive(Debug, Clone, PartialEq)]
pub struct LogActionRequest {
    /// Owner derived from the verified token.
    pub user_id: UserId,
    /// Categorical action tag.
    pub action_type: ActionType,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Geotag captured with the action.
    pub location: GeoPoint,
}

/// Response from logging an eco-action.
#[derive(Debug, Clone, PartialEq)]
pub struct LogActionResponse {
    /// Store-assigned identifier of the new record.
    pub action_id: EcoActionId,
}

/// Driving port for the submission flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcoActionCommand: Send + Sync {
    /// Persist one record and return its identifier. Exactly one insert per
    /// successful call; zero inserts on any error path.
    async fn log_action(&self, request: LogActionRequest) -> Result<LogActionResponse, Error>;
}

/// Deterministic command for handler tests and examples.
pub struct FixtureEcoActionCommand;

impl FixtureEcoActionCommand {
    /// Identifier returned for every logged action.
    pub const ACTION_ID: &'static str = "fixture-action-0001";
}

#[async_trait]
impl EcoActionCommand for FixtureEcoActionCommand {
    async fn log_action(&self, _request: LogActionRequest) -> Result<LogActionResponse, Error> {
        let action_id = EcoActionId::new(Self::ACTION_ID)
            .map_err(|err| Error::internal(format!("fixture id invalid: {err}")))?;
        Ok(LogActionResponse { action_id })
    }
}
