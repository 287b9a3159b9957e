//! EcoAction domain service.
//!
//! Implements the [`EcoActionCommand`] driving port: assembles the record
//! with a clock-assigned timestamp and `verified` fixed to `false`, then
//! performs the single atomic insert.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    EcoActionCommand, EcoActionRepository, EcoActionRepositoryError, LogActionRequest,
    LogActionResponse,
};
use crate::domain::{Error, NewEcoAction};

fn map_repository_error(error: EcoActionRepositoryError) -> Error {
    // Every downstream failure surfaces as a server error carrying the
    // underlying message.
    Error::internal(error.to_string())
}

/// Service wiring the submission flow to the record store.
#[derive(Clone)]
pub struct EcoActionService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EcoActionService<R> {
    /// Create a service over a repository and an injectable clock.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl<R> EcoActionCommand for EcoActionService<R>
where
    R: EcoActionRepository,
{
    async fn log_action(&self, request: LogActionRequest) -> Result<LogActionResponse, Error> {
        let record = NewEcoAction::new(
            request.user_id,
            request.action_type,
            request.notes,
            request.location,
            self.clock.utc(),
        );

        let action_id = self
            .repository
            .insert(&record)
            .await
            .map_err(map_repository_error)?;

        Ok(LogActionResponse { action_id })
    }
}

#[cfg(test)]
#[path = "eco_action_service_tests.rs"]
mod tests;
