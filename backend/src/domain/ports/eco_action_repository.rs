//! Driven port for persisting EcoAction records.
//!
//! The document store appends records and assigns identifiers; there is no
//! update or delete operation in this flow.

use async_trait::async_trait;

use crate::domain::{EcoActionId, NewEcoAction};

/// Errors surfaced while inserting a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcoActionRepositoryError {
    /// Network transport failed before the store answered.
    #[error("eco-action store transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// The insert exceeded its timeout.
    #[error("eco-action store timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The store refused the write.
    #[error("eco-action store rejected write: {message}")]
    Rejected {
        /// Store-supplied rejection detail.
        message: String,
    },
    /// The store response could not be decoded.
    #[error("eco-action store response decode failed: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
}

impl EcoActionRepositoryError {
    /// Construct a [`Self::Transport`] error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Construct a [`Self::Timeout`] error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Construct a [`Self::Rejected`] error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Construct a [`Self::Decode`] error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for the single atomic insert into the EcoAction collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcoActionRepository: Send + Sync {
    /// Insert `record` and return the store-assigned identifier.
    async fn insert(&self, record: &NewEcoAction) -> Result<EcoActionId, EcoActionRepositoryError>;
}

/// Deterministic repository for handler tests and examples.
pub struct FixtureEcoActionRepository;

impl FixtureEcoActionRepository {
    /// Identifier returned for every insert.
    pub const ACTION_ID: &'static str = "fixture-action-0001";
}

#[async_trait]
impl EcoActionRepository for FixtureEcoActionRepository {
    async fn insert(
        &self,
        _record: &NewEcoAction,
    ) -> Result<EcoActionId, EcoActionRepositoryError> {
        EcoActionId::new(Self::ACTION_ID)
            .map_err(|err| EcoActionRepositoryError::decode(format!("fixture id invalid: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActionType, GeoPoint, UserId};
    use chrono::Utc;

    #[tokio::test]
    async fn fixture_returns_stable_id() {
        let record = NewEcoAction::new(
            UserId::new("U1").expect("uid"),
            ActionType::WaterSaved,
            Some("shorter shower".to_owned()),
            GeoPoint::new(51.5, -0.1).expect("valid point"),
            Utc::now(),
        );
        let id = FixtureEcoActionRepository
            .insert(&record)
            .await
            .expect("fixture insert succeeds");
        assert_eq!(id.as_ref(), FixtureEcoActionRepository::ACTION_ID);
    }
}
