//! Driven port for verifying bearer ID tokens.
//!
//! The domain owns the request and response shapes so the submission flow
//! stays adapter-agnostic; the identity provider is a black box behind
//! this trait.

use async_trait::async_trait;

use crate::domain::UserId;

/// Identity extracted from a successfully verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable subject identifier issued by the provider.
    pub user_id: UserId,
}

/// Errors surfaced while verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdTokenVerifierError {
    /// Network transport failed before receiving a verdict.
    #[error("token verification transport failed: {message}")]
    Transport {
        /// Transport failure detail.
        message: String,
    },
    /// The verification call exceeded its timeout.
    #[error("token verification timed out: {message}")]
    Timeout {
        /// Timeout detail.
        message: String,
    },
    /// The provider rejected the token (expired, malformed, revoked).
    #[error("token rejected: {message}")]
    Rejected {
        /// Provider-supplied rejection detail.
        message: String,
    },
    /// The provider response could not be decoded.
    #[error("token verification response decode failed: {message}")]
    Decode {
        /// Decode failure detail.
        message: String,
    },
}

impl IdTokenVerifierError {
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

/// Port for verifying an ID token and deriving the caller's identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    /// Verify `token` and return the authenticated subject.
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, IdTokenVerifierError>;
}

/// Deterministic verifier for handler tests and examples: accepts every
/// non-empty token and resolves it to a fixed subject.
pub struct FixtureIdTokenVerifier;

impl FixtureIdTokenVerifier {
    /// Subject returned for every accepted token.
    pub const USER_ID: &'static str = "fixture-user-0001";
}

#[async_trait]
impl IdTokenVerifier for FixtureIdTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, IdTokenVerifierError> {
        if token.is_empty() {
            return Err(IdTokenVerifierError::rejected("empty token"));
        }
        let user_id = UserId::new(Self::USER_ID)
            .map_err(|err| IdTokenVerifierError::decode(format!("fixture uid invalid: {err}")))?;
        Ok(AuthenticatedUser { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_accepts_non_empty_tokens() {
        let verified = FixtureIdTokenVerifier
            .verify("header.payload.signature")
            .await
            .expect("fixture accepts tokens");
        assert_eq!(verified.user_id.as_ref(), FixtureIdTokenVerifier::USER_ID);
    }

    #[tokio::test]
    async fn fixture_rejects_empty_tokens() {
        let error = FixtureIdTokenVerifier
            .verify("")
            .await
            .expect_err("empty token");
        assert!(matches!(error, IdTokenVerifierError::Rejected { .. }));
    }
}
