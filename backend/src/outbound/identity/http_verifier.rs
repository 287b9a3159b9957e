//! Reqwest-backed ID token verifier.
//!
//! This adapter owns transport details only: the lookup request, timeout
//! and HTTP error mapping, and decoding the provider's verdict into the
//! domain's `AuthenticatedUser`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{LookupErrorDto, LookupRequestDto, LookupResponseDto};
use crate::domain::ports::{AuthenticatedUser, IdTokenVerifier, IdTokenVerifierError};

const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";

/// Connection settings for the identity provider.
pub struct IdentityHttpSettings {
    /// Lookup endpoint; overridable for emulators and tests.
    pub endpoint: Url,
    /// Browser API key scoping the request to the project.
    pub api_key: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl IdentityHttpSettings {
    /// Settings against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in endpoint fails to parse, which
    /// indicates a programming error rather than a configuration one.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            api_key: api_key.into(),
            timeout,
        })
    }
}

/// Verifier adapter performing one lookup call per token.
pub struct HttpIdTokenVerifier {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpIdTokenVerifier {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: IdentityHttpSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            endpoint: settings.endpoint,
            api_key: settings.api_key,
        })
    }
}

#[async_trait]
impl IdTokenVerifier for HttpIdTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, IdTokenVerifierError> {
        let mut endpoint = self.endpoint.clone();
        endpoint
            .query_pairs_mut()
            .append_pair("key", self.api_key.as_str());

        let response = self
            .client
            .post(endpoint)
            .json(&LookupRequestDto { id_token: token })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: LookupResponseDto = serde_json::from_slice(body.as_ref()).map_err(|err| {
            IdTokenVerifierError::decode(format!("invalid lookup response: {err}"))
        })?;
        decoded.into_authenticated_user()
    }
}

fn map_transport_error(error: reqwest::Error) -> IdTokenVerifierError {
    if error.is_timeout() {
        IdTokenVerifierError::timeout(error.to_string())
    } else {
        IdTokenVerifierError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdTokenVerifierError {
    // The provider answers 400 with a coded message for bad tokens.
    let detail = serde_json::from_slice::<LookupErrorDto>(body)
        .map(|decoded| decoded.error.message)
        .unwrap_or_else(|_| format!("status {}", status.as_u16()));

    if status.is_client_error() {
        IdTokenVerifierError::rejected(detail)
    } else {
        IdTokenVerifierError::transport(detail)
    }
}
