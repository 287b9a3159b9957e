//! Reqwest-backed EcoAction repository.
//!
//! Performs the single create-document call per insert and maps transport
//! failures onto the repository port's error taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{CreateDocumentDto, DocumentDto};
use crate::domain::ports::{EcoActionRepository, EcoActionRepositoryError};
use crate::domain::{ECO_ACTIONS_COLLECTION, EcoActionId, NewEcoAction};

const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com";

/// Connection settings for the document store.
pub struct FirestoreHttpSettings {
    /// API base URL; overridable for the emulator and tests.
    pub base_url: Url,
    /// Project owning the database.
    pub project_id: String,
    /// Optional OAuth bearer token; the emulator accepts unauthenticated
    /// writes.
    pub access_token: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl FirestoreHttpSettings {
    /// Settings against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the built-in base URL fails to parse, which
    /// indicates a programming error rather than a configuration one.
    pub fn new(project_id: impl Into<String>, timeout: Duration) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            project_id: project_id.into(),
            access_token: None,
            timeout,
        })
    }

    /// Attach an OAuth bearer token for authenticated writes.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Repository adapter appending documents to the EcoAction collection.
pub struct HttpEcoActionRepository {
    client: Client,
    collection_url: Url,
    access_token: Option<String>,
}

impl HttpEcoActionRepository {
    /// Build an adapter for the configured project and collection.
    ///
    /// # Errors
    ///
    /// Returns an error when the collection URL cannot be derived from the
    /// settings or the reqwest client cannot be constructed.
    pub fn new(settings: FirestoreHttpSettings) -> Result<Self, EcoActionRepositoryError> {
        let path = format!(
            "v1/projects/{}/databases/(default)/documents/{ECO_ACTIONS_COLLECTION}",
            settings.project_id
        );
        let collection_url = settings
            .base_url
            .join(&path)
            .map_err(|err| EcoActionRepositoryError::rejected(format!("invalid base url: {err}")))?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|err| EcoActionRepositoryError::transport(err.to_string()))?;
        Ok(Self {
            client,
            collection_url,
            access_token: settings.access_token,
        })
    }
}

#[async_trait]
impl EcoActionRepository for HttpEcoActionRepository {
    async fn insert(&self, record: &NewEcoAction) -> Result<EcoActionId, EcoActionRepositoryError> {
        let mut request = self
            .client
            .post(self.collection_url.clone())
            .json(&CreateDocumentDto::from_record(record));
        if let Some(token) = self.access_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: DocumentDto = serde_json::from_slice(body.as_ref()).map_err(|err| {
            EcoActionRepositoryError::decode(format!("invalid create response: {err}"))
        })?;
        decoded
            .into_action_id()
            .map_err(|err| EcoActionRepositoryError::decode(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> EcoActionRepositoryError {
    if error.is_timeout() {
        EcoActionRepositoryError::timeout(error.to_string())
    } else {
        EcoActionRepositoryError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> EcoActionRepositoryError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            EcoActionRepositoryError::timeout(message)
        }
        _ if status.is_client_error() => EcoActionRepositoryError::rejected(message),
        _ => EcoActionRepositoryError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
