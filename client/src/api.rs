//! Outbound API caller posting submissions to the logging endpoint.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::geo::Coordinates;

const SUBMISSION_PATH: &str = "api/v1/eco-actions";

/// Errors surfaced by a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Endpoint {
        /// HTTP status code returned.
        status: u16,
        /// Error detail provided by the endpoint.
        message: String,
    },
    /// The request never completed.
    #[error("network failure: {0}")]
    Transport(String),
    /// A success response did not match the expected shape.
    #[error("unexpected response from endpoint")]
    Decode,
}

/// Payload posted for one eco-action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    /// Categorical action tag, e.g. `tree_planted`.
    pub action_type: String,
    /// Optional free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Resolved coordinates.
    pub location: Coordinates,
}

/// Successful submission result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Store-assigned identifier of the new record.
    pub action_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuccessBody {
    #[expect(dead_code, reason = "Present in the wire contract; only actionId is consumed")]
    success: bool,
    action_id: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Submission transport seam, mockable for form tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EcoActionApi: Send + Sync {
    /// Post one submission with the caller's bearer token.
    async fn submit(
        &self,
        token: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, ApiError>;
}

/// Reqwest-backed implementation of [`EcoActionApi`].
pub struct HttpEcoActionApi {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpEcoActionApi {
    /// Build a caller targeting `base_url`.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when the base URL is malformed.
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(base_url)?.join(SUBMISSION_PATH)?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    fn map_transport_error(error: &reqwest::Error) -> ApiError {
        ApiError::Transport(error.to_string())
    }

    async fn map_status_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("status {}", status.as_u16()),
        };
        ApiError::Endpoint {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl EcoActionApi for HttpEcoActionApi {
    async fn submit(
        &self,
        token: &str,
        request: &SubmissionRequest,
    ) -> Result<SubmissionOutcome, ApiError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::map_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status_error(status, response).await);
        }

        let body = response
            .json::<SuccessBody>()
            .await
            .map_err(|_| ApiError::Decode)?;
        Ok(SubmissionOutcome {
            action_id: body.action_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialises_to_the_wire_contract() {
        let request = SubmissionRequest {
            action_type: "tree_planted".to_owned(),
            notes: Some("roadside sapling".to_owned()),
            location: Coordinates::new(23.0225, 72.5714).expect("valid"),
        };
        let json = serde_json::to_value(&request).expect("serialises");
        assert_eq!(
            json,
            serde_json::json!({
                "actionType": "tree_planted",
                "notes": "roadside sapling",
                "location": {"latitude": 23.0225, "longitude": 72.5714}
            })
        );
    }

    #[test]
    fn absent_notes_are_omitted() {
        let request = SubmissionRequest {
            action_type: "water_saved".to_owned(),
            notes: None,
            location: Coordinates::new(0.0, 0.0).expect("valid"),
        };
        let json = serde_json::to_value(&request).expect("serialises");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn success_body_decodes_action_id() {
        let body: SuccessBody =
            serde_json::from_str(r#"{"success": true, "actionId": "doc-42"}"#).expect("decodes");
        assert_eq!(body.action_id, "doc-42");
    }

    #[test]
    fn endpoint_joins_the_submission_path() {
        let api = HttpEcoActionApi::new("http://localhost:8080/").expect("valid base");
        assert_eq!(
            api.endpoint.as_str(),
            "http://localhost:8080/api/v1/eco-actions"
        );
    }
}
