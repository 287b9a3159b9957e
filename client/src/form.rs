//! Submission form state container.
//!
//! Explicit lifecycle: Idle, Submitting, then Idle again with a transient
//! status notice. Starting a new submission clears any pending notice so a
//! stale auto-clear cannot erase a newer message.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use tracing::warn;

use crate::api::{EcoActionApi, SubmissionRequest};
use crate::geo::{self, CoordinateError, Coordinates};

const DEFAULT_ACTION_TYPE: &str = "tree_planted";
const NOTICE_TTL_SECS: i64 = 5;

/// Signed-in session holding the short-lived identity token.
#[derive(Debug, Clone)]
pub struct Session {
    display_name: String,
    id_token: String,
}

impl Session {
    /// Build a session for a signed-in user.
    #[must_use]
    pub fn new(display_name: impl Into<String>, id_token: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            id_token: id_token.into(),
        }
    }

    /// Display name of the signed-in user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    fn id_token(&self) -> &str {
        &self.id_token
    }
}

/// Form lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting input.
    Idle,
    /// A submission round trip is in flight.
    Submitting,
}

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The submission was recorded.
    Success,
    /// The submission was blocked or rejected.
    Failure,
}

/// Transient status message with an auto-clear expiry.
#[derive(Debug, Clone)]
pub struct StatusNotice {
    kind: NoticeKind,
    message: String,
    expires_at: DateTime<Utc>,
}

impl StatusNotice {
    /// Success or failure.
    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// User-visible message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Instant past which the notice no longer shows.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// State container for the eco-action submission form.
pub struct SubmissionForm {
    session: Option<Session>,
    action_type: String,
    notes: String,
    manual_latitude: String,
    manual_longitude: String,
    captured: Option<Coordinates>,
    location_requested: bool,
    phase: Phase,
    notice: Option<StatusNotice>,
    clock: Arc<dyn Clock>,
}

impl SubmissionForm {
    /// Build an empty, signed-out form.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            session: None,
            action_type: DEFAULT_ACTION_TYPE.to_owned(),
            notes: String::new(),
            manual_latitude: String::new(),
            manual_longitude: String::new(),
            captured: None,
            location_requested: false,
            phase: Phase::Idle,
            notice: None,
            clock,
        }
    }

    /// Record a sign-in and re-arm the one-shot device location capture.
    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
        self.location_requested = false;
    }

    /// Drop the session.
    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Current session, if signed in.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the device location should be requested now.
    ///
    /// True once per session, after sign-in.
    #[must_use]
    pub fn wants_device_location(&self) -> bool {
        self.session.is_some() && !self.location_requested
    }

    /// Record the auto-captured device coordinates.
    pub fn record_device_location(&mut self, coordinates: Coordinates) {
        self.location_requested = true;
        self.captured = Some(coordinates);
    }

    /// Record that the device location request failed or was denied.
    pub fn device_location_unavailable(&mut self) {
        self.location_requested = true;
    }

    /// Set the selected action type.
    pub fn set_action_type(&mut self, action_type: impl Into<String>) {
        self.action_type = action_type.into();
    }

    /// Set the free-text notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Set the manual latitude override text.
    pub fn set_manual_latitude(&mut self, text: impl Into<String>) {
        self.manual_latitude = text.into();
    }

    /// Set the manual longitude override text.
    pub fn set_manual_longitude(&mut self, text: impl Into<String>) {
        self.manual_longitude = text.into();
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The notice to display, if one is set and not yet expired.
    #[must_use]
    pub fn active_notice(&self) -> Option<&StatusNotice> {
        self.notice
            .as_ref()
            .filter(|notice| self.clock.utc() < notice.expires_at)
    }

    /// Auto-captured coordinates, if any.
    #[must_use]
    pub fn captured_location(&self) -> Option<Coordinates> {
        self.captured
    }

    fn resolved_location(&self) -> Result<Coordinates, CoordinateError> {
        let manual_latitude = geo::parse_manual_input(&self.manual_latitude, "latitude")?;
        let manual_longitude = geo::parse_manual_input(&self.manual_longitude, "longitude")?;
        geo::resolve(manual_latitude, manual_longitude, self.captured)
    }

    fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(StatusNotice {
            kind,
            message: message.into(),
            expires_at: self.clock.utc() + Duration::seconds(NOTICE_TTL_SECS),
        });
    }

    /// Attempt one submission.
    ///
    /// Blocks locally without a network call when the session is absent or
    /// no usable coordinates resolve. On success, clears the action and
    /// notes fields but retains the resolved location for the next entry.
    pub async fn submit(&mut self, api: &dyn EcoActionApi) {
        self.notice = None;

        let Some(token) = self.session.as_ref().map(|s| s.id_token().to_owned()) else {
            self.push_notice(NoticeKind::Failure, "sign in before logging an action");
            return;
        };
        let location = match self.resolved_location() {
            Ok(location) => location,
            Err(error) => {
                self.push_notice(NoticeKind::Failure, error.to_string());
                return;
            }
        };

        let request = SubmissionRequest {
            action_type: self.action_type.clone(),
            notes: (!self.notes.trim().is_empty()).then(|| self.notes.clone()),
            location,
        };

        self.phase = Phase::Submitting;
        let outcome = api.submit(&token, &request).await;
        self.phase = Phase::Idle;

        match outcome {
            Ok(result) => {
                self.action_type = DEFAULT_ACTION_TYPE.to_owned();
                self.notes.clear();
                self.manual_latitude.clear();
                self.manual_longitude.clear();
                self.captured = Some(location);
                self.push_notice(
                    NoticeKind::Success,
                    format!("Action logged ({})", result.action_id),
                );
            }
            Err(error) => {
                warn!(error = %error, "submission failed");
                self.push_notice(NoticeKind::Failure, format!("Submission failed: {error}"));
            }
        }
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
