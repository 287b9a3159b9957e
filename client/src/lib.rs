//! Client-side submission flow for the eco-action logging API.
//!
//! Models the form lifecycle as an explicit state container: resolve the
//! coordinates to submit, require a signed-in session, post the payload,
//! and surface the outcome as a transient status notice.

pub mod api;
pub mod form;
pub mod geo;

pub use api::{ApiError, EcoActionApi, HttpEcoActionApi, SubmissionOutcome, SubmissionRequest};
pub use form::{NoticeKind, Phase, Session, StatusNotice, SubmissionForm};
pub use geo::{CoordinateError, Coordinates};
