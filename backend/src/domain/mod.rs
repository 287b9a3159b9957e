//! Domain primitives and services.
//!
//! Purpose: define strongly typed entities for the EcoAction registry and
//! keep them transport agnostic. Inbound adapters map domain errors onto
//! HTTP responses; outbound adapters translate records into the document
//! store's wire format. Types are immutable once constructed and document
//! their invariants in Rustdoc.

pub mod eco_action;
pub mod eco_action_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::eco_action::{
    ActionType, ActionTypeParseError, ECO_ACTIONS_COLLECTION, EcoAction, EcoActionId,
    EcoActionValidationError, GeoPoint, NewEcoAction,
};
pub use self::eco_action_service::EcoActionService;
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserIdValidationError};

/// Convenient domain result alias.
pub type ApiResult<T> = Result<T, Error>;
