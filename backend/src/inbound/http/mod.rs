//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod eco_actions;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
