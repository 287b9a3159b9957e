//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EcoActionCommand, IdTokenVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Driving port for the submission flow.
    pub actions: Arc<dyn EcoActionCommand>,
    /// Driven port verifying bearer tokens.
    pub verifier: Arc<dyn IdTokenVerifier>,
}

impl HttpState {
    /// Bundle the port implementations for handler injection.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixtureEcoActionCommand, FixtureIdTokenVerifier};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureEcoActionCommand),
    ///     Arc::new(FixtureIdTokenVerifier),
    /// );
    /// let _actions = state.actions.clone();
    /// ```
    #[must_use]
    pub fn new(actions: Arc<dyn EcoActionCommand>, verifier: Arc<dyn IdTokenVerifier>) -> Self {
        Self { actions, verifier }
    }
}
