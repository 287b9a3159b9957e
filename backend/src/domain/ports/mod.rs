//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`IdTokenVerifier`, `EcoActionRepository`) are implemented
//! by outbound adapters; the driving port (`EcoActionCommand`) is
//! implemented by the domain service and consumed by the HTTP adapter.

mod eco_action_command;
mod eco_action_repository;
mod id_token_verifier;

#[cfg(test)]
pub use eco_action_command::MockEcoActionCommand;
pub use eco_action_command::{
    EcoActionCommand, FixtureEcoActionCommand, LogActionRequest, LogActionResponse,
};
#[cfg(test)]
pub use eco_action_repository::MockEcoActionRepository;
pub use eco_action_repository::{
    EcoActionRepository, EcoActionRepositoryError, FixtureEcoActionRepository,
};
#[cfg(test)]
pub use id_token_verifier::MockIdTokenVerifier;
pub use id_token_verifier::{
    AuthenticatedUser, FixtureIdTokenVerifier, IdTokenVerifier, IdTokenVerifierError,
};
