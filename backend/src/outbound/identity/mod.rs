//! Identity provider adapter verifying ID tokens over REST.

mod dto;
mod http_verifier;

pub use http_verifier::{HttpIdTokenVerifier, IdentityHttpSettings};
