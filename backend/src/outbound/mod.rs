//! Outbound adapters implementing the driven ports over HTTP.

pub mod firestore;
pub mod identity;
