//! EcoAction registry backend library.
//!
//! The crate is organised around a hexagonal boundary: `domain` owns the
//! record types, error taxonomy, and ports; `inbound::http` adapts HTTP
//! requests onto the driving ports; `outbound` implements the driven ports
//! against the managed identity provider and document store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
