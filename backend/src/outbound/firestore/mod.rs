//! Document store adapter persisting EcoAction records over REST.

mod dto;
mod http_repository;

pub use http_repository::{FirestoreHttpSettings, HttpEcoActionRepository};
