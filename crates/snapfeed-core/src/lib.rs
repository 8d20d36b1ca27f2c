//! # Snapfeed Core
//!
//! The domain layer of the Snapfeed client.
//! This crate contains entities, error types and the ports (traits) that
//! backend adapters must implement. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{BackendError, DomainError};
