//! Error taxonomy for the client.
//!
//! Every fallible boundary returns one of these enums; callers branch on the
//! variant, never on a sentinel value.

use thiserror::Error;

/// Failures raised by a backend adapter (transport, API rejection, decoding,
/// or a configuration identifier missing at the point of use).
#[derive(Debug, Error)]
pub enum BackendError {
    /// A required configuration identifier was absent when an operation
    /// first needed it. Carries the name of the missing value.
    #[error("missing configuration value: {0}")]
    MissingConfig(&'static str),

    /// The request never produced a usable response (DNS, TLS, I/O).
    #[error("backend request failed: {0}")]
    Transport(String),

    /// The backend rejected the request with a structured error.
    #[error("backend rejected request ({code} {kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    /// No current session, or the session is no longer valid.
    #[error("not authenticated")]
    Unauthenticated,

    /// The response arrived but did not have the expected shape.
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Operation-level errors surfaced to callers of the client.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// The post image could not be prepared: the file uploaded but no
    /// preview URL could be produced. The uploaded file has been removed.
    #[error("post image could not be prepared: {0}")]
    ImagePreparation(#[source] BackendError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
