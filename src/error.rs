//! Unified SDK error types.
//!
//! Business failures reported by the IM platform (a non-zero `ErrorCode` in a
//! successfully transported response) are not represented here.
//! See [`crate::shared::ImResponse`].

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Signing error: {0}")]
    Sign(#[from] SignError),

    /// A required argument was missing. No request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation name has no entry in the endpoint table.
    #[error("Unknown IM operation: {0}")]
    UnknownOperation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// HTTP-layer (transport) errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Undecodable response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else if e.is_decode() {
            HttpError::Decode(e.to_string())
        } else {
            HttpError::Reqwest(e)
        }
    }
}

/// UserSig generation / verification errors.
#[derive(Error, Debug)]
pub enum SignError {
    #[error("No key material configured for {0}")]
    MissingKey(&'static str),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Malformed usersig: {0}")]
    Malformed(String),

    #[error("Usersig was issued for {field} {actual:?}, expected {expected:?}")]
    Mismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Usersig expired")]
    Expired,

    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    #[error("No signer registered for {0}")]
    Unsupported(&'static str),
}
