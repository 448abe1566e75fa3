//! Typed errors surfaced by the library. Application glue wraps these in
//! `anyhow::Error` with context; the enrichment path downgrades lookup errors
//! to placeholder metadata.

use thiserror::Error;

/// A category name that does not match any shelf section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

/// Failure of a single metadata lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid lookup endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Connection, TLS or body decoding failure reported by the HTTP client.
    #[error("lookup request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup service answered with HTTP {0}")]
    Status(reqwest::StatusCode),
}
