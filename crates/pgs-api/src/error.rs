use thiserror::Error;

/// Top-level error type for the `pgs-api` crate.
///
/// Only client setup surfaces one of these to callers. The dispatcher
/// logs every other failure and folds it into a localized message.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {0}")]
    CannotBeABase(String),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// Request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body was not JSON, with a preview of the raw body.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
