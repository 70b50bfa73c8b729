// ── Core error types ──
//
// Errors from pgs-core. Business rejections and transport failures seen
// by the section controllers are NOT errors here: they settle into
// `Settled` values and render through the presenter. `CoreError` covers
// client setup and export, where there is no page to show a banner on.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session setup ────────────────────────────────────────────────
    /// The HTTP client could not be built (TLS material, bad base URL).
    #[error("Cannot set up the HTTP client: {0}")]
    Client(#[from] pgs_api::Error),

    // ── Export ───────────────────────────────────────────────────────
    #[error("Export failed: {message}")]
    Export { message: String },

    #[error("Cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
