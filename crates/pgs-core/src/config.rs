// ── Runtime session configuration ──
//
// Describes *how* to talk to the backend and how fast the page timers
// run. Never touches disk: the CLI builds a `SessionConfig` from its
// profiles and hands it in.

use std::time::Duration;

use pgs_api::transport::{TlsMode, TransportConfig};
use url::Url;

use crate::sections::Layout;

/// Delays used by the presenter and the post-create refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Banner auto-dismiss.
    pub dismiss_delay: Duration,
    /// Wait after a successful create before closing the modal and
    /// refreshing the listing.
    pub refresh_delay: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            dismiss_delay: Duration::from_secs(5),
            refresh_delay: Duration::from_secs(2),
        }
    }
}

/// Configuration for one session against a backend.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Backend base URL (e.g., `http://localhost:5000`).
    pub base_url: Url,
    /// TLS verification strategy.
    pub tls: TlsMode,
    /// Request timeout.
    pub timeout: Duration,
    /// Region and field names of the hosting page.
    pub layout: Layout,
    pub timing: Timing,
}

impl SessionConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            tls: TlsMode::default(),
            timeout: Duration::from_secs(30),
            layout: Layout::dashboard(),
            timing: Timing::default(),
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
