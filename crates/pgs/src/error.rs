//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError` and settled section outcomes into
//! user-facing errors with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use pgs_config::ConfigError;
use pgs_core::{CoreError, Settled};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(pgs::connection_failed),
        help(
            "{reason}\n\
             Check that the server is running, or point at another one with --server."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Cannot set up the HTTP client")]
    #[diagnostic(
        code(pgs::client_setup),
        help(
            "{reason}\n\
             Check the profile's ca_cert path, or pass --insecure for a local development server."
        )
    )]
    ClientSetup { reason: String },

    // ── Backend ──────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(pgs::rejected))]
    Rejected { message: String },

    #[error("Another request was still in flight; nothing was sent")]
    #[diagnostic(code(pgs::dropped))]
    Dropped,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(pgs::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(pgs::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: pgs config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend server configured")]
    #[diagnostic(
        code(pgs::no_config),
        help(
            "Pass --server http://host:port, set PGS_SERVER, or create a profile with: pgs config init\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pgs::config))]
    Config(Box<figment::Error>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(pgs::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Cannot write {path}")]
    #[diagnostic(code(pgs::write))]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Export failed: {message}")]
    #[diagnostic(code(pgs::export))]
    Export { message: String },

    #[error(transparent)]
    #[diagnostic(code(pgs::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(pgs::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    #[diagnostic(code(pgs::toml))]
    Toml(#[from] toml::ser::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Turn a failed section outcome into an error. `url` names the
    /// backend for connection diagnostics.
    pub fn from_settled(settled: Settled, field: &str, url: &str) -> Option<Self> {
        match settled {
            Settled::Success => None,
            Settled::Invalid(reason) => Some(Self::Validation {
                field: field.into(),
                reason,
            }),
            Settled::Rejected(message) => Some(Self::Rejected { message }),
            Settled::Unreachable(reason) => Some(Self::ConnectionFailed {
                url: url.into(),
                reason,
            }),
            Settled::Dropped => Some(Self::Dropped),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Client(e) => CliError::ClientSetup {
                reason: e.to_string(),
            },
            CoreError::Export { message } => CliError::Export { message },
            CoreError::Io { path, source } => CliError::Write {
                path: path.display().to_string(),
                source,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { profile } => CliError::ProfileNotFound {
                name: profile,
                available: String::new(),
            },
            ConfigError::NoProfile => CliError::NoConfig {
                path: pgs_config::config_path().display().to_string(),
            },
            ConfigError::Serialization(e) => CliError::Toml(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_outcomes_map_to_exit_codes() {
        let url = "http://localhost:5000/";
        assert!(CliError::from_settled(Settled::Success, "nome", url).is_none());

        let cases = [
            (Settled::Invalid("x".into()), exit_code::USAGE),
            (Settled::Rejected("x".into()), exit_code::GENERAL),
            (Settled::Unreachable("x".into()), exit_code::CONNECTION),
            (Settled::Dropped, exit_code::GENERAL),
        ];
        for (settled, code) in cases {
            let err = CliError::from_settled(settled, "nome", url);
            assert_eq!(err.map(|e| e.exit_code()), Some(code));
        }
    }

    #[test]
    fn rejection_message_is_shown_verbatim() {
        let err = CliError::from_settled(
            Settled::Rejected("Aluno já cadastrado".into()),
            "aluno",
            "http://localhost:5000/",
        );
        assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("Aluno já cadastrado"));
    }

    #[test]
    fn client_setup_failure_is_a_general_error() {
        let err = CliError::ClientSetup {
            reason: "TLS error: invalid CA cert".into(),
        };
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
