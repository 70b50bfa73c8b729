//! CLI configuration, a thin wrapper around `pgs_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--server, --timeout, etc.).

use clap::ValueEnum;

use pgs_core::SessionConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use pgs_config::{
    Config, Profile, config_path, load_config, parse_server, profile_to_session_config,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill output and color from the config defaults where no flag was given.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Build the session from the active profile plus flag overrides.
///
/// `--server` alone is enough to run without any config file. An
/// explicitly named profile must exist.
pub fn resolve_session(global: &GlobalOpts, config: &Config) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&profile_name), &global.server) {
        (Some(profile), _) => profile.clone(),
        (None, Some(server)) => Profile::new(server.clone()),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // Flags beat the profile.
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if let Some(layout) = global.layout {
        profile.layout = Some(layout);
    }

    tracing::debug!(profile = %profile_name, server = %profile.server, "resolved session");
    Ok(profile_to_session_config(&profile, &config.defaults)?)
}

/// Comma-separated profile names, for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
