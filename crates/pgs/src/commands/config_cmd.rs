//! Config subcommand handlers.

use dialoguer::{Input, Select};

use pgs_core::LayoutPreset;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn save_config(cfg: &Config) -> Result<std::path::PathBuf, CliError> {
    Ok(config::save_config(cfg)?)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ Period Grade System: configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let server: String = Input::new()
                .with_prompt("Backend URL")
                .default("http://localhost:5000".into())
                .validate_with(|input: &String| {
                    config::parse_server(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let layouts = [LayoutPreset::Dashboard, LayoutPreset::Tabs];
            let labels = ["Dashboard (modals)", "Tabs"];
            let layout_selection = Select::new()
                .with_prompt("Page layout")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(server);
            profile.layout = layouts.get(layout_selection).copied();

            let mut cfg = config::load_config().unwrap_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: pgs module list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let text = toml::to_string_pretty(&cfg)?;
            let out = output::render_single(
                global.output(),
                &cfg,
                |_| text.trim_end().to_owned(),
                |_| config::active_profile_name(global, &cfg),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── SetServer <url> ─────────────────────────────────────────
        ConfigCommand::SetServer { url } => {
            config::parse_server(&url)?;
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            cfg.profiles
                .entry(profile_name.clone())
                .and_modify(|p| p.server.clone_from(&url))
                .or_insert_with(|| Profile::new(url.clone()));
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Server for profile '{profile_name}' set to {url}");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: pgs config init");
            } else {
                for (name, profile) in &cfg.profiles {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}\t{}", profile.server);
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }
    }
}
