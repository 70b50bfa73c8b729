//! Shared helpers for command handlers.

use std::io::IsTerminal;

use pgs_core::{Fragment, Sections, Settled};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Regions an action wrote to: where its banner goes and, for actions
/// that show data, where the data goes.
#[derive(Debug, Clone, Copy)]
pub struct Regions<'a> {
    pub message: &'a str,
    pub content: Option<&'a str>,
}

impl<'a> Regions<'a> {
    pub fn message(message: &'a str) -> Self {
        Self {
            message,
            content: None,
        }
    }

    pub fn with_content(message: &'a str, content: &'a str) -> Self {
        Self {
            message,
            content: Some(content),
        }
    }
}

/// Print what an action rendered and turn its settled state into a
/// result. `field` names the input for validation diagnostics.
///
/// Data goes to stdout in the chosen format. The banner goes to stderr
/// unless it is the data itself (listings show "nothing found" banners
/// in place of the table).
pub fn finish(
    sections: &Sections,
    settled: Settled,
    field: &str,
    regions: Regions<'_>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(err) = CliError::from_settled(settled, field, &server_url(sections)) {
        return Err(err);
    }

    let page = sections.page();
    let color = output::should_color(global.color());
    let format = global.output();

    let content = regions
        .content
        .and_then(|id| page.region(id))
        .filter(|f| !f.is_empty());
    let shown_inline = regions.content == Some(regions.message);

    match content {
        Some(fragment) => {
            let out = output::render_fragment(format, &fragment, color)?;
            output::print_output(&out, global.quiet);
        }
        None if is_structured(format) => {
            let message = page.region(regions.message).unwrap_or_default();
            let out = output::render_fragment(format, &message, color)?;
            output::print_output(&out, global.quiet);
        }
        None => {}
    }

    if !shown_inline {
        print_banner(sections, regions.message, global);
    }
    Ok(())
}

/// Banner in `region`, printed to stderr.
pub fn print_banner(sections: &Sections, region: &str, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    if let Some(Fragment::Banner(banner)) = sections.page().region(region) {
        eprintln!(
            "{}",
            output::banner_line(&banner, output::should_color(global.color()))
        );
    }
}

/// Base URL of the backend, for connection diagnostics.
pub fn server_url(sections: &Sections) -> String {
    sections.client().dispatcher().base_url().to_string()
}

fn is_structured(format: OutputFormat) -> bool {
    !matches!(format, OutputFormat::Table | OutputFormat::Plain)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
