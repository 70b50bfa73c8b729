mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pgs_core::Sections;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);
    install_panic_hook();

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Log panics through tracing before the default report.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "unexpected panic");
        default_hook(info);
    }));
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    // Shell completions need neither config nor backend
    if let Command::Completions(ref args) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "pgs", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config()?;
    config::apply_defaults(&mut cli.global, &cfg);

    match cli.command {
        // Local commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),
        Command::Validate(args) => commands::validate::handle(args, &cli.global),

        // All other commands drive the section actions against a backend
        cmd => {
            let session = config::resolve_session(&cli.global, &cfg)?;
            let sections = Sections::connect(&session)?;

            tracing::debug!(command = ?cmd, server = %session.base_url, "dispatching command");
            let result = commands::dispatch(cmd, &sections, &cli.global).await;
            sections.page().close();
            result
        }
    }
}
