//! Command handlers. Each fills the page's form fields from its
//! arguments, runs one section action and prints the regions it wrote.

pub mod config_cmd;
pub mod grades;
pub mod modules;
pub mod students;
pub mod util;
pub mod validate;

use pgs_core::Sections;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a backend command to its handler.
pub async fn dispatch(
    cmd: Command,
    sections: &Sections,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Student(args) => students::handle(sections, args, global).await,
        Command::Module(args) => modules::handle(sections, args, global).await,
        Command::Grade(args) => grades::handle(sections, args, global).await,
        Command::Validate(args) => validate::handle(args, global),
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Ok(()),
    }
}
