//! Clap derive structures for the `pgs` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use pgs_core::{ExportFormat, LayoutPreset};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pgs -- manage students, modules and grades from the command line
#[derive(Debug, Parser)]
#[command(
    name = "pgs",
    version,
    about = "Manage students, modules and grades of the Period Grade System",
    long_about = "A command-line front end for the Period Grade System backend.\n\n\
        Every command fills the same forms the web pages use, runs the\n\
        matching section action, and prints the regions it rendered.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "PGS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend URL (overrides profile)
    #[arg(long, short = 's', env = "PGS_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "PGS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Page layout whose region and field names the actions use
    #[arg(long, global = true)]
    pub layout: Option<LayoutPreset>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PGS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PGS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// The rendered page fragment markup
    Html,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add, edit, delete, search and show students
    #[command(alias = "students", alias = "aluno")]
    Student(StudentArgs),

    /// Create, delete and list modules and their members
    #[command(alias = "modules", alias = "modulo")]
    Module(ModuleArgs),

    /// Show and write per-module grade records
    #[command(alias = "grades", alias = "notas")]
    Grade(GradeArgs),

    /// Check CPF, e-mail and phone values locally
    Validate(ValidateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  STUDENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[command(subcommand)]
    pub command: StudentCommand,
}

/// Fields of the student form.
#[derive(Debug, Args)]
pub struct StudentFields {
    /// Full name
    #[arg(long)]
    pub nome: String,

    /// Enrollment date (YYYY-MM-DD)
    #[arg(long = "data")]
    pub data_matricula: String,

    /// Number of medical certificates
    #[arg(long, default_value = "0")]
    pub atestados: String,

    /// Referral notes
    #[arg(long, default_value = "")]
    pub encaminhamento: String,

    /// Free-form observations
    #[arg(long, default_value = "")]
    pub obs: String,
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Register a new student
    Add {
        /// Enrollment number
        #[arg(long)]
        matricula: String,

        #[command(flatten)]
        fields: StudentFields,
    },

    /// Replace a student's details
    Edit {
        /// Enrollment number of the student to edit
        matricula: String,

        #[command(flatten)]
        fields: StudentFields,
    },

    /// Delete a student
    #[command(alias = "rm")]
    Delete {
        /// Enrollment number
        matricula: String,
    },

    /// Search by enrollment number or name
    Search {
        /// Enrollment number (exact)
        #[arg(long, short = 'm', default_value = "")]
        matricula: String,

        /// Name (partial match)
        #[arg(long, short = 'n', default_value = "")]
        nome: String,
    },

    /// Show one student by numeric id
    Show {
        /// Student id
        id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MODULES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ModuleArgs {
    #[command(subcommand)]
    pub command: ModuleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ModuleCommand {
    /// Create a module
    Create {
        /// Module name
        nome: String,
    },

    /// Delete a module by name
    #[command(alias = "rm")]
    Delete {
        /// Module name
        nome: String,
    },

    /// List all modules
    #[command(alias = "ls")]
    List,

    /// List the students of a module with their grades
    Members {
        /// Module id
        id: i64,

        /// Also export the member rows to a file
        #[arg(long, value_name = "FORMAT")]
        export: Option<ExportFormat>,

        /// Directory the export is written to
        #[arg(long, default_value = ".", requires = "export")]
        dir: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GRADES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GradeArgs {
    #[command(subcommand)]
    pub command: GradeCommand,
}

/// Identifies one grade record.
#[derive(Debug, Clone, Copy, Args)]
pub struct GradeKey {
    /// Student id
    pub aluno_id: i64,

    /// Module id
    pub module_id: i64,
}

/// Grade form values. Decimals accept `,` or `.`.
#[derive(Debug, Args)]
pub struct GradeFields {
    /// Absences
    #[arg(long)]
    pub faltas: Option<String>,

    /// Tutor grade
    #[arg(long)]
    pub nota_tutor: Option<String>,

    /// Regular assessment grade
    #[arg(long = "nota-regular")]
    pub nota_avaliacao_regular: Option<String>,

    /// Recovery grade
    #[arg(long)]
    pub nota_recuperacao: Option<String>,

    /// Final grade
    #[arg(long)]
    pub nota_final: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum GradeCommand {
    /// Show a grade record
    #[command(alias = "get")]
    Show {
        #[command(flatten)]
        key: GradeKey,
    },

    /// Update only the given fields of a grade record
    Set {
        #[command(flatten)]
        key: GradeKey,

        #[command(flatten)]
        fields: GradeFields,
    },

    /// Enroll a student in a module with a complete grade record
    Assign {
        #[command(flatten)]
        key: GradeKey,

        #[command(flatten)]
        fields: GradeFields,
    },

    /// Overwrite every field of a grade record
    Replace {
        #[command(flatten)]
        key: GradeKey,

        #[command(flatten)]
        fields: GradeFields,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VALIDATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[command(subcommand)]
    pub command: ValidateCommand,
}

#[derive(Debug, Subcommand)]
pub enum ValidateCommand {
    /// Check a CPF number (punctuation is ignored)
    Cpf { value: String },

    /// Check an e-mail address
    Email { value: String },

    /// Check a phone in the (DD) DDDDD-DDDD format
    Phone { value: String },

    /// Format raw digits as a phone number
    MaskPhone { value: String },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the backend URL of the active profile, creating it if needed
    SetServer {
        /// Backend URL (http or https)
        url: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
