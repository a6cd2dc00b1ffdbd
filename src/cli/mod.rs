//! CLI module for the server generator
//!
//! ## Commands
//!
//! - `generate` - Generate (or regenerate) a server into a destination directory
//! - `plan` - Print the files a run would write, without writing anything
//! - `types` - Print the field-kind mapping table of a dialect
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Some entities failed; everything else was generated.
    pub const PARTIAL: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Render a diagnostic with miette's report handler.
    pub fn diagnostic(err: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Backend server generator
#[derive(Parser, Debug)]
#[command(name = "servergen")]
#[command(version = VERSION)]
#[command(about = "Generate a backend server from an entity model", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Inputs shared by `generate` and `plan`.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Destination directory of the generated project
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
    /// Project file (default: <out>/.servergen.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Directory of entity JSON files (default: <out>/.servergen)
    #[arg(short, long, value_name = "DIR")]
    pub entities: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate or regenerate the server
    Generate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Template directory
        #[arg(short, long, value_name = "DIR")]
        templates: PathBuf,
        /// Warn instead of failing when an injection marker is missing
        #[arg(long)]
        tolerant: bool,
        /// Run `diesel migration run` after writing migrations
        #[arg(long)]
        sync_schema: bool,
    },

    /// Print the planned files without writing anything
    Plan {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// Print the type mapping table of a dialect
    Types {
        /// Dialect name or alias
        #[arg(value_name = "DIALECT", default_value = "sqlite")]
        dialect: String,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            project,
            templates,
            tolerant,
            sync_schema,
        } => commands::generate(&project, &templates, tolerant, sync_schema),
        Command::Plan { project } => commands::plan(&project),
        Command::Types { dialect } => commands::types(&dialect),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let args = ["servergen", "generate", "-t", "templates", "--out", "shop", "--tolerant"];
        let cli = Cli::try_parse_from(args).unwrap();
        if let Command::Generate {
            project,
            templates,
            tolerant,
            sync_schema,
        } = cli.command
        {
            assert_eq!(project.out, PathBuf::from("shop"));
            assert_eq!(templates, PathBuf::from("templates"));
            assert!(tolerant);
            assert!(!sync_schema);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_generate_requires_templates() {
        assert!(Cli::try_parse_from(["servergen", "generate"]).is_err());
    }

    #[test]
    fn test_cli_parse_plan_defaults() {
        let cli = Cli::try_parse_from(["servergen", "plan"]).unwrap();
        if let Command::Plan { project } = cli.command {
            assert_eq!(project.out, PathBuf::from("."));
            assert!(project.config.is_none());
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn test_cli_parse_types() {
        let cli = Cli::try_parse_from(["servergen", "types", "relational-b"]).unwrap();
        assert!(matches!(cli.command, Command::Types { ref dialect } if dialect == "relational-b"));
    }
}
