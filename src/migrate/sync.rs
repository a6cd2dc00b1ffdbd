//! Schema synchronization through an external migration tool.
//!
//! Sync runs once, after every migration of the run is written. Failures never abort generation: a missing
//! binary or a non-zero exit becomes a warning in the run report.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Outcome of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied,
    /// The tool was missing or failed; the message is user-facing.
    Warning(String),
}

/// Applies generated migrations to the development database.
pub trait SchemaSync {
    fn sync(&self, destination: &Path) -> SyncOutcome;
}

/// Runs `diesel migration run` in the destination.
#[derive(Debug, Clone)]
pub struct DieselCli {
    program: PathBuf,
}

impl Default for DieselCli {
    fn default() -> Self {
        Self {
            program: PathBuf::from("diesel"),
        }
    }
}

impl DieselCli {
    /// Use a specific executable instead of `diesel` from `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl SchemaSync for DieselCli {
    #[tracing::instrument(skip_all, fields(destination = %destination.display()))]
    fn sync(&self, destination: &Path) -> SyncOutcome {
        // The default sqlite URL points into target/db
        let db_dir = destination.join("target").join("db");
        if let Err(err) = fs::create_dir_all(&db_dir) {
            return warn(format!("cannot create '{}': {err}", db_dir.display()));
        }

        let output = match Command::new(&self.program)
            .arg("migration")
            .arg("run")
            .current_dir(destination)
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                return warn(format!(
                    "could not run '{}' ({err}); install diesel_cli and run `diesel migration run` manually",
                    self.program.display()
                ));
            }
        };

        if output.status.success() {
            tracing::info!("database migrations applied");
            SyncOutcome::Applied
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn(format!("`diesel migration run` failed: {}", stderr.trim()))
        }
    }
}

fn warn(message: String) -> SyncOutcome {
    tracing::warn!("{message}");
    SyncOutcome::Warning(message)
}
