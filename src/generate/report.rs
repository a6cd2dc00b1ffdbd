//! What a run did.

use std::fmt;

use super::error::EntityError;

/// An entity whose generation failed.
#[derive(Debug)]
pub struct EntityFailure {
    pub entity: String,
    pub error: EntityError,
}

/// Summary of one generation run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Written files, relative to the destination.
    pub written: Vec<String>,
    /// Existing files left untouched because they are only written once.
    pub kept: Vec<String>,
    /// Stale files removed during post-processing.
    pub removed: Vec<String>,
    pub migrations_created: Vec<String>,
    /// Tables whose migration already existed.
    pub migrations_skipped: Vec<String>,
    /// Built-in and server-skipped entities.
    pub skipped_entities: Vec<String>,
    pub injections: usize,
    /// Fragments already present in their target file.
    pub injections_present: usize,
    pub warnings: Vec<String>,
    pub failures: Vec<EntityFailure>,
}

impl RunReport {
    /// `false` when any entity failed; the CLI turns this into a non-zero exit.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn fail(&mut self, entity: &str, error: EntityError) {
        tracing::error!(entity, %error, "entity generation failed");
        self.failures.push(EntityFailure {
            entity: entity.to_string(),
            error,
        });
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} files written ({} kept), {} migrations created ({} already present), \
             {} injections ({} already present)",
            self.written.len(),
            self.kept.len(),
            self.migrations_created.len(),
            self.migrations_skipped.len(),
            self.injections,
            self.injections_present
        )?;
        if !self.removed.is_empty() {
            writeln!(f, "removed stale files: {}", self.removed.join(", "))?;
        }
        if !self.skipped_entities.is_empty() {
            writeln!(f, "skipped entities: {}", self.skipped_entities.join(", "))?;
        }
        for warning in &self.warnings {
            writeln!(f, "warning: {warning}")?;
        }
        for failure in &self.failures {
            writeln!(f, "error: entity '{}': {}", failure.entity, failure.error)?;
        }
        Ok(())
    }
}
