//! Run-level and per-entity errors.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::inject::InjectError;
use crate::migrate::MigrationError;
use crate::model::ModelError;
use crate::plan::PlanningError;
use crate::render::RenderError;

/// Errors that abort a generation run.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(code(servergen::config), help("check the project file options and their spellings"))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(servergen::entities))]
    Entities(#[from] ModelError),

    #[error("planning failed, nothing was written: {0}")]
    #[diagnostic(
        code(servergen::planning),
        help("each exclusive choice must be satisfied by exactly one output group for the configured options")
    )]
    Planning(#[from] PlanningError),

    #[error("cannot render project file '{destination}': {source}")]
    #[diagnostic(code(servergen::render))]
    Render {
        destination: String,
        #[source]
        source: RenderError,
    },

    #[error("cannot write '{path}': {source}")]
    #[diagnostic(code(servergen::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(
        code(servergen::inject),
        help("restore the marker comment in the file, or rerun with --tolerant to skip missing markers")
    )]
    Inject(#[from] InjectError),
}

/// Errors confined to one entity; the run continues with the next entity.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("cannot render '{destination}': {source}")]
    Render {
        destination: String,
        #[source]
        source: RenderError,
    },

    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Migration(#[from] MigrationError),
}
