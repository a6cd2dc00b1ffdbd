//! Application model: entity descriptors and their dialect-specific annotation.
//!
//! - `entity` - descriptors as read from entity JSON files, plus the loader
//! - `annotate` - TypeMapper and NameNormalizer applied to entities

pub mod annotate;
pub mod entity;

use std::path::PathBuf;

use thiserror::Error;

pub use annotate::{AnnotatedEntity, AnnotatedField, annotate, map_field};
pub use entity::{EntityDescriptor, FieldSpec, Relationship, load_entities};

/// Errors in the entity model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read entity file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid entity file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("entity '{entity}' has no changelogDate; its migration cannot be keyed")]
    MissingChangelogDate { entity: String },

    #[error("entity '{entity}' has a non-numeric changelogDate '{value}'")]
    InvalidChangelogDate { entity: String, value: String },
}
