#![forbid(unsafe_code)]
//! Backend server generator
//!
//! Turns an entity model and a small set of project options into a complete backend source tree, and keeps
//! that tree consistent across repeated runs: migrations are never duplicated and aggregator files grow by
//! exactly one fragment per entity per marker.
//!
//! The pure vocabulary (field kinds, dialects, type mapping, name normalization) lives in `servergen_core`;
//! this crate owns everything that touches the filesystem.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `generate`
//!   modules enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a generator bug (logic error), use `panic!("INVARIANT: reason")`
//!   with a clear explanation.

pub mod cli;
pub mod config;
pub mod generate;
pub mod inject;
pub mod metadata;
pub mod migrate;
pub mod model;
pub mod plan;
pub mod render;
pub mod version;

pub use config::{ConfigError, GenerationConfig};
pub use generate::{GenerateError, Generator, RunReport};
pub use inject::{Injector, StrictInjector, TolerantInjector, insert_before_marker};
pub use migrate::MigrationRegistry;
pub use model::{EntityDescriptor, FieldSpec};
pub use plan::{OutputGroup, ResolvedFile, Template, plan};
pub use render::{DirectoryTemplates, MemoryTemplates, PlaceholderRenderer};
