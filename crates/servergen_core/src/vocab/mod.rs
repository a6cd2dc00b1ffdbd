//! Generator vocabulary registries.
//!
//! This module is the "front door" for the names a project configuration or entity file may use: abstract
//! field kinds, database dialects, and project options. Callers work with **stable IDs** and look spellings up
//! in the registry tables instead of comparing strings at each call site.
//!
//! ## Notes
//! - Registries are **pure**: no IO, no side effects.
//! - Each registry accepts a canonical spelling plus aliases.

pub mod dialects;
pub mod field_kinds;
pub mod options;
pub mod registry;
