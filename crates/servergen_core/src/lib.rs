//! Provide shared, pure vocabulary and semantic helpers for the servergen backend generator.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both the
//! generator and its tooling use:
//! - the vocabulary registries for field kinds, dialects and project options ([`vocab`]),
//! - the per-dialect type mapping tables ([`mapping`]),
//! - the identifier normalizer every path and symbol name goes through ([`naming`]).
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no generator-specific types.

pub mod mapping;
pub mod naming;
pub mod vocab;

pub use mapping::{ResolvedType, resolve};
pub use naming::normalize;
pub use vocab::dialects::Dialect;
pub use vocab::field_kinds::FieldKindId;
