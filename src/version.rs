//! servergen version information.
//!
//! This module exposes the generator version as a single constant so all subsystems (CLI, render context,
//! generated file headers) agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.
//! - Prefer this constant over repeating `env!("CARGO_PKG_VERSION")` in multiple places.

/// The servergen version string (for example, `0.1.0-alpha.1`).
pub const SERVERGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
