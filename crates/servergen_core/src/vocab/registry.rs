//! Shareable metadata for `servergen_core::vocab` registries.
//!
//! Every vocabulary in this crate (field kinds, dialects, authentication modes, deployment topologies, CI
//! providers) is a **registry-first** table: a stable `Copy` identifier plus a `const` slice of metadata rows.
//! This submodule holds the small metadata types shared by all of them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Lookup helpers live next to each registry; this module has no behavior of its own.
//!
//! ## See also
//! - [`crate::vocab::field_kinds`]
//! - [`crate::vocab::dialects`]
//! - [`crate::vocab::options`]

/// Shared metadata shape for registry entries.
///
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description`)
///
/// ## Notes
/// - `canonical` is the spelling written back into generated configuration and docs.
/// - `aliases` are additional spellings accepted when reading configuration or entity files.
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

impl<Id: Copy + PartialEq> VocabInfo<Id> {
    /// Return `true` if `spelling` is the canonical name or one of the aliases.
    pub fn matches(&self, spelling: &str) -> bool {
        self.canonical == spelling || self.aliases.contains(&spelling)
    }
}

/// Resolve a spelling against a registry table.
pub(crate) fn lookup<Id: Copy + PartialEq>(table: &[VocabInfo<Id>], spelling: &str) -> Option<Id> {
    table.iter().find(|info| info.matches(spelling)).map(|info| info.id)
}

/// Find the metadata row for `id`.
///
/// ## Panics
/// - If the registry is missing an entry for `id`. The guardrail tests cover every id, so this indicates a
///   programming error.
pub(crate) fn row<Id: Copy + PartialEq + std::fmt::Debug>(
    table: &'static [VocabInfo<Id>],
    id: Id,
) -> &'static VocabInfo<Id> {
    table
        .iter()
        .find(|info| info.id == id)
        .unwrap_or_else(|| panic!("INVARIANT: registry row missing for {id:?}"))
}

pub(crate) const fn info<Id>(
    id: Id,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
) -> VocabInfo<Id> {
    VocabInfo {
        id,
        canonical,
        aliases,
        description,
    }
}
