//! Database dialect vocabulary.
//!
//! A dialect selects which mapping table is active for a generation run. The canonical spellings are the
//! product names used in project configuration; the neutral names (`lite`, `relational-a`, `relational-b`,
//! `document`) are accepted as aliases.
//!
//! ## Examples
//! ```rust
//! use servergen_core::vocab::dialects::{self, Dialect};
//!
//! assert_eq!(dialects::from_str("relational-a"), Some(Dialect::Postgresql));
//! assert_eq!(dialects::as_str(Dialect::Mongodb), "mongodb");
//! assert!(Dialect::Mysql.is_relational());
//! ```

use super::registry::{self, VocabInfo, info};

/// Stable identifier for a backend storage dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Sqlite,
    Postgresql,
    Mysql,
    Mongodb,
}

/// Metadata for a dialect.
pub type DialectInfo = VocabInfo<Dialect>;

/// Registry of supported dialects.
pub const DIALECTS: &[DialectInfo] = &[
    info(
        Dialect::Sqlite,
        "sqlite",
        &["lite"],
        "File-based relational database, used as the development default.",
    ),
    info(
        Dialect::Postgresql,
        "postgresql",
        &["relational-a", "postgres"],
        "Full-featured relational database.",
    ),
    info(
        Dialect::Mysql,
        "mysql",
        &["relational-b"],
        "Relational database with MySQL column conventions.",
    ),
    info(
        Dialect::Mongodb,
        "mongodb",
        &["document", "mongo"],
        "Document store without an enforced schema.",
    ),
];

/// Resolve a spelling to a [`Dialect`].
pub fn from_str(name: &str) -> Option<Dialect> {
    registry::lookup(DIALECTS, name)
}

/// Return the canonical spelling for a dialect.
pub fn as_str(id: Dialect) -> &'static str {
    registry::row(DIALECTS, id).canonical
}

/// Iterate every dialect in registry order.
pub fn all() -> impl Iterator<Item = Dialect> {
    DIALECTS.iter().map(|d| d.id)
}

impl Dialect {
    /// Relational dialects get an ORM schema, SQL migrations and the schema-sync step.
    pub const fn is_relational(self) -> bool {
        !matches!(self, Dialect::Mongodb)
    }

    pub const fn is_document(self) -> bool {
        matches!(self, Dialect::Mongodb)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}
