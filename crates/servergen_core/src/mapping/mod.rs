//! Field-kind to backend type mapping.
//!
//! Each dialect module exposes one **total** `map` function over [`FieldKindId`] plus a `FALLBACK` row used
//! for unrecognized kinds. [`resolve`] picks the active dialect's row and applies the nullability wrapper,
//! which is dialect-independent and happens after the dialect lookup.
//!
//! ## Examples
//! ```rust
//! use servergen_core::mapping;
//! use servergen_core::vocab::dialects::Dialect;
//! use servergen_core::vocab::field_kinds::FieldKindId;
//!
//! let ty = mapping::resolve(Some(FieldKindId::BigDecimal), Dialect::Postgresql, false);
//! assert_eq!(ty.storage_type, "Option<bigdecimal::BigDecimal>");
//! assert_eq!(ty.column_type, "DECIMAL");
//!
//! // Unknown kinds fall back to the dialect's text type
//! let ty = mapping::resolve(None, Dialect::Sqlite, true);
//! assert_eq!(ty.column_type, "TEXT");
//! assert!(ty.fallback);
//! ```

pub mod mongodb;
pub mod mysql;
pub mod postgresql;
pub mod relational;
pub mod sqlite;

use crate::vocab::dialects::Dialect;
use crate::vocab::field_kinds::FieldKindId;

/// One row of a dialect mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectType {
    /// Native storage type of the generated model field (before the nullability wrapper).
    pub storage: &'static str,
    /// SQL column type, or the BSON type tag for the document dialect.
    pub column: &'static str,
    /// ORM schema column type; `None` for the document dialect.
    pub orm_column: Option<&'static str>,
}

impl DialectType {
    pub const fn sql(storage: &'static str, column: &'static str, orm_column: &'static str) -> Self {
        Self {
            storage,
            column,
            orm_column: Some(orm_column),
        }
    }

    pub const fn document(storage: &'static str, bson_tag: &'static str) -> Self {
        Self {
            storage,
            column: bson_tag,
            orm_column: None,
        }
    }
}

/// Look up the mapping row for `kind` in `dialect`'s table.
pub const fn lookup(kind: FieldKindId, dialect: Dialect) -> DialectType {
    match dialect {
        Dialect::Sqlite => sqlite::map(kind),
        Dialect::Postgresql => postgresql::map(kind),
        Dialect::Mysql => mysql::map(kind),
        Dialect::Mongodb => mongodb::map(kind),
    }
}

/// The row used for unrecognized kinds in `dialect`.
pub const fn fallback(dialect: Dialect) -> DialectType {
    match dialect {
        Dialect::Sqlite => sqlite::FALLBACK,
        Dialect::Postgresql => postgresql::FALLBACK,
        Dialect::Mysql => mysql::FALLBACK,
        Dialect::Mongodb => mongodb::FALLBACK,
    }
}

/// The fully resolved projection of one field onto one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Storage type, wrapped in `Option<...>` when the field is not required.
    pub storage_type: String,
    pub column_type: String,
    pub orm_column_type: Option<String>,
    /// `true` when the kind was not recognized and the dialect fallback was used.
    pub fallback: bool,
}

/// Resolve a field kind for a dialect.
///
/// `kind` is `None` when the entity model used a spelling the registry does not know; that is not an error,
/// the dialect's fallback row is used instead.
pub fn resolve(kind: Option<FieldKindId>, dialect: Dialect, required: bool) -> ResolvedType {
    let row = match kind {
        Some(kind) => lookup(kind, dialect),
        None => fallback(dialect),
    };
    ResolvedType {
        storage_type: wrap_optional(row.storage, required),
        column_type: row.column.to_string(),
        orm_column_type: row.orm_column.map(str::to_string),
        fallback: kind.is_none(),
    }
}

/// Apply the nullability wrapper.
pub fn wrap_optional(storage: &str, required: bool) -> String {
    if required {
        storage.to_string()
    } else {
        format!("Option<{storage}>")
    }
}

/// SQL column types of one kind across every relational backend.
///
/// Generated migrations and docs sometimes need the column type of a backend other than the active one (for
/// example a README listing the PostgreSQL type next to the SQLite one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationalColumns {
    pub sqlite: &'static str,
    pub postgresql: &'static str,
    pub mysql: &'static str,
}

pub fn relational_columns(kind: Option<FieldKindId>) -> RelationalColumns {
    let column = |dialect| match kind {
        Some(kind) => lookup(kind, dialect).column,
        None => fallback(dialect).column,
    };
    RelationalColumns {
        sqlite: column(Dialect::Sqlite),
        postgresql: column(Dialect::Postgresql),
        mysql: column(Dialect::Mysql),
    }
}
