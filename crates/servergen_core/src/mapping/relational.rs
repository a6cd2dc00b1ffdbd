//! Storage types shared by every relational dialect.
//!
//! The Rust-side storage type of a field does not depend on which SQL engine backs it; only the column types
//! differ. Each SQL dialect module delegates here for the storage half of its mapping.

use crate::vocab::field_kinds::FieldKindId;

/// Storage type used when a field kind is not recognized.
pub const FALLBACK_STORAGE: &str = "String";

/// Rust storage type for `kind` in generated SQL-backed models.
pub const fn storage(kind: FieldKindId) -> &'static str {
    match kind {
        FieldKindId::Boolean => "bool",
        FieldKindId::Integer => "i32",
        FieldKindId::Long => "i64",
        FieldKindId::Float => "f32",
        FieldKindId::Double => "f64",
        FieldKindId::BigDecimal => "bigdecimal::BigDecimal",
        FieldKindId::String => "String",
        FieldKindId::Uuid => "uuid::Uuid",
        FieldKindId::LocalDate => "chrono::NaiveDate",
        FieldKindId::Instant => "NaiveDateTime",
        FieldKindId::ZonedDateTime => "NaiveDateTime",
        FieldKindId::Duration => "i64",
        FieldKindId::TextBlob => "String",
        FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob => "Vec<u8>",
    }
}
