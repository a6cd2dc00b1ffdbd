//! PostgreSQL column mapping.

use super::{DialectType, relational};
use crate::vocab::field_kinds::FieldKindId;

pub const FALLBACK: DialectType = DialectType::sql(relational::FALLBACK_STORAGE, "VARCHAR(255)", "Varchar");

pub const fn map(kind: FieldKindId) -> DialectType {
    let (column, orm) = match kind {
        FieldKindId::Boolean => ("BOOLEAN", "Bool"),
        FieldKindId::Integer => ("INTEGER", "Int4"),
        FieldKindId::Long => ("BIGINT", "Int8"),
        FieldKindId::Float => ("REAL", "Float4"),
        FieldKindId::Double => ("DOUBLE PRECISION", "Float8"),
        FieldKindId::BigDecimal => ("DECIMAL", "Numeric"),
        FieldKindId::String => ("VARCHAR(255)", "Varchar"),
        FieldKindId::Uuid => ("UUID", "Uuid"),
        FieldKindId::LocalDate => ("DATE", "Date"),
        FieldKindId::Instant => ("TIMESTAMP", "Timestamp"),
        FieldKindId::ZonedDateTime => ("TIMESTAMP WITH TIME ZONE", "Timestamptz"),
        FieldKindId::Duration => ("BIGINT", "Int8"),
        FieldKindId::TextBlob => ("TEXT", "Text"),
        FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob => ("BYTEA", "Bytea"),
    };
    DialectType::sql(relational::storage(kind), column, orm)
}
