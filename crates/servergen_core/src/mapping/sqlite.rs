//! SQLite column mapping.

use super::{DialectType, relational};
use crate::vocab::field_kinds::FieldKindId;

pub const FALLBACK: DialectType = DialectType::sql(relational::FALLBACK_STORAGE, "TEXT", "Text");

pub const fn map(kind: FieldKindId) -> DialectType {
    let (column, orm) = match kind {
        FieldKindId::Boolean => ("BOOLEAN", "Bool"),
        FieldKindId::Integer => ("INTEGER", "Integer"),
        FieldKindId::Long => ("BIGINT", "BigInt"),
        FieldKindId::Float => ("REAL", "Float"),
        FieldKindId::Double => ("REAL", "Double"),
        FieldKindId::BigDecimal => ("DECIMAL", "Numeric"),
        FieldKindId::String => ("TEXT", "Text"),
        // SQLite has no native UUID type
        FieldKindId::Uuid => ("TEXT", "Text"),
        FieldKindId::LocalDate => ("DATE", "Date"),
        FieldKindId::Instant | FieldKindId::ZonedDateTime => ("TIMESTAMP", "Timestamp"),
        FieldKindId::Duration => ("BIGINT", "BigInt"),
        FieldKindId::TextBlob => ("TEXT", "Text"),
        FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob => ("BLOB", "Binary"),
    };
    DialectType::sql(relational::storage(kind), column, orm)
}
