//! MySQL column mapping.

use super::{DialectType, relational};
use crate::vocab::field_kinds::FieldKindId;

pub const FALLBACK: DialectType = DialectType::sql(relational::FALLBACK_STORAGE, "VARCHAR(255)", "Varchar");

pub const fn map(kind: FieldKindId) -> DialectType {
    let (column, orm) = match kind {
        FieldKindId::Boolean => ("BOOLEAN", "Bool"),
        FieldKindId::Integer => ("INTEGER", "Integer"),
        FieldKindId::Long => ("BIGINT", "Bigint"),
        FieldKindId::Float => ("FLOAT", "Float"),
        FieldKindId::Double => ("DOUBLE", "Double"),
        FieldKindId::BigDecimal => ("DECIMAL(21,2)", "Numeric"),
        FieldKindId::String => ("VARCHAR(255)", "Varchar"),
        FieldKindId::Uuid => ("VARCHAR(36)", "Varchar"),
        FieldKindId::LocalDate => ("DATE", "Date"),
        FieldKindId::Instant | FieldKindId::ZonedDateTime => ("DATETIME", "Datetime"),
        FieldKindId::Duration => ("BIGINT", "Bigint"),
        FieldKindId::TextBlob => ("TEXT", "Text"),
        FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob => ("LONGBLOB", "Blob"),
    };
    DialectType::sql(relational::storage(kind), column, orm)
}
