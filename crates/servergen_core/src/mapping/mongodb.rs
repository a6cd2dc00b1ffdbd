//! MongoDB mapping.
//!
//! The document store enforces no schema, so the column half of the mapping is the BSON type tag used in
//! schema documentation and validators. There is no ORM column type.

use super::DialectType;
use crate::vocab::field_kinds::FieldKindId;

pub const FALLBACK: DialectType = DialectType::document("String", "string");

pub const fn map(kind: FieldKindId) -> DialectType {
    match kind {
        FieldKindId::Boolean => DialectType::document("bool", "bool"),
        FieldKindId::Integer => DialectType::document("i32", "int"),
        FieldKindId::Long => DialectType::document("i64", "long"),
        FieldKindId::Float | FieldKindId::Double => DialectType::document("f64", "double"),
        // The Rust driver has no native Decimal128 support
        FieldKindId::BigDecimal => DialectType::document("f64", "double"),
        FieldKindId::String => DialectType::document("String", "string"),
        FieldKindId::Uuid => DialectType::document("String", "string"),
        FieldKindId::LocalDate => DialectType::document("chrono::NaiveDate", "date"),
        FieldKindId::Instant | FieldKindId::ZonedDateTime => DialectType::document("bson::DateTime", "date"),
        FieldKindId::Duration => DialectType::document("i64", "long"),
        FieldKindId::TextBlob => DialectType::document("String", "string"),
        FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob => {
            DialectType::document("bson::Binary", "binData")
        }
    }
}
