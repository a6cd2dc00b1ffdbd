//! Abstract field-kind vocabulary.
//!
//! Entity models describe each field with an abstract kind (`"String"`, `"BigDecimal"`, `"Instant"`...). This
//! registry is the single source of truth for the accepted spellings. Backend-specific projections live in
//! [`crate::mapping`].
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**, matching the spellings entity files use.
//! - The neutral names `Decimal`, `Date` and `DateTime` are accepted as aliases.
//! - An unknown spelling is not an error here; callers fall back to the dialect's text type.
//!
//! ## Examples
//! ```rust
//! use servergen_core::vocab::field_kinds::{self, FieldKindId};
//!
//! assert_eq!(field_kinds::from_str("BigDecimal"), Some(FieldKindId::BigDecimal));
//! assert_eq!(field_kinds::from_str("Decimal"), Some(FieldKindId::BigDecimal));
//! assert_eq!(field_kinds::as_str(FieldKindId::LocalDate), "LocalDate");
//! assert_eq!(field_kinds::from_str("Geometry"), None);
//! ```

use super::registry::{self, VocabInfo, info};

/// Stable identifier for every abstract field kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKindId {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    BigDecimal,
    String,
    Uuid,
    LocalDate,
    Instant,
    ZonedDateTime,
    Duration,
    TextBlob,
    Blob,
    AnyBlob,
    ImageBlob,
}

/// Metadata for a field kind.
pub type FieldKindInfo = VocabInfo<FieldKindId>;

/// Registry of all field kinds, in declaration order.
pub const FIELD_KINDS: &[FieldKindInfo] = &[
    info(FieldKindId::Boolean, "Boolean", &["Bool"], "True/false flag."),
    info(FieldKindId::Integer, "Integer", &["Int"], "32-bit signed integer."),
    info(FieldKindId::Long, "Long", &[], "64-bit signed integer."),
    info(FieldKindId::Float, "Float", &[], "Single-precision floating point."),
    info(FieldKindId::Double, "Double", &[], "Double-precision floating point."),
    info(
        FieldKindId::BigDecimal,
        "BigDecimal",
        &["Decimal"],
        "Arbitrary-precision decimal.",
    ),
    info(FieldKindId::String, "String", &[], "Bounded text."),
    info(FieldKindId::Uuid, "UUID", &["Uuid"], "128-bit universally unique identifier."),
    info(FieldKindId::LocalDate, "LocalDate", &["Date"], "Calendar date without time."),
    info(
        FieldKindId::Instant,
        "Instant",
        &["DateTime"],
        "Point in time without zone information.",
    ),
    info(
        FieldKindId::ZonedDateTime,
        "ZonedDateTime",
        &[],
        "Point in time with a zone offset.",
    ),
    info(FieldKindId::Duration, "Duration", &[], "Elapsed time, stored as a count."),
    info(FieldKindId::TextBlob, "TextBlob", &[], "Unbounded text."),
    info(FieldKindId::Blob, "Blob", &[], "Opaque binary payload."),
    info(FieldKindId::AnyBlob, "AnyBlob", &[], "Binary payload of any content type."),
    info(FieldKindId::ImageBlob, "ImageBlob", &[], "Binary image payload."),
];

/// Resolve a spelling to a [`FieldKindId`].
///
/// ## Returns
/// - `Some(FieldKindId)` if `name` is a canonical spelling or alias.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<FieldKindId> {
    registry::lookup(FIELD_KINDS, name)
}

/// Return the canonical spelling for a field kind.
pub fn as_str(id: FieldKindId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a field kind.
pub fn info_for(id: FieldKindId) -> &'static FieldKindInfo {
    registry::row(FIELD_KINDS, id)
}

/// Iterate every field kind in registry order.
pub fn all() -> impl Iterator<Item = FieldKindId> {
    FIELD_KINDS.iter().map(|k| k.id)
}

impl FieldKindId {
    /// Return `true` for the binary payload kinds.
    pub const fn is_blob(self) -> bool {
        matches!(self, FieldKindId::Blob | FieldKindId::AnyBlob | FieldKindId::ImageBlob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_canonical_kind() {
        assert_eq!(from_str("Decimal"), Some(FieldKindId::BigDecimal));
        assert_eq!(from_str("Date"), Some(FieldKindId::LocalDate));
        assert_eq!(from_str("DateTime"), Some(FieldKindId::Instant));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("string"), None);
        assert_eq!(from_str("String"), Some(FieldKindId::String));
    }

    #[test]
    fn test_blob_kinds() {
        let blobs: Vec<_> = all().filter(|k| k.is_blob()).collect();
        assert_eq!(blobs, vec![FieldKindId::Blob, FieldKindId::AnyBlob, FieldKindId::ImageBlob]);
    }
}
