//! Entity descriptors as read from entity JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use servergen_core::naming;
use servergen_core::vocab::field_kinds::{self, FieldKindId};

use super::ModelError;

/// Validation rule that marks a field as required.
pub const REQUIRED_RULE: &str = "required";

/// One entity of the application model.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    /// Entity class name, e.g. `OrderItem`.
    pub name: String,
    /// Change-log date; the identity of the entity's migration.
    #[serde(default)]
    pub changelog_date: Option<String>,
    #[serde(default)]
    pub entity_table_name: Option<String>,
    #[serde(default)]
    pub entity_api_url: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub skip_server: bool,
    #[serde(default)]
    pub built_in: bool,
}

/// One field of an entity.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub field_name: String,
    /// Abstract kind spelling, resolved through the field-kind registry.
    pub field_type: String,
    #[serde(default)]
    pub field_validate_rules: Vec<String>,
    #[serde(default)]
    pub skip_server: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub relationship_name: String,
    pub other_entity_name: String,
    pub relationship_type: String,
    #[serde(default)]
    pub join_table: Option<JoinTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinTable {
    pub name: String,
}

impl EntityDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_changelog_date(mut self, date: impl Into<String>) -> Self {
        self.changelog_date = Some(date.into());
        self
    }

    pub fn with_table_name(mut self, table: impl Into<String>) -> Self {
        self.entity_table_name = Some(table.into());
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Built-in and server-skipped entities never reach mapping, planning or migrations.
    pub fn is_generated(&self) -> bool {
        !self.skip_server && !self.built_in
    }

    /// Module and file name: the normalized entity name.
    pub fn file_name(&self) -> String {
        naming::normalize(&self.name)
    }

    pub fn class_name(&self) -> String {
        naming::to_pascal_case(&self.name)
    }

    pub fn table_name(&self) -> String {
        match &self.entity_table_name {
            Some(table) if !table.is_empty() => table.clone(),
            _ => self.file_name(),
        }
    }

    /// API path segment, defaulting to the pluralized kebab-case name (`order-items`).
    pub fn api_path(&self) -> String {
        match &self.entity_api_url {
            Some(url) if !url.is_empty() => url.trim_matches('/').to_string(),
            _ => naming::pluralize(&naming::to_kebab_case(&self.name)),
        }
    }

    /// The stable timestamp keying this entity's migration.
    ///
    /// It comes from the entity's own change-log date and never from the clock, so regenerating the entity
    /// computes the same migration directory name.
    pub fn stable_timestamp(&self) -> Result<&str, ModelError> {
        let date = self
            .changelog_date
            .as_deref()
            .ok_or_else(|| ModelError::MissingChangelogDate { entity: self.name.clone() })?;
        if date.is_empty() || !date.chars().all(|c| c.is_ascii_digit()) {
            return Err(ModelError::InvalidChangelogDate {
                entity: self.name.clone(),
                value: date.to_string(),
            });
        }
        Ok(date)
    }
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, required: bool) -> Self {
        Self {
            field_name: name.into(),
            field_type: kind.into(),
            field_validate_rules: if required { vec![REQUIRED_RULE.to_string()] } else { Vec::new() },
            skip_server: false,
        }
    }

    pub fn required(&self) -> bool {
        self.field_validate_rules.iter().any(|rule| rule == REQUIRED_RULE)
    }

    /// The registry kind, or `None` for a spelling the registry does not know.
    pub fn kind(&self) -> Option<FieldKindId> {
        field_kinds::from_str(&self.field_type)
    }
}

/// Load every `*.json` entity file in `dir`, ordered by file name.
pub fn load_entities(dir: &Path) -> Result<Vec<EntityDescriptor>, ModelError> {
    let read_dir = fs::read_dir(dir).map_err(|source| ModelError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| ModelError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| load_entity(path)).collect()
}

pub fn load_entity(path: &Path) -> Result<EntityDescriptor, ModelError> {
    let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entity_file() {
        let entity: EntityDescriptor = serde_json::from_str(
            r#"{
                "name": "OrderItem",
                "changelogDate": "20230101120000",
                "fields": [
                    { "fieldName": "quantity", "fieldType": "Integer", "fieldValidateRules": ["required", "min"] },
                    { "fieldName": "note", "fieldType": "TextBlob" }
                ],
                "relationships": [
                    { "relationshipName": "order", "otherEntityName": "order", "relationshipType": "many-to-one" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(entity.file_name(), "order_item");
        assert_eq!(entity.table_name(), "order_item");
        assert_eq!(entity.api_path(), "order-items");
        assert_eq!(entity.class_name(), "OrderItem");
        assert_eq!(entity.stable_timestamp().unwrap(), "20230101120000");
        assert!(entity.fields[0].required());
        assert!(!entity.fields[1].required());
        assert!(entity.is_generated());
    }

    #[test]
    fn test_explicit_table_and_api_path() {
        let entity = EntityDescriptor::new("Order").with_table_name("jhi_order");
        let entity = EntityDescriptor {
            entity_api_url: Some("/orders/".to_string()),
            ..entity
        };
        assert_eq!(entity.table_name(), "jhi_order");
        assert_eq!(entity.api_path(), "orders");
    }

    #[test]
    fn test_stable_timestamp_validation() {
        let missing = EntityDescriptor::new("Order");
        assert!(matches!(missing.stable_timestamp(), Err(ModelError::MissingChangelogDate { .. })));

        let bad = EntityDescriptor::new("Order").with_changelog_date("2023-01-01");
        assert!(matches!(bad.stable_timestamp(), Err(ModelError::InvalidChangelogDate { .. })));
    }

    #[test]
    fn test_skip_flags() {
        let mut entity = EntityDescriptor::new("User");
        entity.built_in = true;
        assert!(!entity.is_generated());

        let mut entity = EntityDescriptor::new("Audit");
        entity.skip_server = true;
        assert!(!entity.is_generated());
    }

    #[test]
    fn test_unknown_field_kind() {
        let field = FieldSpec::new("location", "Geometry", true);
        assert_eq!(field.kind(), None);
    }
}
