//! Field and entity annotation.
//!
//! Annotation projects the raw entity model onto the run's dialect: every field gets its storage type, column
//! type and ORM column type from the core mapping tables, and every name that will appear in a path or a
//! symbol is normalized once here.

use serde::Serialize;
use servergen_core::mapping::{self, RelationalColumns};
use servergen_core::naming;
use servergen_core::vocab::dialects::Dialect;

use super::ModelError;
use super::entity::{EntityDescriptor, FieldSpec, Relationship};

/// A field projected onto the active dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedField {
    pub field_name: String,
    /// Normalized column / struct member name.
    pub column_name: String,
    pub field_type: String,
    pub required: bool,
    pub storage_type: String,
    pub column_type: String,
    pub orm_column_type: Option<String>,
    pub sqlite_column_type: &'static str,
    pub postgres_column_type: &'static str,
    pub mysql_column_type: &'static str,
    /// The kind was not recognized and the dialect fallback was used.
    pub unmapped: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRelationship {
    pub relationship_name: String,
    pub other_entity_name: String,
    pub other_entity_file_name: String,
    pub relationship_type: String,
    pub join_table_name: Option<String>,
}

/// An entity ready for planning and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedEntity {
    pub entity_class: String,
    pub entity_file_name: String,
    pub entity_table_name: String,
    pub entity_api_url: String,
    /// Change-log date used as the migration timestamp.
    pub migration_timestamp: String,
    pub fields: Vec<AnnotatedField>,
    pub relationships: Vec<AnnotatedRelationship>,
}

/// Project one field onto `dialect`.
pub fn map_field(field: &FieldSpec, dialect: Dialect) -> AnnotatedField {
    let kind = field.kind();
    let required = field.required();
    let resolved = mapping::resolve(kind, dialect, required);
    if resolved.fallback {
        tracing::info!(
            field = %field.field_name,
            kind = %field.field_type,
            %dialect,
            fallback = %resolved.column_type,
            "unmapped field kind, using dialect default"
        );
    }
    let RelationalColumns { sqlite, postgresql, mysql } = mapping::relational_columns(kind);

    AnnotatedField {
        field_name: field.field_name.clone(),
        column_name: naming::normalize(&field.field_name),
        field_type: field.field_type.clone(),
        required,
        storage_type: resolved.storage_type,
        column_type: resolved.column_type,
        orm_column_type: resolved.orm_column_type,
        sqlite_column_type: sqlite,
        postgres_column_type: postgresql,
        mysql_column_type: mysql,
        unmapped: resolved.fallback,
    }
}

fn map_relationship(relationship: &Relationship) -> AnnotatedRelationship {
    AnnotatedRelationship {
        relationship_name: relationship.relationship_name.clone(),
        other_entity_name: relationship.other_entity_name.clone(),
        other_entity_file_name: naming::normalize(&relationship.other_entity_name),
        relationship_type: relationship.relationship_type.clone(),
        // Double underscores would trip the snake_case lint on generated join-table modules
        join_table_name: relationship
            .join_table
            .as_ref()
            .map(|table| naming::collapse_underscores(&table.name)),
    }
}

/// Annotate an entity for `dialect`.
///
/// Server-skipped fields are left out. Callers must filter out non-generated entities first.
pub fn annotate(entity: &EntityDescriptor, dialect: Dialect) -> Result<AnnotatedEntity, ModelError> {
    let migration_timestamp = entity.stable_timestamp()?.to_string();

    let fields = entity
        .fields
        .iter()
        .filter(|field| !field.skip_server)
        .map(|field| map_field(field, dialect))
        .collect();

    Ok(AnnotatedEntity {
        entity_class: entity.class_name(),
        entity_file_name: entity.file_name(),
        entity_table_name: entity.table_name(),
        entity_api_url: entity.api_path(),
        migration_timestamp,
        fields,
        relationships: entity.relationships.iter().map(map_relationship).collect(),
    })
}

impl AnnotatedEntity {
    /// Render context of this entity.
    ///
    /// Serialization cannot fail here: the type only holds strings, optional strings, booleans and vectors of
    /// structs made of those, with no maps and no custom `Serialize` impls, so `serde_json::to_value` has no
    /// error path to take.
    pub fn to_context(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::entity::JoinTable;

    fn product() -> EntityDescriptor {
        EntityDescriptor::new("Product")
            .with_changelog_date("20230101000000")
            .with_field(FieldSpec::new("name", "String", true))
            .with_field(FieldSpec::new("price", "Decimal", false))
    }

    #[test]
    fn test_product_on_relational_a() {
        let annotated = annotate(&product(), Dialect::Postgresql).unwrap();
        let storage: Vec<_> = annotated.fields.iter().map(|f| f.storage_type.as_str()).collect();
        let columns: Vec<_> = annotated.fields.iter().map(|f| f.column_type.as_str()).collect();
        assert_eq!(storage, vec!["String", "Option<bigdecimal::BigDecimal>"]);
        assert_eq!(columns, vec!["VARCHAR(255)", "DECIMAL"]);
    }

    #[test]
    fn test_unknown_kind_falls_back_without_error() {
        let field = FieldSpec::new("shape", "Polygon", false);
        let mapped = map_field(&field, Dialect::Mysql);
        assert!(mapped.unmapped);
        assert_eq!(mapped.storage_type, "Option<String>");
        assert_eq!(mapped.column_type, "VARCHAR(255)");
        assert_eq!(mapped.orm_column_type.as_deref(), Some("Varchar"));
    }

    #[test]
    fn test_skipped_fields_are_dropped() {
        let mut hidden = FieldSpec::new("internal", "String", true);
        hidden.skip_server = true;
        let entity = product().with_field(hidden);
        let annotated = annotate(&entity, Dialect::Sqlite).unwrap();
        assert_eq!(annotated.fields.len(), 2);
    }

    #[test]
    fn test_join_table_double_underscore_collapsed() {
        let mut entity = product();
        entity.relationships.push(Relationship {
            relationship_name: "store".to_string(),
            other_entity_name: "Store".to_string(),
            relationship_type: "many-to-many".to_string(),
            join_table: Some(JoinTable {
                name: "rel_store__product".to_string(),
            }),
        });
        let annotated = annotate(&entity, Dialect::Sqlite).unwrap();
        assert_eq!(annotated.relationships[0].join_table_name.as_deref(), Some("rel_store_product"));
        assert_eq!(annotated.relationships[0].other_entity_file_name, "store");
    }

    #[test]
    fn test_context_uses_template_names() {
        let annotated = annotate(&product(), Dialect::Mongodb).unwrap();
        let ctx = annotated.to_context();
        assert_eq!(ctx["entityFileName"], "product");
        assert_eq!(ctx["migrationTimestamp"], "20230101000000");
        assert_eq!(ctx["fields"][1]["storageType"], "Option<f64>");
        assert_eq!(ctx["fields"][1]["columnType"], "double");
    }

    #[test]
    fn test_context_with_optional_and_relationship_fields_is_an_object() {
        let mut entity = product();
        entity.relationships.push(Relationship {
            relationship_name: "store".to_string(),
            other_entity_name: "Store".to_string(),
            relationship_type: "many-to-one".to_string(),
            join_table: None,
        });
        let ctx = annotate(&entity, Dialect::Sqlite).unwrap().to_context();
        assert!(ctx.is_object());
        assert!(ctx["relationships"][0]["joinTableName"].is_null());
        assert_eq!(ctx["fields"][0]["ormColumnType"], "Text");
    }

    #[test]
    fn test_missing_changelog_date_is_an_entity_error() {
        let entity = EntityDescriptor::new("Draft");
        assert!(annotate(&entity, Dialect::Sqlite).is_err());
    }
}
