//! Snapshot tests for mapping tables, planner output and injection fragments
//!
//! Inline snapshots keep the expected output next to the input that produces it.

use servergen::config::GenerationConfig;
use servergen::inject::markers;
use servergen::model::{EntityDescriptor, annotate};
use servergen::plan::manifest;
use servergen::plan::{ResolvedFile, Scope, plan};
use servergen_core::mapping;
use servergen_core::vocab::dialects::Dialect;
use servergen_core::vocab::field_kinds;
use servergen_core::vocab::options::{AuthMode, CiProvider, Topology};

fn mapping_table(dialect: Dialect) -> String {
    field_kinds::all()
        .map(|kind| {
            let row = mapping::lookup(kind, dialect);
            match row.orm_column {
                Some(orm) => format!("{}: {} | {} | {}", field_kinds::as_str(kind), row.storage, row.column, orm),
                None => format!("{}: {} | {}", field_kinds::as_str(kind), row.storage, row.column),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn listing(files: &[ResolvedFile]) -> String {
    files
        .iter()
        .map(|file| format!("{} {}", file.group, file.destination))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Mapping tables
// ============================================================================

#[test]
fn test_postgresql_mapping_table() {
    insta::assert_snapshot!(mapping_table(Dialect::Postgresql), @r"
    Boolean: bool | BOOLEAN | Bool
    Integer: i32 | INTEGER | Int4
    Long: i64 | BIGINT | Int8
    Float: f32 | REAL | Float4
    Double: f64 | DOUBLE PRECISION | Float8
    BigDecimal: bigdecimal::BigDecimal | DECIMAL | Numeric
    String: String | VARCHAR(255) | Varchar
    UUID: uuid::Uuid | UUID | Uuid
    LocalDate: chrono::NaiveDate | DATE | Date
    Instant: NaiveDateTime | TIMESTAMP | Timestamp
    ZonedDateTime: NaiveDateTime | TIMESTAMP WITH TIME ZONE | Timestamptz
    Duration: i64 | BIGINT | Int8
    TextBlob: String | TEXT | Text
    Blob: Vec<u8> | BYTEA | Bytea
    AnyBlob: Vec<u8> | BYTEA | Bytea
    ImageBlob: Vec<u8> | BYTEA | Bytea
    ");
}

#[test]
fn test_document_mapping_table() {
    insta::assert_snapshot!(mapping_table(Dialect::Mongodb), @r"
    Boolean: bool | bool
    Integer: i32 | int
    Long: i64 | long
    Float: f64 | double
    Double: f64 | double
    BigDecimal: f64 | double
    String: String | string
    UUID: String | string
    LocalDate: chrono::NaiveDate | date
    Instant: bson::DateTime | date
    ZonedDateTime: bson::DateTime | date
    Duration: i64 | long
    TextBlob: String | string
    Blob: bson::Binary | binData
    AnyBlob: bson::Binary | binData
    ImageBlob: bson::Binary | binData
    ");
}

// ============================================================================
// Planner output
// ============================================================================

#[test]
fn test_global_plan_document_federated_service() {
    let config = GenerationConfig::new("shop")
        .with_dialect(Dialect::Mongodb)
        .with_auth(AuthMode::Oauth2)
        .with_topology(Topology::Microservice)
        .with_docs(false)
        .with_ci(CiProvider::Gitlab);
    let files = plan(&manifest::global_manifest(), &config, Scope::Global).unwrap();
    let without_base: Vec<ResolvedFile> = files.into_iter().filter(|file| file.group != "server").collect();

    insta::assert_snapshot!(listing(&without_base), @r"
    cargo Cargo.toml
    cargo .env
    cargo .gitignore
    cargo Dockerfile
    cargo README.md
    compose docker-compose.yml
    server-document server/src/db/mongodb_connection.rs
    server-document server/src/models/user.rs
    server-document server/src/models/authority.rs
    server-document server/src/services/user_service.rs
    oauth2 server/src/config/oauth2_config.rs
    oauth2 server/src/security/mod.rs
    oauth2 server/src/security/jwks.rs
    oauth2 server/src/security/oauth2_validator.rs
    oauth2 server/src/handlers/oauth2.rs
    service-registry server/src/config/service_registry.rs
    scripts scripts/mongodb_init.js
    docs docs/DOCKER.md
    docs docs/EMAIL_INTEGRATION.md
    docs docs/ENTITY_GENERATION.md
    docs docs/SECURITY.md
    docs docs/TESTING.md
    docs-keycloak docs/KEYCLOAK.md
    docs-mongodb docs/MONGODB.md
    docker docker/app.yml
    post-services docker/services.yml
    docker-keycloak docker/keycloak.yml
    docker-keycloak docker/realm-config/jhipster-realm.json
    docker-mongodb docker/mongodb.yml
    ci-gitlab .gitlab-ci.yml
    ");
}

#[test]
fn test_entity_plan_document() {
    let config = GenerationConfig::new("shop").with_dialect(Dialect::Mongodb);
    let files = plan(manifest::ENTITY_FILES, &config, Scope::Entity("OrderItem")).unwrap();

    insta::assert_snapshot!(listing(&files), @r"
    entity-document server/src/models/order_item.rs
    entity-document server/src/handlers/order_item.rs
    entity-document server/src/services/order_item_service.rs
    entity-document server/src/dto/order_item_dto.rs
    ");
}

// ============================================================================
// Injection fragments
// ============================================================================

#[test]
fn test_fragments_for_every_marker() {
    let descriptor = EntityDescriptor::new("OrderItem").with_changelog_date("20230101120000");
    let entity = annotate(&descriptor, Dialect::Sqlite).unwrap();
    let fragments = markers::active(true)
        .map(|marker| format!("// {}\n{}", marker.token(), marker.fragment(&entity)))
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(fragments, @r#"
    // servergen-needle-add-entity-model
    pub mod order_item;
    pub use order_item::*;
    // servergen-needle-add-entity-handler
    pub mod order_item;
    // servergen-needle-add-entity-service
    pub mod order_item_service;
    pub use order_item_service::*;
    // servergen-needle-add-entity-dto
    pub mod order_item_dto;
    pub use order_item_dto::*;
    // servergen-needle-add-entity-route
    .nest("/order-items", handlers::order_item::routes())
    // servergen-needle-add-openapi-path
    handlers::order_item::get_all,
    handlers::order_item::get_one,
    handlers::order_item::create,
    handlers::order_item::update,
    handlers::order_item::remove,
    // servergen-needle-add-openapi-schema
    OrderItemDto,
    CreateOrderItemDto,
    UpdateOrderItemDto,
    // servergen-needle-add-openapi-tag
    (name = "order-items", description = "OrderItem management endpoints"),
    "#);
}
