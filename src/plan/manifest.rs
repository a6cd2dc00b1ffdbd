//! Output manifests of the generated server.
//!
//! Template names double as destination paths unless a group renames them. Paths are relative to the output
//! root; server sources live under [`SERVER_DIR`], migrations and deployment files at the root.
//!
//! Aggregators carrying injection markers, and the application configuration, are declared with
//! [`Template::kept`]: they are written on the first run only and grow through injection afterwards.

use servergen_core::vocab::dialects::Dialect;
use servergen_core::vocab::options::{AuthMode, CiProvider, Topology};

use super::{OutputGroup, Template};
use crate::config::GenerationConfig;

/// Directory of the generated server crate.
pub const SERVER_DIR: &str = "server";

/// Directory holding one sub-directory per schema migration.
pub const MIGRATIONS_DIR: &str = "migrations";

/// Templates of one entity migration, as `(source, file name inside the migration directory)`.
pub const ENTITY_MIGRATION_TEMPLATES: &[(&str, &str)] = &[
    ("migrations/entity/up.sql", "up.sql"),
    ("migrations/entity/down.sql", "down.sql"),
];

// ============================================================================
// Predicates
// ============================================================================

pub fn is_relational(config: &GenerationConfig) -> bool {
    config.dialect().is_relational()
}

pub fn is_document(config: &GenerationConfig) -> bool {
    config.dialect().is_document()
}

fn is_sqlite(config: &GenerationConfig) -> bool {
    config.dialect() == Dialect::Sqlite
}

fn is_postgresql(config: &GenerationConfig) -> bool {
    config.dialect() == Dialect::Postgresql
}

fn is_mysql(config: &GenerationConfig) -> bool {
    config.dialect() == Dialect::Mysql
}

fn has_compose_service(config: &GenerationConfig) -> bool {
    matches!(config.dialect(), Dialect::Postgresql | Dialect::Mongodb)
}

fn is_oauth2(config: &GenerationConfig) -> bool {
    config.auth() == AuthMode::Oauth2
}

fn is_monolith(config: &GenerationConfig) -> bool {
    config.topology() == Topology::Monolith
}

fn is_gateway(config: &GenerationConfig) -> bool {
    config.topology() == Topology::Gateway
}

fn is_distributed(config: &GenerationConfig) -> bool {
    config.topology() != Topology::Monolith
}

fn docs_enabled(config: &GenerationConfig) -> bool {
    config.docs_enabled()
}

fn email_enabled(config: &GenerationConfig) -> bool {
    config.email_enabled()
}

fn messaging_enabled(config: &GenerationConfig) -> bool {
    config.messaging_enabled()
}

fn uses_github(config: &GenerationConfig) -> bool {
    config.ci_providers().contains(&CiProvider::Github)
}

fn uses_gitlab(config: &GenerationConfig) -> bool {
    config.ci_providers().contains(&CiProvider::Gitlab)
}

// ============================================================================
// Global manifests
// ============================================================================

pub const CARGO_FILES: &[OutputGroup] = &[
    OutputGroup::always(
        "cargo",
        "",
        &[
            Template::file("Cargo.toml"),
            Template::renamed("env", ".env"),
            Template::renamed("gitignore", ".gitignore"),
            Template::file("Dockerfile"),
            Template::file("README.md"),
        ],
    ),
    OutputGroup::when("diesel", "", is_relational, &[Template::file("diesel.toml")]),
    OutputGroup::when("compose", "", has_compose_service, &[Template::file("docker-compose.yml")]),
];

pub const SERVER_FILES: &[OutputGroup] = &[
    OutputGroup::always(
        "server",
        SERVER_DIR,
        &[
            Template::file("Cargo.toml"),
            Template::kept("src/main.rs"),
            Template::file("src/lib.rs"),
            Template::file("src/config/mod.rs"),
            Template::kept("src/config/app_config.rs"),
            Template::file("src/config/database.rs"),
            Template::file("src/db/mod.rs"),
            Template::kept("src/models/mod.rs"),
            Template::kept("src/handlers/mod.rs"),
            Template::file("src/handlers/health.rs"),
            Template::file("src/handlers/management.rs"),
            Template::file("src/handlers/user.rs"),
            Template::file("src/handlers/account.rs"),
            Template::kept("src/services/mod.rs"),
            Template::file("src/services/auth_service.rs"),
            Template::file("src/middleware/mod.rs"),
            Template::file("src/middleware/auth.rs"),
            Template::file("src/errors/mod.rs"),
            Template::file("src/errors/app_error.rs"),
            Template::kept("src/dto/mod.rs"),
            Template::file("src/dto/user_dto.rs"),
            Template::file("src/dto/pagination.rs"),
            Template::file("src/dto/common.rs"),
            Template::file("src/test_utils.rs"),
        ],
    ),
    OutputGroup::when("openapi", SERVER_DIR, docs_enabled, &[Template::kept("src/openapi.rs")]),
    OutputGroup::when(
        "server-sql",
        SERVER_DIR,
        is_relational,
        &[
            Template::file("src/db/connection.rs"),
            Template::file("src/db/schema.rs"),
            Template::file("src/models/user.rs"),
            Template::file("src/models/authority.rs"),
            Template::file("src/services/user_service.rs"),
        ],
    )
    .exclusive("database-layer"),
    OutputGroup::when(
        "server-document",
        SERVER_DIR,
        is_document,
        &[
            Template::file("src/db/mongodb_connection.rs"),
            Template::renamed("src/models/user_mongodb.rs", "src/models/user.rs"),
            Template::renamed("src/models/authority_mongodb.rs", "src/models/authority.rs"),
            Template::renamed("src/services/user_service_mongodb.rs", "src/services/user_service.rs"),
        ],
    )
    .exclusive("database-layer"),
    OutputGroup::when(
        "oauth2",
        SERVER_DIR,
        is_oauth2,
        &[
            Template::file("src/config/oauth2_config.rs"),
            Template::file("src/security/mod.rs"),
            Template::file("src/security/jwks.rs"),
            Template::file("src/security/oauth2_validator.rs"),
            Template::file("src/handlers/oauth2.rs"),
        ],
    ),
    OutputGroup::when("static-files", SERVER_DIR, is_monolith, &[Template::file("src/handlers/static_files.rs")]),
    OutputGroup::when(
        "service-registry",
        SERVER_DIR,
        is_distributed,
        &[Template::file("src/config/service_registry.rs")],
    ),
    OutputGroup::when(
        "gateway",
        SERVER_DIR,
        is_gateway,
        &[Template::file("src/config/routes_config.rs"), Template::file("src/handlers/gateway.rs")],
    ),
    OutputGroup::when(
        "email",
        SERVER_DIR,
        email_enabled,
        &[
            Template::file("src/config/email_config.rs"),
            Template::file("src/services/email_service.rs"),
            Template::file("src/templates/email/activation.html"),
            Template::file("src/templates/email/password-reset.html"),
            Template::file("src/templates/email/password-changed.html"),
            Template::file("src/templates/email/account-created.html"),
        ],
    ),
    OutputGroup::when(
        "messaging",
        SERVER_DIR,
        messaging_enabled,
        &[
            Template::file("src/config/messaging_config.rs"),
            Template::file("src/services/event_publisher.rs"),
        ],
    ),
];

pub const MIGRATION_FILES: &[OutputGroup] = &[OutputGroup::when(
    "migrations",
    "",
    is_relational,
    &[
        Template::file("migrations/00000000000000_diesel_initial_setup/up.sql"),
        Template::file("migrations/00000000000000_diesel_initial_setup/down.sql"),
        Template::file("migrations/00000000000001_create_users_authorities/up.sql"),
        Template::file("migrations/00000000000001_create_users_authorities/down.sql"),
    ],
)];

pub const SCRIPT_FILES: &[OutputGroup] =
    &[OutputGroup::when("scripts", "", is_document, &[Template::file("scripts/mongodb_init.js")])];

pub const DOC_FILES: &[OutputGroup] = &[
    OutputGroup::always(
        "docs",
        "docs",
        &[
            Template::file("DOCKER.md"),
            Template::file("EMAIL_INTEGRATION.md"),
            Template::file("ENTITY_GENERATION.md"),
            Template::file("SECURITY.md"),
            Template::file("TESTING.md"),
        ],
    ),
    OutputGroup::when("docs-openapi", "docs", docs_enabled, &[Template::file("OPENAPI.md")]),
    OutputGroup::when("docs-static", "docs", is_monolith, &[Template::file("STATIC_HOSTING.md")]),
    OutputGroup::when("docs-keycloak", "docs", is_oauth2, &[Template::file("KEYCLOAK.md")]),
    OutputGroup::when("docs-sqlite", "docs", is_sqlite, &[Template::file("SQLITE.md")]).exclusive("database-docs"),
    OutputGroup::when("docs-postgresql", "docs", is_postgresql, &[Template::file("POSTGRES.md")])
        .exclusive("database-docs"),
    OutputGroup::when("docs-mysql", "docs", is_mysql, &[Template::file("MYSQL.md")]).exclusive("database-docs"),
    OutputGroup::when("docs-mongodb", "docs", is_document, &[Template::file("MONGODB.md")])
        .exclusive("database-docs"),
];

pub const DOCKER_FILES: &[OutputGroup] = &[
    OutputGroup::always(
        "docker",
        "docker",
        &[Template::file("app.yml"), Template::file("services.yml")],
    ),
    OutputGroup::when(
        "docker-keycloak",
        "docker",
        is_oauth2,
        &[Template::file("keycloak.yml"), Template::file("realm-config/jhipster-realm.json")],
    ),
    OutputGroup::when("docker-postgresql", "docker", is_postgresql, &[Template::file("postgresql.yml")]),
    OutputGroup::when("docker-mysql", "docker", is_mysql, &[Template::file("mysql.yml")]),
    OutputGroup::when("docker-mongodb", "docker", is_document, &[Template::file("mongodb.yml")]),
];

pub const CI_FILES: &[OutputGroup] = &[
    OutputGroup::when("ci-github", ".github/workflows", uses_github, &[Template::file("main.yml")]),
    OutputGroup::when("ci-gitlab", "", uses_gitlab, &[Template::file(".gitlab-ci.yml")]),
];

/// Post-processing overrides; planned last so they win over earlier groups.
pub const POST_FILES: &[OutputGroup] = &[OutputGroup::always(
    "post-services",
    "",
    &[Template::renamed("post/docker/services.yml", "docker/services.yml")],
)];

/// Every project-wide group, in planning order.
pub fn global_manifest() -> Vec<OutputGroup> {
    [
        CARGO_FILES,
        SERVER_FILES,
        MIGRATION_FILES,
        SCRIPT_FILES,
        DOC_FILES,
        DOCKER_FILES,
        CI_FILES,
        POST_FILES,
    ]
    .concat()
}

// ============================================================================
// Entity manifest
// ============================================================================

pub const ENTITY_FILES: &[OutputGroup] = &[
    OutputGroup::when(
        "entity-sql",
        SERVER_DIR,
        is_relational,
        &[
            Template::file("src/models/_entityFileName_.rs"),
            Template::file("src/handlers/_entityFileName_.rs"),
            Template::file("src/services/_entityFileName_service.rs"),
            Template::file("src/dto/_entityFileName_dto.rs"),
        ],
    )
    .exclusive("entity-persistence"),
    OutputGroup::when(
        "entity-document",
        SERVER_DIR,
        is_document,
        &[
            Template::renamed("src/models/_entityFileName_mongodb.rs", "src/models/_entityFileName_.rs"),
            Template::file("src/handlers/_entityFileName_.rs"),
            Template::renamed(
                "src/services/_entityFileName_service_mongodb.rs",
                "src/services/_entityFileName_service.rs",
            ),
            Template::file("src/dto/_entityFileName_dto.rs"),
        ],
    )
    .exclusive("entity-persistence"),
];

/// Compose files of database services this project does not use.
pub fn stale_compose_files(dialect: Dialect) -> &'static [&'static str] {
    match dialect {
        Dialect::Mongodb => &["docker/postgresql.yml", "docker/mysql.yml"],
        Dialect::Postgresql => &["docker/mongodb.yml", "docker/mysql.yml"],
        Dialect::Mysql => &["docker/mongodb.yml", "docker/postgresql.yml"],
        Dialect::Sqlite => &[],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::{Scope, check_choices, plan};

    fn all_configs() -> Vec<GenerationConfig> {
        let mut configs = Vec::new();
        for dialect in servergen_core::vocab::dialects::all() {
            for auth in [AuthMode::Jwt, AuthMode::Oauth2] {
                for topology in [Topology::Monolith, Topology::Microservice, Topology::Gateway] {
                    configs.push(
                        GenerationConfig::new("shop")
                            .with_dialect(dialect)
                            .with_auth(auth)
                            .with_topology(topology),
                    );
                }
            }
        }
        configs
    }

    #[test]
    fn test_every_configuration_satisfies_choices() {
        for config in all_configs() {
            check_choices(&global_manifest(), &config).unwrap();
            check_choices(ENTITY_FILES, &config).unwrap();
        }
    }

    #[test]
    fn test_document_dialect_excludes_relational_groups() {
        const RELATIONAL: &[&str] = &[
            "diesel",
            "server-sql",
            "migrations",
            "entity-sql",
            "docs-sqlite",
            "docs-postgresql",
            "docs-mysql",
            "docker-postgresql",
            "docker-mysql",
        ];
        const DOCUMENT: &[&str] = &["server-document", "scripts", "entity-document", "docs-mongodb", "docker-mongodb"];

        let config = GenerationConfig::new("shop").with_dialect(Dialect::Mongodb);
        let groups: Vec<OutputGroup> = global_manifest().into_iter().chain(ENTITY_FILES.iter().copied()).collect();
        for group in &groups {
            if RELATIONAL.contains(&group.name) {
                assert!(!group.is_included(&config), "{} should be excluded", group.name);
            }
            if DOCUMENT.contains(&group.name) {
                assert!(group.is_included(&config), "{} should be included", group.name);
            }
        }
    }

    #[test]
    fn test_services_override_wins() {
        let files = plan(&global_manifest(), &GenerationConfig::new("shop"), Scope::Global).unwrap();
        let services: Vec<_> = files.iter().filter(|f| f.destination == "docker/services.yml").collect();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].source, "post/docker/services.yml");
    }

    #[test]
    fn test_global_plan_never_binds_entities() {
        for config in all_configs() {
            assert!(plan(&global_manifest(), &config, Scope::Global).is_ok());
        }
    }

    #[test]
    fn test_email_only_with_token_auth() {
        let config = GenerationConfig::new("shop").with_email(true).with_auth(AuthMode::Oauth2);
        let files = plan(&global_manifest(), &config, Scope::Global).unwrap();
        assert!(!files.iter().any(|f| f.destination.ends_with("email_service.rs")));
    }

    #[test]
    fn test_injection_targets_are_kept() {
        let files = plan(&global_manifest(), &GenerationConfig::new("shop"), Scope::Global).unwrap();
        for marker in crate::inject::markers::active(true) {
            let target = marker.target();
            let file = files.iter().find(|f| f.destination == target).unwrap();
            assert!(file.keep_existing, "{target}");
        }
        let app_config = files.iter().find(|f| f.destination == "server/src/config/app_config.rs").unwrap();
        assert!(app_config.keep_existing);
        let cargo = files.iter().find(|f| f.destination == "server/Cargo.toml").unwrap();
        assert!(!cargo.keep_existing);
    }

    #[test]
    fn test_stale_compose_never_includes_active_database() {
        assert!(stale_compose_files(Dialect::Sqlite).is_empty());
        assert!(!stale_compose_files(Dialect::Mysql).contains(&"docker/mysql.yml"));
        assert!(!stale_compose_files(Dialect::Mongodb).contains(&"docker/mongodb.yml"));
    }
}
