//! Global project metadata loaded once per run.
//!
//! Holds the values every template may need independent of any entity: the generated crate name, the
//! toolchain version and the dependency table of the generated server's `Cargo.toml`.

use std::collections::BTreeMap;

use servergen_core::naming;
use servergen_core::vocab::dialects::Dialect;
use servergen_core::vocab::options::AuthMode;

use crate::config::GenerationConfig;
use crate::version::SERVERGEN_VERSION;

/// Minimum Rust toolchain the generated server targets.
pub const RUST_VERSION: &str = "1.75.0";

/// Project-wide metadata shared by every template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Generated crate name: the normalized base name.
    pub crate_name: String,
    pub rust_version: &'static str,
    /// Crate name to version spec (the right-hand side of a `Cargo.toml` dependency line).
    pub dependencies: BTreeMap<&'static str, String>,
}

impl ProjectMetadata {
    /// Build the metadata for a configuration.
    #[tracing::instrument(skip_all, fields(base_name = config.base_name()))]
    pub fn load(config: &GenerationConfig) -> Self {
        let mut dependencies = BTreeMap::new();
        for name in BASE_CRATES {
            if let Some(spec) = known_version(name) {
                dependencies.insert(*name, spec);
            }
        }

        match config.dialect() {
            Dialect::Mongodb => {
                dependencies.insert("mongodb", r#""2.8""#.to_string());
                dependencies.insert("bson", r#"{ version = "2", features = ["chrono-0_4"] }"#.to_string());
            }
            dialect => {
                dependencies.insert("diesel", diesel_spec(dialect));
                dependencies.insert("bigdecimal", r#"{ version = "0.4", features = ["serde"] }"#.to_string());
            }
        }

        if config.auth() == AuthMode::Oauth2 {
            dependencies.insert("reqwest", r#"{ version = "0.11", features = ["json"] }"#.to_string());
        }
        if config.docs_enabled() {
            dependencies.insert(
                "utoipa",
                r#"{ version = "4", features = ["axum_extras", "chrono", "uuid"] }"#.to_string(),
            );
            dependencies.insert("utoipa-swagger-ui", r#"{ version = "6", features = ["axum"] }"#.to_string());
        }
        if config.email_enabled() {
            dependencies.insert("lettre", r#"{ version = "0.11", features = ["tokio1-native-tls"] }"#.to_string());
        }

        tracing::debug!(count = dependencies.len(), "resolved generated dependencies");

        Self {
            crate_name: naming::normalize(config.base_name()),
            rust_version: RUST_VERSION,
            dependencies,
        }
    }

    /// Dependencies rendered as `Cargo.toml` lines, sorted by crate name.
    pub fn dependency_lines(&self) -> Vec<String> {
        self.dependencies
            .iter()
            .map(|(name, spec)| format!("{name} = {spec}"))
            .collect()
    }

    pub fn to_context(&self) -> serde_json::Value {
        serde_json::json!({
            "rustCrateName": self.crate_name,
            "rustVersion": self.rust_version,
            "rustDependencies": self.dependencies,
            "dependencyLines": self.dependency_lines().join("\n"),
            "generatorVersion": SERVERGEN_VERSION,
        })
    }
}

/// Crates every generated server depends on regardless of options.
const BASE_CRATES: &[&str] = &[
    "axum",
    "tokio",
    "serde",
    "serde_json",
    "dotenvy",
    "tracing",
    "tracing-subscriber",
    "thiserror",
    "chrono",
    "uuid",
    "argon2",
    "jsonwebtoken",
    "tower-http",
    "validator",
];

/// Known-good version specs for the crates the templates use.
fn known_version(crate_name: &str) -> Option<String> {
    let spec = match crate_name {
        "axum" => r#""0.7""#,
        "tokio" => r#"{ version = "1", features = ["rt-multi-thread", "macros", "time", "sync", "net"] }"#,
        "serde" => r#"{ version = "1", features = ["derive"] }"#,
        "serde_json" => r#""1""#,
        "dotenvy" => r#""0.15""#,
        "tracing" => r#""0.1""#,
        "tracing-subscriber" => r#"{ version = "0.3", features = ["env-filter"] }"#,
        "thiserror" => r#""1""#,
        "chrono" => r#"{ version = "0.4", features = ["serde"] }"#,
        "uuid" => r#"{ version = "1", features = ["v4", "serde"] }"#,
        "argon2" => r#""0.5""#,
        "jsonwebtoken" => r#""9""#,
        "tower-http" => r#"{ version = "0.5", features = ["cors", "trace", "fs"] }"#,
        "validator" => r#"{ version = "0.18", features = ["derive"] }"#,
        _ => return None,
    };
    Some(spec.to_string())
}

fn diesel_spec(dialect: Dialect) -> String {
    let backend = match dialect {
        Dialect::Postgresql => "postgres",
        Dialect::Mysql => "mysql",
        _ => "sqlite",
    };
    format!(r#"{{ version = "2.1", features = ["{backend}", "r2d2", "chrono", "uuid", "numeric"] }}"#)
}
