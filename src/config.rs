//! Per-run generation configuration.
//!
//! A project file (JSON, default name [`PROJECT_FILE`]) is read into [`ProjectFile`], then resolved once into
//! the immutable [`GenerationConfig`] that every phase borrows. Option spellings go through the
//! `servergen_core` registries, so both product names (`postgresql`, `oauth2`, `microservice`) and the
//! neutral aliases (`relational-a`, `federated`, `service`) are accepted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use servergen_core::vocab::dialects::{self, Dialect};
use servergen_core::vocab::options::{self, AuthMode, CiProvider, Topology};
use thiserror::Error;

/// Default project file name, looked up in the destination directory.
pub const PROJECT_FILE: &str = ".servergen.json";

/// Errors raised while reading or resolving the project file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read project file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown {option} '{value}' (expected one of: {expected})")]
    UnknownOption {
        option: &'static str,
        value: String,
        expected: String,
    },

    #[error("project file is missing `baseName`")]
    MissingBaseName,
}

/// Raw project file as written on disk.
///
/// Every option is optional; [`GenerationConfig::resolve`] applies the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub base_name: Option<String>,
    #[serde(alias = "dialect")]
    pub dev_database_type: Option<String>,
    #[serde(alias = "authMode")]
    pub authentication_type: Option<String>,
    #[serde(alias = "topology")]
    pub application_type: Option<String>,
    #[serde(alias = "docsEnabled")]
    pub enable_swagger_codegen: Option<bool>,
    #[serde(alias = "emailEnabled")]
    pub enable_email: Option<bool>,
    #[serde(alias = "messagingEnabled")]
    pub enable_messaging: Option<bool>,
    #[serde(default)]
    pub ci_cd: Vec<String>,
}

/// Immutable configuration for one generation run.
///
/// Fields are private so the derived invariants hold: email support is only effective with token
/// authentication, and the dialect never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    base_name: String,
    dialect: Dialect,
    auth: AuthMode,
    topology: Topology,
    docs_enabled: bool,
    email_requested: bool,
    messaging_enabled: bool,
    ci_providers: Vec<CiProvider>,
}

impl GenerationConfig {
    /// Create a config with default options for `base_name`.
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            dialect: Dialect::Sqlite,
            auth: AuthMode::Jwt,
            topology: Topology::Monolith,
            docs_enabled: true,
            email_requested: false,
            messaging_enabled: false,
            ci_providers: Vec::new(),
        }
    }

    /// Read and resolve a project file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: ProjectFile = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::resolve(raw)
    }

    /// Resolve a raw project file, applying defaults and validating option spellings.
    pub fn resolve(raw: ProjectFile) -> Result<Self, ConfigError> {
        let base_name = raw
            .base_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ConfigError::MissingBaseName)?;
        let mut config = Self::new(base_name);

        if let Some(value) = raw.dev_database_type {
            config.dialect =
                dialects::from_str(&value).ok_or_else(|| unknown("database type", value, dialects::DIALECTS))?;
        }
        if let Some(value) = raw.authentication_type {
            config.auth = options::auth_from_str(&value)
                .ok_or_else(|| unknown("authentication type", value, options::AUTH_MODES))?;
        }
        if let Some(value) = raw.application_type {
            config.topology = options::topology_from_str(&value)
                .ok_or_else(|| unknown("application type", value, options::TOPOLOGIES))?;
        }
        config.docs_enabled = raw.enable_swagger_codegen.unwrap_or(true);
        config.email_requested = raw.enable_email.unwrap_or(false);
        config.messaging_enabled = raw.enable_messaging.unwrap_or(false);

        for value in raw.ci_cd {
            let provider =
                options::ci_from_str(&value).ok_or_else(|| unknown("CI provider", value, options::CI_PROVIDERS))?;
            if !config.ci_providers.contains(&provider) {
                config.ci_providers.push(provider);
            }
        }

        Ok(config)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    pub fn with_email(mut self, enabled: bool) -> Self {
        self.email_requested = enabled;
        self
    }

    pub fn with_messaging(mut self, enabled: bool) -> Self {
        self.messaging_enabled = enabled;
        self
    }

    pub fn with_ci(mut self, provider: CiProvider) -> Self {
        if !self.ci_providers.contains(&provider) {
            self.ci_providers.push(provider);
        }
        self
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn auth(&self) -> AuthMode {
        self.auth
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled
    }

    /// Email is only supported with token auth; an external identity provider owns user mail flows.
    pub fn email_enabled(&self) -> bool {
        self.email_requested && self.auth == AuthMode::Jwt
    }

    pub fn messaging_enabled(&self) -> bool {
        self.messaging_enabled
    }

    pub fn ci_providers(&self) -> &[CiProvider] {
        &self.ci_providers
    }

    /// Options as a JSON object for the render context.
    pub fn to_context(&self) -> serde_json::Value {
        serde_json::json!({
            "baseName": self.base_name,
            "devDatabaseType": dialects::as_str(self.dialect),
            "devDatabaseTypeSql": self.dialect.is_relational(),
            "authenticationType": options::auth_as_str(self.auth),
            "applicationType": options::topology_as_str(self.topology),
            "enableSwaggerCodegen": self.docs_enabled,
            "enableEmail": self.email_enabled(),
            "enableMessaging": self.messaging_enabled,
            "ciCd": self.ci_providers.iter().map(|p| options::ci_as_str(*p)).collect::<Vec<_>>(),
        })
    }
}

fn unknown<Id>(
    option: &'static str,
    value: String,
    table: &[servergen_core::vocab::registry::VocabInfo<Id>],
) -> ConfigError {
    let expected = table.iter().map(|info| info.canonical).collect::<Vec<_>>().join(", ");
    ConfigError::UnknownOption { option, value, expected }
}
