//! Project option vocabularies: authentication mode, deployment topology and CI provider.
//!
//! ## Examples
//! ```rust
//! use servergen_core::vocab::options::{self, AuthMode, Topology};
//!
//! assert_eq!(options::auth_from_str("federated"), Some(AuthMode::Oauth2));
//! assert_eq!(options::topology_from_str("edge-gateway"), Some(Topology::Gateway));
//! ```

use super::registry::{self, VocabInfo, info};

/// How the generated server authenticates requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthMode {
    /// Stateless signed tokens issued by the server itself.
    #[default]
    Jwt,
    /// Tokens issued by an external identity provider (OAuth 2.0 / OIDC).
    Oauth2,
}

/// How the generated server is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// One deployable that also serves the client bundle.
    #[default]
    Monolith,
    Microservice,
    Gateway,
}

/// CI systems a pipeline definition can be emitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CiProvider {
    Github,
    Gitlab,
}

pub const AUTH_MODES: &[VocabInfo<AuthMode>] = &[
    info(AuthMode::Jwt, "jwt", &["token-based", "token"], "JWT authentication."),
    info(
        AuthMode::Oauth2,
        "oauth2",
        &["federated", "oidc"],
        "OAuth 2.0 / OIDC authentication against an external provider.",
    ),
];

pub const TOPOLOGIES: &[VocabInfo<Topology>] = &[
    info(
        Topology::Monolith,
        "monolith",
        &["single-deployable"],
        "Single deployable serving API and static client.",
    ),
    info(
        Topology::Microservice,
        "microservice",
        &["service"],
        "API-only service behind a gateway.",
    ),
    info(
        Topology::Gateway,
        "gateway",
        &["edge-gateway"],
        "Edge gateway routing to services.",
    ),
];

pub const CI_PROVIDERS: &[VocabInfo<CiProvider>] = &[
    info(CiProvider::Github, "github", &["github-actions"], "GitHub Actions workflow."),
    info(CiProvider::Gitlab, "gitlab", &["gitlab-ci"], "GitLab CI pipeline."),
];

pub fn auth_from_str(name: &str) -> Option<AuthMode> {
    registry::lookup(AUTH_MODES, name)
}

pub fn auth_as_str(id: AuthMode) -> &'static str {
    registry::row(AUTH_MODES, id).canonical
}

pub fn topology_from_str(name: &str) -> Option<Topology> {
    registry::lookup(TOPOLOGIES, name)
}

pub fn topology_as_str(id: Topology) -> &'static str {
    registry::row(TOPOLOGIES, id).canonical
}

pub fn ci_from_str(name: &str) -> Option<CiProvider> {
    registry::lookup(CI_PROVIDERS, name)
}

pub fn ci_as_str(id: CiProvider) -> &'static str {
    registry::row(CI_PROVIDERS, id).canonical
}
