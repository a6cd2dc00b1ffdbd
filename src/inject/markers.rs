//! Injection marker registry.
//!
//! Each marker is persisted verbatim in a generated aggregator file. The registry names the file that carries
//! the marker and how to build the fragment one entity contributes there.

use crate::model::AnnotatedEntity;
use crate::plan::manifest::SERVER_DIR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    EntityModel,
    EntityHandler,
    EntityService,
    EntityDto,
    EntityRoute,
    OpenApiPath,
    OpenApiSchema,
    OpenApiTag,
}

#[derive(Debug, Clone, Copy)]
pub struct MarkerInfo {
    pub id: MarkerId,
    /// Token searched for in the target file.
    pub token: &'static str,
    /// Target file, relative to the server directory.
    pub file: &'static str,
    /// Only injected when API documentation is enabled.
    pub docs_only: bool,
    pub description: &'static str,
}

pub const MARKERS: &[MarkerInfo] = &[
    MarkerInfo {
        id: MarkerId::EntityModel,
        token: "servergen-needle-add-entity-model",
        file: "src/models/mod.rs",
        docs_only: false,
        description: "Model module declaration and re-export.",
    },
    MarkerInfo {
        id: MarkerId::EntityHandler,
        token: "servergen-needle-add-entity-handler",
        file: "src/handlers/mod.rs",
        docs_only: false,
        description: "Handler module declaration.",
    },
    MarkerInfo {
        id: MarkerId::EntityService,
        token: "servergen-needle-add-entity-service",
        file: "src/services/mod.rs",
        docs_only: false,
        description: "Service module declaration and re-export.",
    },
    MarkerInfo {
        id: MarkerId::EntityDto,
        token: "servergen-needle-add-entity-dto",
        file: "src/dto/mod.rs",
        docs_only: false,
        description: "DTO module declaration and re-export.",
    },
    MarkerInfo {
        id: MarkerId::EntityRoute,
        token: "servergen-needle-add-entity-route",
        file: "src/main.rs",
        docs_only: false,
        description: "Router nesting of the entity's routes under its API path, inside the `/api` router.",
    },
    MarkerInfo {
        id: MarkerId::OpenApiPath,
        token: "servergen-needle-add-openapi-path",
        file: "src/openapi.rs",
        docs_only: true,
        description: "Handler paths listed in the OpenAPI document.",
    },
    MarkerInfo {
        id: MarkerId::OpenApiSchema,
        token: "servergen-needle-add-openapi-schema",
        file: "src/openapi.rs",
        docs_only: true,
        description: "DTO schemas listed in the OpenAPI components.",
    },
    MarkerInfo {
        id: MarkerId::OpenApiTag,
        token: "servergen-needle-add-openapi-tag",
        file: "src/openapi.rs",
        docs_only: true,
        description: "OpenAPI tag describing the entity's endpoints.",
    },
];

pub fn info_for(id: MarkerId) -> &'static MarkerInfo {
    MARKERS
        .iter()
        .find(|info| info.id == id)
        .unwrap_or_else(|| panic!("INVARIANT: marker {id:?} missing from MARKERS"))
}

impl MarkerId {
    pub fn token(self) -> &'static str {
        info_for(self).token
    }

    /// Target file relative to the output root.
    pub fn target(self) -> String {
        format!("{SERVER_DIR}/{}", info_for(self).file)
    }

    /// The fragment `entity` contributes at this marker.
    pub fn fragment(self, entity: &AnnotatedEntity) -> String {
        let name = &entity.entity_file_name;
        let class = &entity.entity_class;
        let api = &entity.entity_api_url;
        match self {
            MarkerId::EntityModel => format!("pub mod {name};\npub use {name}::*;"),
            MarkerId::EntityHandler => format!("pub mod {name};"),
            MarkerId::EntityService => format!("pub mod {name}_service;\npub use {name}_service::*;"),
            MarkerId::EntityDto => format!("pub mod {name}_dto;\npub use {name}_dto::*;"),
            // Injected inside the router that is already nested under `/api`
            MarkerId::EntityRoute => format!(".nest(\"/{api}\", handlers::{name}::routes())"),
            MarkerId::OpenApiPath => ["get_all", "get_one", "create", "update", "remove"]
                .map(|handler| format!("handlers::{name}::{handler},"))
                .join("\n"),
            MarkerId::OpenApiSchema => format!("{class}Dto,\nCreate{class}Dto,\nUpdate{class}Dto,"),
            MarkerId::OpenApiTag => format!("(name = \"{api}\", description = \"{class} management endpoints\"),"),
        }
    }
}

/// Markers injected for every entity in this run, in injection order.
pub fn active(docs_enabled: bool) -> impl Iterator<Item = MarkerId> {
    MARKERS
        .iter()
        .filter(move |info| docs_enabled || !info.docs_only)
        .map(|info| info.id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<_> = MARKERS.iter().map(|m| m.token).collect();
        assert_eq!(tokens.len(), MARKERS.len());
    }

    #[test]
    fn test_docs_markers_filtered() {
        assert_eq!(active(true).count(), 8);
        assert_eq!(active(false).count(), 5);
        assert!(active(false).all(|id| !info_for(id).docs_only));
    }

    #[test]
    fn test_route_is_relative_to_api_router() {
        let entity = crate::model::annotate(
            &crate::model::EntityDescriptor::new("Product").with_changelog_date("20230101000000"),
            servergen_core::vocab::dialects::Dialect::Sqlite,
        )
        .unwrap();
        assert_eq!(
            MarkerId::EntityRoute.fragment(&entity),
            ".nest(\"/products\", handlers::product::routes())"
        );
    }

    #[test]
    fn test_targets_live_in_server_dir() {
        assert_eq!(MarkerId::EntityRoute.target(), "server/src/main.rs");
        assert_eq!(MarkerId::OpenApiTag.target(), "server/src/openapi.rs");
    }
}
