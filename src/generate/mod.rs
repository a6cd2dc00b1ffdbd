//! Generation orchestrator.
//!
//! A run goes through fixed phases:
//!
//! 1. configure: the resolved [`GenerationConfig`] is fixed for the whole run
//! 2. metadata: project-wide dependency and version metadata
//! 3. annotate: every generated entity is mapped onto the dialect (built-in and server-skipped entities stop
//!    here and never reach mapping, planning or migrations)
//! 4. plan: global and per-entity file sets, including exclusive-choice checks; a planning error aborts the
//!    run before anything is written
//! 5. global files, then post-processing (stale compose files are removed); files planned with
//!    `keep_existing` are only written when absent, so hand edits to aggregators survive regeneration
//! 6. per entity: entity files, then the entity migration when none exists yet
//! 7. injection: after all entities, one fragment per entity per marker into the aggregator files, skipped
//!    when the file already holds that fragment
//! 8. schema sync, when configured
//!
//! Global failures abort the run. Once entity writing starts, errors of one entity are collected in the
//! [`RunReport`] and the remaining entities are still generated; a failed entity is left out of injection.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod error;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::GenerationConfig;
use crate::inject::{self, Injector, StrictInjector, markers};
use crate::metadata::ProjectMetadata;
use crate::migrate::{MigrationRegistry, SchemaSync, SyncOutcome};
use crate::model::{self, AnnotatedEntity, EntityDescriptor};
use crate::plan::{self, ResolvedFile, Scope, manifest};
use crate::render::{self, PlaceholderRenderer, Renderer, TemplateSource};

pub use error::{EntityError, GenerateError};
pub use report::{EntityFailure, RunReport};

/// Files of one entity.
#[derive(Debug, Clone)]
pub struct PlannedEntity {
    pub entity: AnnotatedEntity,
    pub files: Vec<ResolvedFile>,
}

/// Everything a run would write, computed without touching the destination.
#[derive(Debug, Default)]
pub struct PlannedRun {
    pub global: Vec<ResolvedFile>,
    pub entities: Vec<PlannedEntity>,
    pub skipped_entities: Vec<String>,
    /// Entities that failed annotation.
    pub failures: Vec<EntityFailure>,
}

/// Drives one generation run into a destination directory.
pub struct Generator {
    config: GenerationConfig,
    destination: PathBuf,
    templates: Box<dyn TemplateSource>,
    renderer: Box<dyn Renderer>,
    injector: Box<dyn Injector>,
    schema_sync: Option<Box<dyn SchemaSync>>,
}

impl Generator {
    /// A generator with the placeholder renderer, strict injection and no schema sync.
    pub fn new(
        config: GenerationConfig,
        destination: impl Into<PathBuf>,
        templates: impl TemplateSource + 'static,
    ) -> Self {
        Self {
            config,
            destination: destination.into(),
            templates: Box::new(templates),
            renderer: Box::new(PlaceholderRenderer),
            injector: Box::new(StrictInjector),
            schema_sync: None,
        }
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_injector(mut self, injector: impl Injector + 'static) -> Self {
        self.injector = Box::new(injector);
        self
    }

    pub fn with_schema_sync(mut self, sync: impl SchemaSync + 'static) -> Self {
        self.schema_sync = Some(Box::new(sync));
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Migrations registry of the destination.
    pub fn migrations(&self) -> MigrationRegistry {
        MigrationRegistry::new(self.destination.join(manifest::MIGRATIONS_DIR))
    }

    // ========================================================================
    // Planning
    // ========================================================================

    /// Annotate entities and plan every file. Nothing is written.
    #[tracing::instrument(skip_all, fields(entities = entities.len()))]
    pub fn plan(&self, entities: &[EntityDescriptor]) -> Result<PlannedRun, GenerateError> {
        let global_groups = manifest::global_manifest();
        plan::check_choices(&global_groups, &self.config)?;
        plan::check_choices(manifest::ENTITY_FILES, &self.config)?;

        let mut planned = PlannedRun {
            global: plan::plan(&global_groups, &self.config, Scope::Global)?,
            ..PlannedRun::default()
        };

        for entity in self.annotate(entities, &mut planned) {
            let scope = Scope::Entity(&entity.entity_file_name);
            let files = plan::plan(manifest::ENTITY_FILES, &self.config, scope)?;
            planned.entities.push(PlannedEntity { entity, files });
        }

        Ok(planned)
    }

    fn annotate(&self, entities: &[EntityDescriptor], planned: &mut PlannedRun) -> Vec<AnnotatedEntity> {
        let dialect = self.config.dialect();
        let mut annotated = Vec::new();
        for entity in entities {
            if !entity.is_generated() {
                tracing::debug!(entity = %entity.name, "skipping built-in or server-skipped entity");
                planned.skipped_entities.push(entity.name.clone());
                continue;
            }
            match model::annotate(entity, dialect) {
                Ok(entity) => annotated.push(entity),
                Err(err) => {
                    tracing::error!(entity = %entity.name, %err, "entity annotation failed");
                    planned.failures.push(EntityFailure {
                        entity: entity.name.clone(),
                        error: err.into(),
                    });
                }
            }
        }
        annotated
    }

    // ========================================================================
    // Run
    // ========================================================================

    /// Run every phase against the destination.
    #[tracing::instrument(
        skip_all,
        fields(destination = %self.destination.display(), dialect = %self.config.dialect())
    )]
    pub fn run(&self, entities: &[EntityDescriptor]) -> Result<RunReport, GenerateError> {
        tracing::info!(base_name = self.config.base_name(), "starting generation");
        let metadata = ProjectMetadata::load(&self.config);
        let planned = self.plan(entities)?;

        let mut report = RunReport {
            skipped_entities: planned.skipped_entities,
            failures: planned.failures,
            ..RunReport::default()
        };

        let base = render::merge_context(&[&self.config.to_context(), &metadata.to_context()]);
        let entities_context: Vec<Value> = planned.entities.iter().map(|p| p.entity.to_context()).collect();
        let global_context = render::merge_context(&[&base, &serde_json::json!({ "entities": entities_context })]);

        self.write_global(&planned.global, &global_context, &mut report)?;
        self.remove_stale(&mut report);

        let mut generated = Vec::new();
        for entity in &planned.entities {
            match self.write_entity(entity, &base, &mut report) {
                Ok(()) => generated.push(&entity.entity),
                Err(err) => report.fail(&entity.entity.entity_class, err),
            }
        }

        self.inject(&generated, &mut report)?;
        self.sync_schema(&mut report);

        tracing::info!(
            written = report.written.len(),
            failures = report.failures.len(),
            warnings = report.warnings.len(),
            "generation finished"
        );
        Ok(report)
    }

    #[tracing::instrument(skip_all, fields(files = files.len()))]
    fn write_global(
        &self,
        files: &[ResolvedFile],
        context: &Value,
        report: &mut RunReport,
    ) -> Result<(), GenerateError> {
        for file in files {
            let path = self.destination.join(&file.destination);
            if file.keep_existing && path.exists() {
                tracing::debug!(file = %file.destination, "keeping existing file");
                report.kept.push(file.destination.clone());
                continue;
            }
            let text = self.render(file, context).map_err(|source| GenerateError::Render {
                destination: file.destination.clone(),
                source,
            })?;
            write_file(&path, &text).map_err(|source| GenerateError::Write { path, source })?;
            report.written.push(file.destination.clone());
        }
        Ok(())
    }

    fn remove_stale(&self, report: &mut RunReport) {
        for stale in manifest::stale_compose_files(self.config.dialect()) {
            let path = self.destination.join(stale);
            if !path.exists() {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(file = stale, "removed stale compose file");
                    report.removed.push((*stale).to_string());
                }
                Err(err) => report.warn(format!("cannot remove stale '{stale}': {err}")),
            }
        }
    }

    #[tracing::instrument(skip_all, fields(entity = %planned.entity.entity_class))]
    fn write_entity(&self, planned: &PlannedEntity, base: &Value, report: &mut RunReport) -> Result<(), EntityError> {
        let entity = &planned.entity;
        let context = render::merge_context(&[base, &entity.to_context()]);

        for file in &planned.files {
            let text = self.render(file, &context).map_err(|source| EntityError::Render {
                destination: file.destination.clone(),
                source,
            })?;
            let path = self.destination.join(&file.destination);
            write_file(&path, &text).map_err(|source| EntityError::Write { path, source })?;
            report.written.push(file.destination.clone());
        }

        if self.config.dialect().is_relational() {
            self.write_migration(entity, &context, report)?;
        }
        Ok(())
    }

    fn write_migration(
        &self,
        entity: &AnnotatedEntity,
        context: &Value,
        report: &mut RunReport,
    ) -> Result<(), EntityError> {
        let registry = self.migrations();
        let table = &entity.entity_table_name;
        if !registry.should_create(table)? {
            report.migrations_skipped.push(table.clone());
            return Ok(());
        }

        let name = MigrationRegistry::record_name(&entity.migration_timestamp, table);
        for (source, file_name) in manifest::ENTITY_MIGRATION_TEMPLATES {
            let destination = format!("{}/{name}/{file_name}", manifest::MIGRATIONS_DIR);
            let text = self
                .templates
                .load(source)
                .and_then(|template| self.renderer.render(source, &template, context))
                .map_err(|source| EntityError::Render {
                    destination: destination.clone(),
                    source,
                })?;
            let path = self.destination.join(&destination);
            write_file(&path, &text).map_err(|source| EntityError::Write { path, source })?;
            report.written.push(destination);
        }

        tracing::info!(migration = %name, "created migration");
        report.migrations_created.push(name);
        Ok(())
    }

    /// One fragment per entity per active marker, unless the target already holds it. A missing marker in
    /// strict mode aborts the run.
    #[tracing::instrument(skip_all, fields(entities = entities.len()))]
    fn inject(&self, entities: &[&AnnotatedEntity], report: &mut RunReport) -> Result<(), GenerateError> {
        for entity in entities {
            for marker in markers::active(self.config.docs_enabled()) {
                let path = self.destination.join(marker.target());
                let fragment = marker.fragment(entity);
                let content = inject::read_target(&path)?;
                if inject::contains_fragment(&content, &fragment) {
                    tracing::debug!(entity = %entity.entity_class, marker = marker.token(), "fragment already present");
                    report.injections_present += 1;
                    continue;
                }
                let warning =
                    inject::inject_file(self.injector.as_ref(), &path, &content, marker.token(), &fragment)?;
                match warning {
                    Some(warning) => report.warn(warning),
                    None => report.injections += 1,
                }
            }
        }
        Ok(())
    }

    fn sync_schema(&self, report: &mut RunReport) {
        let Some(sync) = &self.schema_sync else {
            return;
        };
        if !self.config.dialect().is_relational() {
            return;
        }
        if let SyncOutcome::Warning(message) = sync.sync(&self.destination) {
            report.warn(message);
        }
    }

    fn render(&self, file: &ResolvedFile, context: &Value) -> Result<String, render::RenderError> {
        let template = self.templates.load(&file.source)?;
        self.renderer.render(&file.source, &template, context)
    }
}

fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)
}
