//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::{Path, PathBuf};

use servergen_core::mapping;
use servergen_core::vocab::dialects;
use servergen_core::vocab::field_kinds;

use crate::config::{GenerationConfig, PROJECT_FILE};
use crate::generate::{GenerateError, Generator};
use crate::inject::TolerantInjector;
use crate::migrate::DieselCli;
use crate::model::{self, EntityDescriptor};
use crate::render::DirectoryTemplates;

use super::{CliError, CliResult, ExitCode, ProjectArgs};

/// Default entity directory, relative to the destination.
pub const ENTITIES_DIR: &str = ".servergen";

// ============================================================================
// Input loading (shared between generate and plan)
// ============================================================================

struct Inputs {
    config: GenerationConfig,
    entities: Vec<EntityDescriptor>,
}

fn load_inputs(project: &ProjectArgs) -> CliResult<Inputs> {
    let config_path = project.config.clone().unwrap_or_else(|| project.out.join(PROJECT_FILE));
    let config = GenerationConfig::load(&config_path).map_err(|e| CliError::diagnostic(GenerateError::from(e)))?;

    let entities = match &project.entities {
        Some(dir) => load_entities(dir)?,
        None => {
            let dir = project.out.join(ENTITIES_DIR);
            if dir.is_dir() {
                load_entities(&dir)?
            } else {
                tracing::info!(dir = %dir.display(), "no entity directory, generating without entities");
                Vec::new()
            }
        }
    };

    Ok(Inputs { config, entities })
}

fn load_entities(dir: &Path) -> CliResult<Vec<EntityDescriptor>> {
    model::load_entities(dir).map_err(|e| CliError::diagnostic(GenerateError::from(e)))
}

// ============================================================================
// Commands
// ============================================================================

/// Generate the server into `project.out`.
pub fn generate(project: &ProjectArgs, templates: &Path, tolerant: bool, sync_schema: bool) -> CliResult<ExitCode> {
    let Inputs { config, entities } = load_inputs(project)?;

    let mut generator = Generator::new(config, project.out.clone(), DirectoryTemplates::new(templates));
    if tolerant {
        generator = generator.with_injector(TolerantInjector);
    }
    if sync_schema {
        generator = generator.with_schema_sync(DieselCli::default());
    }

    let report = generator.run(&entities).map_err(CliError::diagnostic)?;
    print!("{report}");

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new(
            format!("{} of {} entities failed", report.failures.len(), entities.len()),
            ExitCode::PARTIAL,
        ))
    }
}

/// Print every file a run would write.
pub fn plan(project: &ProjectArgs) -> CliResult<ExitCode> {
    let Inputs { config, entities } = load_inputs(project)?;
    let generator = Generator::new(config, project.out.clone(), DirectoryTemplates::new(PathBuf::new()));
    let planned = generator.plan(&entities).map_err(CliError::diagnostic)?;
    let migrations = generator.migrations();

    for file in &planned.global {
        println!("{:<20} {}", file.group, file.destination);
    }
    for entry in &planned.entities {
        let entity = &entry.entity;
        println!("\n# {}", entity.entity_class);
        for file in &entry.files {
            println!("{:<20} {}", file.group, file.destination);
        }
        if generator.config().dialect().is_relational() {
            let table = &entity.entity_table_name;
            let create = migrations
                .should_create(table)
                .map_err(|e| CliError::failure(e.to_string()))?;
            let record = migrations.record_path(&entity.migration_timestamp, table);
            let verb = if create { "create" } else { "exists" };
            println!("{:<20} {} ({verb})", "migration", record.display());
        }
    }
    for name in &planned.skipped_entities {
        println!("\nskipped: {name}");
    }
    for failure in &planned.failures {
        eprintln!("error: entity '{}': {}", failure.entity, failure.error);
    }

    if planned.failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::PARTIAL)
    }
}

/// Print the mapping table of one dialect.
pub fn types(dialect: &str) -> CliResult<ExitCode> {
    let Some(dialect) = dialects::from_str(dialect) else {
        let known: Vec<_> = dialects::DIALECTS.iter().map(|d| d.canonical).collect();
        return Err(CliError::failure(format!(
            "unknown dialect '{dialect}' (expected one of: {})",
            known.join(", ")
        )));
    };

    println!("{:<16} {:<32} {:<28} ORM", "KIND", "STORAGE", "COLUMN");
    for kind in field_kinds::all() {
        let row = mapping::lookup(kind, dialect);
        println!(
            "{:<16} {:<32} {:<28} {}",
            field_kinds::as_str(kind),
            row.storage,
            row.column,
            row.orm_column.unwrap_or("-")
        );
    }
    let fallback = mapping::fallback(dialect);
    println!(
        "{:<16} {:<32} {:<28} {}",
        "(unknown)",
        fallback.storage,
        fallback.column,
        fallback.orm_column.unwrap_or("-")
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_types_accepts_aliases() {
        assert_eq!(types("document").unwrap(), ExitCode::SUCCESS);
        assert_eq!(types("relational-a").unwrap(), ExitCode::SUCCESS);
    }

    #[test]
    fn test_types_rejects_unknown_dialect() {
        let err = types("oracle").unwrap_err();
        assert!(err.message.contains("oracle"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_missing_project_file_fails() {
        let project = ProjectArgs {
            out: std::env::temp_dir().join("servergen_cli_no_project"),
            config: None,
            entities: None,
        };
        assert!(plan(&project).is_err());
    }
}
