//! File-set planning.
//!
//! A manifest is a static list of [`OutputGroup`]s. Each group has an optional pure predicate over the
//! [`GenerationConfig`] and a list of templates; [`plan`] expands the included groups into concrete
//! `(source template, destination path)` pairs in manifest order.
//!
//! ## Ordering and overrides
//!
//! Groups are evaluated independently. When two included groups target the same destination the later one
//! wins, but the file keeps the position of its first occurrence so the plan order stays stable.
//!
//! ## Exclusive choices
//!
//! Groups may be tagged with a choice name (e.g. `"database-layer"`). [`plan`] does not enforce anything about
//! choices; [`check_choices`] verifies that every choice is satisfied by exactly one included group and is run
//! by the orchestrator before any write.

pub mod manifest;

use std::collections::HashMap;

use servergen_core::naming;
use thiserror::Error;

use crate::config::GenerationConfig;

/// Placeholder token substituted with the normalized entity name in destination paths.
pub const ENTITY_PLACEHOLDER: &str = "_entityFileName_";

/// Inclusion predicate of a group.
pub type Predicate = fn(&GenerationConfig) -> bool;

/// Errors raised while planning, always before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    #[error("exclusive choice '{choice}' matched {matched} groups (expected exactly one): {groups:?}")]
    ExclusiveChoice {
        choice: &'static str,
        matched: usize,
        groups: Vec<&'static str>,
    },

    #[error("template '{template}' in group '{group}' uses the entity placeholder but no entity is bound")]
    UnboundPlaceholder { group: &'static str, template: &'static str },
}

// ============================================================================
// Manifest types
// ============================================================================

/// One template of a group: its source name and an optional destination rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub source: &'static str,
    pub rename: Option<&'static str>,
    /// Only written when the destination does not exist yet; later runs leave it to the user and to injection.
    pub keep_existing: bool,
}

impl Template {
    /// A template written under its own name.
    pub const fn file(source: &'static str) -> Self {
        Self {
            source,
            rename: None,
            keep_existing: false,
        }
    }

    /// A template written under a different destination name.
    pub const fn renamed(source: &'static str, destination: &'static str) -> Self {
        Self {
            source,
            rename: Some(destination),
            keep_existing: false,
        }
    }

    /// A template written once and kept on later runs (aggregators, user-tuned configuration).
    pub const fn kept(source: &'static str) -> Self {
        Self {
            source,
            rename: None,
            keep_existing: true,
        }
    }

    pub fn destination(&self) -> &'static str {
        self.rename.unwrap_or(self.source)
    }
}

/// A declarative group of output files.
#[derive(Debug, Clone, Copy)]
pub struct OutputGroup {
    /// Group name, used in logs and errors.
    pub name: &'static str,
    /// Directory prefix for both the source and destination of every template (`""` for the root).
    pub path: &'static str,
    pub condition: Option<Predicate>,
    /// Exclusive choice this group is one alternative of.
    pub choice: Option<&'static str>,
    pub templates: &'static [Template],
}

impl OutputGroup {
    /// An unconditional group.
    pub const fn always(name: &'static str, path: &'static str, templates: &'static [Template]) -> Self {
        Self {
            name,
            path,
            condition: None,
            choice: None,
            templates,
        }
    }

    /// A group included only when `condition` holds.
    pub const fn when(
        name: &'static str,
        path: &'static str,
        condition: Predicate,
        templates: &'static [Template],
    ) -> Self {
        Self {
            name,
            path,
            condition: Some(condition),
            choice: None,
            templates,
        }
    }

    /// Tag the group as one alternative of an exclusive choice.
    pub const fn exclusive(mut self, choice: &'static str) -> Self {
        self.choice = Some(choice);
        self
    }

    pub fn is_included(&self, config: &GenerationConfig) -> bool {
        self.condition.is_none_or(|condition| condition(config))
    }
}

/// What a plan is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    /// Project-wide files; no entity is bound.
    Global,
    /// Files of one entity, keyed by its (raw or normalized) file name.
    Entity(&'a str),
}

/// One file to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub group: &'static str,
    /// Template name as looked up in the template source.
    pub source: String,
    /// Destination path relative to the output root, `/`-separated.
    pub destination: String,
    /// Leave an existing destination untouched.
    pub keep_existing: bool,
}

// ============================================================================
// Planning
// ============================================================================

/// Expand the included groups of a manifest into concrete files.
///
/// Returns [`PlanningError::UnboundPlaceholder`] when a destination uses the entity placeholder in
/// [`Scope::Global`].
#[tracing::instrument(skip_all, fields(groups = groups.len(), scope = ?scope))]
pub fn plan(
    groups: &[OutputGroup],
    config: &GenerationConfig,
    scope: Scope<'_>,
) -> Result<Vec<ResolvedFile>, PlanningError> {
    let mut files: Vec<ResolvedFile> = Vec::new();
    let mut by_destination: HashMap<String, usize> = HashMap::new();

    for group in groups.iter().filter(|group| group.is_included(config)) {
        for template in group.templates {
            let destination = bind_entity(&join(group.path, template.destination()), scope).ok_or(
                PlanningError::UnboundPlaceholder {
                    group: group.name,
                    template: template.source,
                },
            )?;
            let file = ResolvedFile {
                group: group.name,
                source: join(group.path, template.source),
                destination,
                keep_existing: template.keep_existing,
            };

            match by_destination.get(&file.destination) {
                Some(&index) => {
                    tracing::debug!(destination = %file.destination, group = group.name, "overriding earlier group");
                    files[index] = file;
                }
                None => {
                    by_destination.insert(file.destination.clone(), files.len());
                    files.push(file);
                }
            }
        }
    }

    Ok(files)
}

/// Verify that every exclusive choice in `groups` matches exactly one included group.
pub fn check_choices(groups: &[OutputGroup], config: &GenerationConfig) -> Result<(), PlanningError> {
    let mut choices: Vec<&'static str> = groups.iter().filter_map(|group| group.choice).collect();
    choices.sort_unstable();
    choices.dedup();

    for choice in choices {
        let matched: Vec<&'static str> = groups
            .iter()
            .filter(|group| group.choice == Some(choice) && group.is_included(config))
            .map(|group| group.name)
            .collect();
        if matched.len() != 1 {
            return Err(PlanningError::ExclusiveChoice {
                choice,
                matched: matched.len(),
                groups: matched,
            });
        }
    }
    Ok(())
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), name)
    }
}

fn bind_entity(path: &str, scope: Scope<'_>) -> Option<String> {
    if !path.contains(ENTITY_PLACEHOLDER) {
        return Some(path.to_string());
    }
    match scope {
        Scope::Global => None,
        Scope::Entity(name) => Some(path.replace(ENTITY_PLACEHOLDER, &naming::normalize(name))),
    }
}
