//! Rendering collaborator seam.
//!
//! The generator decides which templates to render and where; turning a template into text is delegated to a
//! [`Renderer`] fed from a [`TemplateSource`]. The built-in [`PlaceholderRenderer`] only substitutes
//! `{{ dotted.path }}` lookups into the JSON render context, which is enough for simple template sets and for
//! tests; richer engines plug in through the trait.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{name}' not found")]
    MissingTemplate { name: String },

    #[error("cannot read template '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{template}' references unknown value '{key}'")]
    UnknownValue { template: String, key: String },

    #[error("template '{template}' has an unterminated placeholder")]
    Unterminated { template: String },
}

// ============================================================================
// Template sources
// ============================================================================

/// Where template text comes from.
pub trait TemplateSource {
    fn load(&self, name: &str) -> Result<String, RenderError>;
}

/// Templates read from a directory tree; template names are relative paths.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirectoryTemplates {
    fn load(&self, name: &str) -> Result<String, RenderError> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => RenderError::MissingTemplate { name: name.to_string() },
            _ => RenderError::Io { path, source },
        })
    }
}

/// Templates held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    templates: HashMap<String, String>,
    /// Served for names without an explicit entry.
    fallback: Option<String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.templates.insert(name.into(), text.into());
        self
    }

    /// Serve `text` for every template not registered explicitly.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }
}

impl TemplateSource for MemoryTemplates {
    fn load(&self, name: &str) -> Result<String, RenderError> {
        self.templates
            .get(name)
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| RenderError::MissingTemplate { name: name.to_string() })
    }
}

// ============================================================================
// Renderers
// ============================================================================

pub trait Renderer {
    fn render(&self, name: &str, template: &str, context: &Value) -> Result<String, RenderError>;
}

/// Substitutes `{{ path.to.value }}` placeholders.
///
/// Strings render verbatim, `null` renders empty, other values render as compact JSON. Array elements are
/// addressed by index (`fields.0.storageType`).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl Renderer for PlaceholderRenderer {
    fn render(&self, name: &str, template: &str, context: &Value) -> Result<String, RenderError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after.find("}}").ok_or_else(|| RenderError::Unterminated {
                template: name.to_string(),
            })?;
            let key = after[..close].trim();
            let value = lookup(context, key).ok_or_else(|| RenderError::UnknownValue {
                template: name.to_string(),
                key: key.to_string(),
            })?;
            match value {
                Value::String(text) => out.push_str(text),
                Value::Null => {}
                other => out.push_str(&other.to_string()),
            }
            rest = &after[close + 2..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn lookup<'a>(context: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(context, |value, segment| match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Merge JSON objects left to right; later keys win.
pub fn merge_context(layers: &[&Value]) -> Value {
    let mut merged = serde_json::Map::new();
    for layer in layers {
        if let Value::Object(map) = layer {
            for (key, value) in map {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_placeholders() {
        let ctx = json!({
            "baseName": "shop",
            "meta": { "port": 8080 },
            "fields": [{ "name": "price" }],
            "none": null,
        });
        let out = PlaceholderRenderer
            .render("t", "app={{ baseName }} port={{meta.port}} f={{ fields.0.name }} n=[{{ none }}]", &ctx)
            .unwrap();
        assert_eq!(out, "app=shop port=8080 f=price n=[]");
    }

    #[test]
    fn test_unknown_value() {
        let err = PlaceholderRenderer.render("main.rs", "{{ nope }}", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::UnknownValue { ref key, .. } if key == "nope"));
    }

    #[test]
    fn test_unterminated() {
        let err = PlaceholderRenderer.render("main.rs", "a {{ b", &json!({ "b": 1 })).unwrap_err();
        assert!(matches!(err, RenderError::Unterminated { .. }));
    }

    #[test]
    fn test_memory_templates_fallback() {
        let source = MemoryTemplates::new().with("a", "A");
        assert_eq!(source.load("a").unwrap(), "A");
        assert!(source.load("b").is_err());

        let source = source.with_fallback("*");
        assert_eq!(source.load("b").unwrap(), "*");
    }

    #[test]
    fn test_merge_context_later_wins() {
        let merged = merge_context(&[&json!({ "a": 1, "b": 1 }), &json!({ "b": 2 })]);
        assert_eq!(merged, json!({ "a": 1, "b": 2 }));
    }
}
