//! Catalog loading, validation, and lookup.

use super::model::{ParameterDefinition, ParameterKind, ScriptTemplate};
use crate::error::{CatalogError, Error, Result};
use crate::template::is_identifier;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Top-level shape of a catalog manifest.
///
/// Unknown fields are ignored for forward compatibility.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    templates: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    libraries: Vec<String>,
    /// Inline script text.
    #[serde(default)]
    source: Option<String>,
    /// Script file, relative to the manifest's directory.
    #[serde(default)]
    source_file: Option<String>,
    #[serde(default)]
    parameters: Vec<ParameterDefinition>,
}

/// An ordered collection of script templates with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: Vec<ScriptTemplate>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog manifest from a YAML file.
    ///
    /// `source_file` entries are read relative to the manifest's directory.
    ///
    /// # Errors
    ///
    /// * `Error::Io` - the manifest or a script file cannot be read
    /// * `Error::Yaml` - the manifest is not valid YAML for the expected shape
    /// * `Error::Catalog` / `Error::Template` - a template fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let catalog = Self::from_yaml_with(&content, |_, file| {
            let script_path = base.join(file);
            std::fs::read_to_string(&script_path).map_err(|source| Error::Io {
                path: script_path,
                source,
            })
        })?;

        debug!(path = %path.display(), templates = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Parse a manifest whose entries all carry inline `source`.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_yaml_with(yaml, |id, file| {
            Err(invalid_definition(
                id,
                format!(
                    "source_file '{}' requires loading the manifest from disk",
                    file
                ),
            ))
        })
    }

    /// Parse a manifest, calling `read_source(id, source_file)` for each
    /// `source_file` entry.
    pub fn from_yaml_with<F>(yaml: &str, mut read_source: F) -> Result<Self>
    where
        F: FnMut(&str, &str) -> Result<String>,
    {
        let manifest: Manifest = serde_yaml::from_str(yaml)?;
        let mut catalog = Catalog::new();

        for entry in manifest.templates {
            let source = match (entry.source, entry.source_file) {
                (Some(source), None) => source,
                (None, Some(file)) => read_source(&entry.id, &file)?,
                (Some(_), Some(_)) => {
                    return Err(invalid_definition(
                        &entry.id,
                        "set either `source` or `source_file`, not both",
                    ));
                }
                (None, None) => {
                    return Err(invalid_definition(
                        &entry.id,
                        "missing `source` or `source_file`",
                    ));
                }
            };

            let mut template = ScriptTemplate::new(entry.id, &source, entry.parameters)?;
            if let Some(name) = entry.name {
                template.name = name;
            }
            template.description = entry.description;
            template.category = entry.category;
            template.libraries = entry.libraries;

            catalog.insert(template)?;
        }

        Ok(catalog)
    }

    /// Add a template after validating it.
    ///
    /// # Errors
    ///
    /// * `CatalogError::DuplicateTemplate` - the id is already present
    /// * `CatalogError::InvalidDefinition` / `UndeclaredPlaceholder` - see
    ///   [`validate_template`]
    pub fn insert(&mut self, template: ScriptTemplate) -> Result<()> {
        if self.get(&template.id).is_some() {
            return Err(CatalogError::DuplicateTemplate(template.id).into());
        }
        validate_template(&template)?;
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ScriptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Like [`get`](Self::get) but reports an unknown id as an error.
    pub fn require(&self, id: &str) -> Result<&ScriptTemplate> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownTemplate(id.to_string()).into())
    }

    /// Templates in `category`, in catalog order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ScriptTemplate> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.templates
            .iter()
            .map(|t| t.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ScriptTemplate;
    type IntoIter = std::slice::Iter<'a, ScriptTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

fn invalid_definition(template: &str, reason: impl Into<String>) -> Error {
    CatalogError::InvalidDefinition {
        template: template.to_string(),
        reason: reason.into(),
    }
    .into()
}

/// Check a template's definitions against each other and against its source.
///
/// Validation rules:
/// - the id is non-empty
/// - parameter names are identifiers and unique
/// - `min <= max` when both are set
/// - `step` is positive when set
/// - `select` parameters have at least one option
/// - every default satisfies its own definition
/// - every placeholder in the source is a declared parameter
///
/// A declared parameter the source never uses is logged, not rejected.
pub fn validate_template(template: &ScriptTemplate) -> Result<()> {
    let id = template.id.as_str();
    if id.trim().is_empty() {
        return Err(invalid_definition(id, "template id must be non-empty"));
    }

    let mut names = BTreeSet::new();
    for param in &template.parameters {
        if !is_identifier(&param.name) {
            return Err(invalid_definition(
                id,
                format!("parameter name '{}' is not a valid identifier", param.name),
            ));
        }
        if !names.insert(param.name.as_str()) {
            return Err(invalid_definition(
                id,
                format!("parameter '{}' is declared more than once", param.name),
            ));
        }
        if let (Some(min), Some(max)) = (param.min, param.max) {
            if min > max {
                return Err(invalid_definition(
                    id,
                    format!("parameter '{}' has min {} greater than max {}", param.name, min, max),
                ));
            }
        }
        if param.step.is_some_and(|step| step <= 0.0) {
            return Err(invalid_definition(
                id,
                format!("parameter '{}' has a step that is not positive", param.name),
            ));
        }
        if param.kind == ParameterKind::Select && param.options.is_empty() {
            return Err(invalid_definition(
                id,
                format!("select parameter '{}' has no options", param.name),
            ));
        }
        param.validate_value(&param.default).map_err(|e| {
            invalid_definition(id, format!("default for '{}' is invalid: {}", param.name, e))
        })?;
    }

    let placeholders = template.template().placeholders();
    if let Some(name) = placeholders.iter().find(|p| !names.contains(p.as_str())) {
        return Err(CatalogError::UndeclaredPlaceholder {
            template: id.to_string(),
            name: name.clone(),
        }
        .into());
    }

    for name in names.iter().filter(|n| !placeholders.iter().any(|p| p == *n)) {
        warn!(template = id, parameter = name, "declared parameter is not used by the source");
    }

    Ok(())
}
