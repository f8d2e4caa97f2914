//! Error types for statbind.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Binding failures live in [`TemplateError`], catalog and parameter
//! validation failures in [`CatalogError`]; [`Error`] wraps both together
//! with I/O and parse failures from loading manifests and parameter files.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while parsing or binding a template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// One or more placeholders have no entry in the parameter set.
    ///
    /// Names are listed once each, in order of first appearance.
    #[error("missing parameter(s): {}", .names.join(", "))]
    MissingParameters {
        /// The unbound placeholder names.
        names: Vec<String>,
    },

    /// A placeholder was opened but the template ended before its `}`.
    #[error("unclosed placeholder starting at position {position} in template")]
    MalformedTemplate {
        /// Byte offset of the opening `{`.
        position: usize,
    },

    /// A float bound to a placeholder is NaN or infinite.
    #[error("parameter '{name}' is not a finite number")]
    NonFiniteValue {
        /// The parameter holding the value.
        name: String,
    },
}

/// Failures in catalog definitions or in values checked against them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No template with this id exists in the catalog.
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),

    /// Two templates share an id.
    #[error("duplicate template id '{0}'")]
    DuplicateTemplate(String),

    /// A template or parameter definition is inconsistent.
    #[error("invalid definition in template '{template}': {reason}")]
    InvalidDefinition { template: String, reason: String },

    /// A value does not satisfy its parameter definition.
    #[error("invalid value for parameter '{parameter}': {reason}")]
    InvalidValue { parameter: String, reason: String },

    /// The source references a placeholder that no parameter declares.
    #[error(
        "template '{template}' references undeclared placeholder '{{{name}}}'. \
         Declare it as a parameter or escape it as '{{{{{name}}}}}'."
    )]
    UndeclaredPlaceholder { template: String, name: String },
}

/// Main error type for statbind operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A manifest, script source, or parameter file could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for statbind operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_lists_every_name() {
        let err = TemplateError::MissingParameters {
            names: vec!["alpha".to_string(), "beta".to_string()],
        };
        assert_eq!(err.to_string(), "missing parameter(s): alpha, beta");
    }

    #[test]
    fn malformed_template_reports_position() {
        let err = TemplateError::MalformedTemplate { position: 7 };
        assert_eq!(
            err.to_string(),
            "unclosed placeholder starting at position 7 in template"
        );
    }

    #[test]
    fn undeclared_placeholder_suggests_escape() {
        let err = CatalogError::UndeclaredPlaceholder {
            template: "knn".to_string(),
            name: "prediction".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "template 'knn' references undeclared placeholder '{prediction}'. \
             Declare it as a parameter or escape it as '{{prediction}}'."
        );
    }

    #[test]
    fn wrapped_errors_are_transparent() {
        let err: Error = TemplateError::NonFiniteValue {
            name: "std".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "parameter 'std' is not a finite number");

        let err: Error = CatalogError::UnknownTemplate("violin".to_string()).into();
        assert_eq!(err.to_string(), "unknown template 'violin'");
    }

    #[test]
    fn io_error_names_the_path() {
        let err = Error::Io {
            path: PathBuf::from("/tmp/catalog.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "failed to read '/tmp/catalog.yaml': not found");
    }
}
