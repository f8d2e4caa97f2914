//! Catalog data types: parameter definitions and script templates.

use crate::error::{CatalogError, Result};
use crate::template::{ParamValue, ParameterSet, RenderedScript, Template};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a parameter is presented to the caller, and which values it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Numeric slider between `min` and `max`.
    #[default]
    Range,
    /// Free numeric entry, optionally bounded by `min`/`max`.
    Number,
    /// One of a fixed list of options.
    Select,
    /// Free text.
    Text,
}

/// One entry of a `select` parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: ParamValue,
}

/// Declared parameter of a script template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Placeholder name bound by this parameter.
    pub name: String,

    /// Human-readable label (defaults to empty).
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub kind: ParameterKind,

    /// Value used when the caller does not supply one.
    pub default: ParamValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Increment between accepted values, counted from `min` (or zero).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl ParameterDefinition {
    /// Check `value` against this definition's kind and constraints.
    ///
    /// - `range` / `number`: numeric, finite, within `[min, max]`, and on the
    ///   `step` grid when a step is set
    /// - `select`: equal to one of the option values (numbers compare by value)
    /// - `text`: a string
    pub fn validate_value(&self, value: &ParamValue) -> std::result::Result<(), CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidValue {
            parameter: self.name.clone(),
            reason,
        };

        match self.kind {
            ParameterKind::Range | ParameterKind::Number => {
                let Some(x) = value.as_f64() else {
                    return Err(invalid(format!(
                        "expected a number, got {} '{}'",
                        value.type_name(),
                        value
                    )));
                };
                if !x.is_finite() {
                    return Err(invalid("value must be finite".to_string()));
                }
                if let Some(min) = self.min.filter(|&min| x < min) {
                    return Err(invalid(format!("{} is below the minimum {}", value, min)));
                }
                if let Some(max) = self.max.filter(|&max| x > max) {
                    return Err(invalid(format!("{} is above the maximum {}", value, max)));
                }
                if let Some(step) = self.step.filter(|&step| step > 0.0) {
                    let base = self.min.unwrap_or(0.0);
                    if !on_grid((x - base) / step) {
                        return Err(invalid(format!(
                            "{} is not a multiple of the step {} from {}",
                            value, step, base
                        )));
                    }
                }
                Ok(())
            }
            ParameterKind::Select => {
                if self.options.iter().any(|o| same_value(&o.value, value)) {
                    Ok(())
                } else {
                    let allowed = self
                        .options
                        .iter()
                        .map(|o| o.value.to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(invalid(format!("'{}' is not one of: {}", value, allowed)))
                }
            }
            ParameterKind::Text => match value {
                ParamValue::Str(_) => Ok(()),
                other => Err(invalid(format!(
                    "expected text, got {} '{}'",
                    other.type_name(),
                    other
                ))),
            },
        }
    }
}

/// Whether `steps` is a whole number, allowing for decimal steps such as
/// `0.1` that have no exact binary form.
fn on_grid(steps: f64) -> bool {
    (steps - steps.round()).abs() <= 1e-9 * steps.abs().max(1.0)
}

/// Numbers compare numerically (`0.1` matches `0.10`, `5` matches `5.0`);
/// strings compare exactly; a number never equals a string.
fn same_value(a: &ParamValue, b: &ParamValue) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.as_str() == b.as_str(),
        _ => false,
    }
}

/// A parameterized script together with its metadata.
#[derive(Debug, Clone)]
pub struct ScriptTemplate {
    /// Unique id within a catalog (e.g. `"knn_classifier"`).
    pub id: String,
    /// Display name.
    pub name: String,
    pub description: String,
    /// Grouping such as `"visualization"` or `"statistics"`.
    pub category: String,
    /// Libraries the script imports, for the execution environment to preload.
    pub libraries: Vec<String>,
    /// Declared parameters in presentation order.
    pub parameters: Vec<ParameterDefinition>,
    template: Template,
}

impl ScriptTemplate {
    /// Create a script template from its id, source text, and parameters.
    ///
    /// Name defaults to the id; other metadata starts empty. Consistency
    /// between parameters and source is checked when the template is added
    /// to a [`Catalog`](super::Catalog).
    pub fn new(
        id: impl Into<String>,
        source: &str,
        parameters: Vec<ParameterDefinition>,
    ) -> Result<Self> {
        let id = id.into();
        Ok(Self {
            name: id.clone(),
            id,
            description: String::new(),
            category: String::new(),
            libraries: Vec::new(),
            parameters,
            template: Template::parse(source)?,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn source(&self) -> &str {
        self.template.source()
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Every declared parameter bound to its default.
    pub fn defaults(&self) -> ParameterSet {
        self.parameters
            .iter()
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect()
    }

    /// Complete, validated parameters for this script.
    ///
    /// Starts from the declared defaults and overlays `overrides` for
    /// declared names. Names the script does not declare are dropped.
    ///
    /// # Errors
    ///
    /// `CatalogError::InvalidValue` if an override violates its definition.
    pub fn resolve(&self, overrides: &ParameterSet) -> Result<ParameterSet> {
        let mut resolved = ParameterSet::new();
        for definition in &self.parameters {
            let value = overrides.get(&definition.name).unwrap_or(&definition.default);
            definition.validate_value(value)?;
            resolved.insert(definition.name.clone(), value.clone());
        }

        for name in overrides.names().filter(|n| self.parameter(n).is_none()) {
            debug!(template = %self.id, parameter = name, "ignoring undeclared parameter");
        }

        Ok(resolved)
    }

    /// Resolve `overrides` against the declared parameters and bind the result.
    pub fn render(&self, overrides: &ParameterSet) -> Result<RenderedScript> {
        let params = self.resolve(overrides)?;
        Ok(self.template.render(&params)?)
    }
}
