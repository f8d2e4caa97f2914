//! Template parsing and substitution.

use super::params::ParameterSet;
use crate::error::TemplateError;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Escapes, or `{` + identifier with an optional closing `}`.
///
/// Anything else containing braces (`{}`, `{'a': 1}`, `{x:.2f}`) is left to
/// the literal text between matches.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)(\})?").expect("token pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Whether `name` can appear as a placeholder, i.e. `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { name: String },
}

/// A parsed template.
///
/// Parsing scans the text once and keeps the result as a list of literal
/// and placeholder segments; rendering walks that list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    placeholders: Vec<String>,
}

impl Template {
    /// Parse template text.
    ///
    /// # Errors
    ///
    /// `TemplateError::MalformedTemplate` if a placeholder name runs to the
    /// end of the text without a closing `}`.
    pub fn parse(text: impl Into<String>) -> Result<Self, TemplateError> {
        let source = text.into();
        let mut segments = Vec::new();
        let mut placeholders = Vec::new();
        let mut seen = BTreeSet::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN.captures_iter(&source) {
            let Some(token) = caps.get(0) else { continue };
            literal.push_str(&source[last..token.start()]);
            last = token.end();

            match (caps.get(1), caps.get(2)) {
                (Some(name), Some(_)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let name = name.as_str().to_string();
                    if seen.insert(name.clone()) {
                        placeholders.push(name.clone());
                    }
                    segments.push(Segment::Placeholder { name });
                }
                (Some(_), None) if token.end() == source.len() => {
                    return Err(TemplateError::MalformedTemplate {
                        position: token.start(),
                    });
                }
                // `{name` followed by something other than `}`: script syntax
                (Some(_), None) => literal.push_str(token.as_str()),
                (None, _) if token.as_str() == "{{" => literal.push('{'),
                (None, _) => literal.push('}'),
            }
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source,
            segments,
            placeholders,
        })
    }

    /// The raw template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names in order of first appearance.
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Placeholder names with no entry in `params`, in order of first
    /// appearance.
    pub fn missing(&self, params: &ParameterSet) -> Vec<String> {
        self.placeholders
            .iter()
            .filter(|name| !params.contains(name))
            .cloned()
            .collect()
    }

    /// Substitute every placeholder with the literal form of its value.
    ///
    /// All placeholders are checked against `params` before any text is
    /// produced; entries in `params` the template does not use are ignored.
    ///
    /// ```
    /// use statbind::{ParameterSet, Template};
    ///
    /// let template = Template::parse("mean = {mean}, std = {std}").unwrap();
    /// let params = ParameterSet::new().with("mean", 0).with("std", 1);
    /// assert_eq!(template.render(&params).unwrap().as_str(), "mean = 0, std = 1");
    /// ```
    pub fn render(&self, params: &ParameterSet) -> Result<RenderedScript, TemplateError> {
        let missing = self.missing(params);
        if !missing.is_empty() {
            return Err(TemplateError::MissingParameters { names: missing });
        }

        let mut text = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => text.push_str(s),
                Segment::Placeholder { name } => {
                    let literal = params
                        .get(name)
                        .and_then(|value| value.literal())
                        .ok_or_else(|| TemplateError::NonFiniteValue { name: name.clone() })?;
                    text.push_str(&literal);
                }
            }
        }

        debug!(
            placeholders = self.placeholders.len(),
            bytes = text.len(),
            "rendered template"
        );
        Ok(RenderedScript { text })
    }
}

/// Template text with every placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderedScript {
    text: String,
}

impl RenderedScript {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for RenderedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RenderedScript {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl From<RenderedScript> for String {
    fn from(script: RenderedScript) -> Self {
        script.text
    }
}
