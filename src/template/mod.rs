//! Template parameter binding.
//!
//! Templates are script text with `{name}` placeholders. Binding a
//! [`ParameterSet`] replaces each placeholder with the literal form of its
//! value and yields a [`RenderedScript`] ready to hand to an external
//! interpreter. Substitution is purely textual: the result is never parsed
//! or checked as a program.
//!
//! # Syntax
//!
//! - `{name}` - substitutes the value of `name` (`[A-Za-z_][A-Za-z0-9_]*`,
//!   case-sensitive)
//! - `{{` - renders as literal `{`
//! - `}}` - renders as literal `}`
//!
//! Braces that do not form a placeholder pass through unchanged, so dict
//! literals and format specs in the script (`{'a': 1}`, `{x:.3f}`, `{}`)
//! need no escaping. A bare `{name}` the script itself should see, such as
//! an f-string interpolating a runtime variable, is written `{{name}}`.
//!
//! # Error Handling
//!
//! Binding is strict: a placeholder without a value fails with
//! [`TemplateError::MissingParameters`] naming every unbound placeholder,
//! rather than being left in place or replaced by a default.

mod engine;
mod params;
mod value;


pub use engine::{RenderedScript, Template, is_identifier};
pub use params::ParameterSet;
pub use value::ParamValue;

use crate::error::TemplateError;

/// Parse `template` and bind `params` in one step.
///
/// ```
/// use statbind::{ParameterSet, render};
///
/// let params = ParameterSet::new().with("k", 5);
/// assert_eq!(render("k={k}", &params).unwrap().as_str(), "k=5");
/// ```
pub fn render(template: &str, params: &ParameterSet) -> Result<RenderedScript, TemplateError> {
    Template::parse(template)?.render(params)
}
