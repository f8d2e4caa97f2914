//! statbind: parameter binding for templated statistics scripts.
//!
//! Scripts are plain text with `{name}` placeholders. This crate parses
//! them, binds numeric and string parameters deterministically, and hands
//! back the rendered text; running it is left to an external interpreter.
//!
//! - [`template`]: the binder ([`Template`], [`ParameterSet`], [`render`])
//! - [`catalog`]: scripts with declared parameters, defaults and limits,
//!   loaded from a YAML manifest or the built-in set
//!
//! # Usage
//!
//! ```
//! use statbind::{Catalog, ParameterSet, render};
//!
//! let params = ParameterSet::new().with("mean", 0).with("std", 1);
//! let script = render("mean = {mean}, std = {std}", &params).unwrap();
//! assert_eq!(script.as_str(), "mean = 0, std = 1");
//!
//! let catalog = Catalog::builtin().unwrap();
//! let histogram = catalog.get("histogram").unwrap();
//! let script = histogram.render(&ParameterSet::new().with("bins", 40)).unwrap();
//! assert!(script.as_str().contains("bins = 40\n"));
//! ```

pub mod catalog;
pub mod error;
pub mod template;

pub use catalog::{Catalog, ParameterDefinition, ParameterKind, ScriptTemplate, SelectOption};
pub use error::{CatalogError, Error, Result, TemplateError};
pub use template::{ParamValue, ParameterSet, RenderedScript, Template, render};
