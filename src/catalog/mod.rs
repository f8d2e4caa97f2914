//! Script catalog: bundled and user-supplied parameterized scripts.
//!
//! A catalog entry pairs a [`Template`](crate::Template) with the metadata
//! a caller needs to drive it: display name, category, required libraries,
//! and one [`ParameterDefinition`] per placeholder with its default and
//! limits. Catalogs come from a YAML manifest (see [`Catalog::load`]) or
//! from the built-in set ([`Catalog::builtin`]).
//!
//! # Manifest
//!
//! ```yaml
//! templates:
//!   - id: knn_classifier
//!     name: k-NN Classifier
//!     category: machine_learning
//!     libraries: [numpy, scikit-learn, plotly]
//!     source_file: knn_classifier.py
//!     parameters:
//!       - name: k
//!         kind: range
//!         default: 5
//!         min: 1
//!         max: 20
//! ```

pub mod builtin;
mod model;
mod operations;


pub use builtin::BUILTIN_TEMPLATE_COUNT;
pub use model::{ParameterDefinition, ParameterKind, ScriptTemplate, SelectOption};
pub use operations::{Catalog, validate_template};
