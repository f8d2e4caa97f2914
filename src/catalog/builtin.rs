//! Built-in statistics scripts embedded at compile time.
//!
//! The manifest and every script under `templates/` are compiled into the
//! library via [`include_str!`], so the built-in catalog never depends on
//! the runtime filesystem layout.
//!
//! When adding or removing a script, update both `templates/catalog.yaml`
//! and [`BUILTIN_SOURCES`].

use super::Catalog;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// The number of built-in script templates.
pub const BUILTIN_TEMPLATE_COUNT: usize = 6;

const MANIFEST: &str = include_str!("../../templates/catalog.yaml");

/// Script sources keyed by the `source_file` names used in the manifest.
const BUILTIN_SOURCES: &[(&str, &str)] = &[
    (
        "scatter_plot.py",
        include_str!("../../templates/scatter_plot.py"),
    ),
    ("histogram.py", include_str!("../../templates/histogram.py")),
    (
        "hypothesis_test.py",
        include_str!("../../templates/hypothesis_test.py"),
    ),
    (
        "knn_classifier.py",
        include_str!("../../templates/knn_classifier.py"),
    ),
    (
        "central_limit_theorem.py",
        include_str!("../../templates/central_limit_theorem.py"),
    ),
    (
        "pca_visualization.py",
        include_str!("../../templates/pca_visualization.py"),
    ),
];

impl Catalog {
    /// The bundled scripts: scatter plot, histogram, t-test, k-NN, central
    /// limit theorem and PCA.
    ///
    /// # Examples
    ///
    /// ```
    /// use statbind::{Catalog, ParameterSet};
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// let knn = catalog.get("knn_classifier").unwrap();
    /// let script = knn.render(&ParameterSet::new().with("k", 7)).unwrap();
    /// assert!(script.as_str().contains("k = 7\n"));
    /// ```
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_with(MANIFEST, |_, file| {
            BUILTIN_SOURCES
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, source)| source.to_string())
                .ok_or_else(|| Error::Io {
                    path: PathBuf::from("templates").join(file),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "not a built-in script source",
                    ),
                })
        })
    }
}
