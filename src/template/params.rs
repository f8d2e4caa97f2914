//! Parameter sets: the name -> value mapping bound into a template.

use super::value::ParamValue;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from placeholder name to value.
///
/// Backed by a `BTreeMap` so iteration and serialization are sorted by
/// name regardless of insertion order. Entries no template references are
/// allowed and simply ignored at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert).
    ///
    /// ```
    /// use statbind::ParameterSet;
    ///
    /// let params = ParameterSet::new().with("k", 5).with("test_x", 0.5);
    /// assert_eq!(params.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns `defaults` overlaid with the entries of `self`.
    pub fn merged_over(&self, defaults: &ParameterSet) -> ParameterSet {
        let mut merged = defaults.clone();
        for (name, value) in &self.values {
            merged.values.insert(name.clone(), value.clone());
        }
        merged
    }

    /// Parse a YAML mapping of names to scalar values.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON object of names to scalar values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a parameter file, choosing JSON for `.json` and YAML otherwise.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = (&'a String, &'a ParamValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_previous_value() {
        let mut params = ParameterSet::new();
        assert!(params.insert("k", 5).is_none());
        assert_eq!(params.insert("k", 7), Some(ParamValue::Int(5)));
        assert_eq!(params.get("k"), Some(&ParamValue::Int(7)));
    }

    #[test]
    fn iteration_is_sorted_by_name() {
        let params: ParameterSet = [("zeta", 1), ("alpha", 2), ("mu", 3)].into_iter().collect();
        let names: Vec<&str> = params.names().collect();
        assert_eq!(names, vec!["alpha", "mu", "zeta"]);
    }

    #[test]
    fn merged_over_prefers_own_entries() {
        let defaults = ParameterSet::new().with("k", 5).with("n_samples", 100);
        let overrides = ParameterSet::new().with("k", 9).with("extra", "x");

        let merged = overrides.merged_over(&defaults);
        assert_eq!(merged.get("k"), Some(&ParamValue::Int(9)));
        assert_eq!(merged.get("n_samples"), Some(&ParamValue::Int(100)));
        assert_eq!(merged.get("extra"), Some(&ParamValue::from("x")));
    }

    #[test]
    fn parses_yaml_mapping() {
        let params = ParameterSet::from_yaml(
            r#"
k: 5
alpha: 0.05
distribution: exponential
"#,
        )
        .unwrap();

        assert_eq!(params.get("k"), Some(&ParamValue::Int(5)));
        assert_eq!(params.get("alpha"), Some(&ParamValue::Float(0.05)));
        assert_eq!(params.get("distribution"), Some(&ParamValue::from("exponential")));
    }

    #[test]
    fn parses_json_object() {
        let params = ParameterSet::from_json(r#"{"mean": 0, "std": 1.5}"#).unwrap();
        assert_eq!(params.get("mean"), Some(&ParamValue::Int(0)));
        assert_eq!(params.get("std"), Some(&ParamValue::Float(1.5)));
    }

    #[test]
    fn rejects_nested_values() {
        let err = ParameterSet::from_yaml("k: [1, 2]").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));

        let err = ParameterSet::from_json(r#"{"flag": true}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("params.json");
        std::fs::write(&json_path, r#"{"k": 3}"#).unwrap();
        let params = ParameterSet::load(&json_path).unwrap();
        assert_eq!(params.get("k"), Some(&ParamValue::Int(3)));

        let yaml_path = dir.path().join("params.yaml");
        std::fs::write(&yaml_path, "k: 4\n").unwrap();
        let params = ParameterSet::load(&yaml_path).unwrap();
        assert_eq!(params.get("k"), Some(&ParamValue::Int(4)));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = ParameterSet::load(&path).unwrap_err();
        match err {
            Error::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
