//! Parameter values and their textual form.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A literal bound to a placeholder.
///
/// Deserializes from any YAML/JSON scalar except booleans and null, which
/// have no single spelling shared by the scripting languages the
/// templates target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    /// The text substituted for a placeholder bound to this value.
    ///
    /// - integers: plain decimal (`5`, `-3`)
    /// - floats: shortest text that round-trips to the same `f64`, never in
    ///   exponent notation; integral floats drop the fraction (`1.0` -> `1`)
    ///   and negative zero renders as `0`
    /// - strings: verbatim, no quoting or escaping
    ///
    /// Returns `None` for NaN and infinities.
    pub fn literal(&self) -> Option<String> {
        match self {
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::Float(f) if !f.is_finite() => None,
            ParamValue::Float(f) if *f == 0.0 => Some("0".to_string()),
            ParamValue::Float(f) => Some(f.to_string()),
            ParamValue::Str(s) => Some(s.clone()),
        }
    }

    /// Numeric view of the value; `None` for strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Float(f) => Some(*f),
            ParamValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ParamValue::Str(_))
    }

    /// Short type name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(text) => f.write_str(&text),
            // NaN / inf: show what we have even though it cannot be bound
            None => match self {
                ParamValue::Float(x) => write!(f, "{}", x),
                _ => Ok(()),
            },
        }
    }
}

/// Parses form-style input: integer first, then finite float, otherwise
/// the raw text as a string.
impl FromStr for ParamValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(i) = s.parse::<i64>() {
            return Ok(ParamValue::Int(i));
        }
        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(ParamValue::Float(f)),
            _ => Ok(ParamValue::Str(s.to_string())),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_without_decoration() {
        assert_eq!(ParamValue::Int(5).literal().unwrap(), "5");
        assert_eq!(ParamValue::Int(-3).literal().unwrap(), "-3");
        assert_eq!(ParamValue::Int(0).literal().unwrap(), "0");
    }

    #[test]
    fn floats_use_shortest_round_trip_form() {
        assert_eq!(ParamValue::Float(0.75).literal().unwrap(), "0.75");
        assert_eq!(ParamValue::Float(0.1).literal().unwrap(), "0.1");
        assert_eq!(ParamValue::Float(-2.5).literal().unwrap(), "-2.5");
        assert_eq!(ParamValue::Float(0.0000001).literal().unwrap(), "0.0000001");
    }

    #[test]
    fn integral_floats_drop_the_fraction() {
        assert_eq!(ParamValue::Float(1.0).literal().unwrap(), "1");
        assert_eq!(ParamValue::Float(100.0).literal().unwrap(), "100");
    }

    #[test]
    fn negative_zero_renders_as_zero() {
        assert_eq!(ParamValue::Float(-0.0).literal().unwrap(), "0");
    }

    #[test]
    fn non_finite_floats_have_no_literal() {
        assert!(ParamValue::Float(f64::NAN).literal().is_none());
        assert!(ParamValue::Float(f64::INFINITY).literal().is_none());
        assert!(ParamValue::Float(f64::NEG_INFINITY).literal().is_none());
    }

    #[test]
    fn strings_are_verbatim() {
        let value = ParamValue::from("it's \"quoted\" {x}");
        assert_eq!(value.literal().unwrap(), "it's \"quoted\" {x}");
    }

    #[test]
    fn parse_prefers_integer_then_float_then_string() {
        assert_eq!("5".parse::<ParamValue>().unwrap(), ParamValue::Int(5));
        assert_eq!("0.05".parse::<ParamValue>().unwrap(), ParamValue::Float(0.05));
        assert_eq!(
            "uniform".parse::<ParamValue>().unwrap(),
            ParamValue::Str("uniform".to_string())
        );
        assert_eq!(
            "nan".parse::<ParamValue>().unwrap(),
            ParamValue::Str("nan".to_string())
        );
    }

    #[test]
    fn deserializes_scalars() {
        let values: Vec<ParamValue> = serde_json::from_str(r#"[3, 0.5, "normal"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ParamValue::Int(3),
                ParamValue::Float(0.5),
                ParamValue::Str("normal".to_string())
            ]
        );
    }

    #[test]
    fn rejects_booleans_and_null() {
        assert!(serde_json::from_str::<ParamValue>("true").is_err());
        assert!(serde_json::from_str::<ParamValue>("null").is_err());
    }

    #[test]
    fn numeric_accessors() {
        assert_eq!(ParamValue::Int(2).as_f64(), Some(2.0));
        assert_eq!(ParamValue::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(ParamValue::from("x").as_f64(), None);
        assert_eq!(ParamValue::from("x").as_str(), Some("x"));
        assert!(ParamValue::Int(1).is_numeric());
        assert!(!ParamValue::from("1").is_numeric());
    }
}
