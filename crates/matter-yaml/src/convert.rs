//! Conversion between `yaml-rust2` values and `serde_json` values.
//!
//! The JSON side is the plain view handed to callers; the YAML side is what
//! the emitter writes.

use crate::EncodeError;
use serde_json::{Map, Number, Value};
use yaml_rust2::Yaml;

/// Decode a YAML value into its plain JSON view.
///
/// Non-string mapping keys are stringified. Aliases and bad values decode to
/// `null`; reals that JSON cannot carry (`.inf`, `.nan`) keep their text.
pub fn yaml_to_json(yaml: &Yaml) -> Value {
    match yaml {
        Yaml::Real(text) => yaml
            .as_f64()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::String(text.clone()), Value::Number),
        Yaml::Integer(i) => Value::from(*i),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Boolean(b) => Value::Bool(*b),
        Yaml::Array(items) => Value::Array(items.iter().map(yaml_to_json).collect()),
        Yaml::Hash(hash) => {
            let mut map = Map::with_capacity(hash.len());
            for (key, value) in hash {
                map.insert(key_string(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Alias(_) | Yaml::Null | Yaml::BadValue => Value::Null,
    }
}

/// Text used for a mapping key in the plain view.
pub(crate) fn key_string(key: &Yaml) -> String {
    match key {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        other => format!("{other:?}"),
    }
}

/// Convert a JSON scalar into a YAML scalar.
///
/// Arrays and objects are handled by `Node::from_json`, which owns the
/// recursion limit; passing one here yields `Yaml::BadValue`.
pub(crate) fn json_scalar_to_yaml(value: &Value) -> Result<Yaml, EncodeError> {
    let yaml = match value {
        Value::Null => Yaml::Null,
        Value::Bool(b) => Yaml::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Yaml::Integer(i)
            } else if let Some(value) = n.as_u64() {
                // Written as a real, it would read back as a lossy float.
                return Err(EncodeError::IntegerOutOfRange { value });
            } else {
                Yaml::Real(format!("{:?}", n.as_f64().unwrap_or_default()))
            }
        }
        Value::String(s) => Yaml::String(s.clone()),
        Value::Array(_) | Value::Object(_) => Yaml::BadValue,
    };
    Ok(yaml)
}
