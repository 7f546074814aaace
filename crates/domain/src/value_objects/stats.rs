//! CharacterStats - the free-form stats mapping stored on a character sheet
//!
//! Keys are arbitrary stat names; values are whatever JSON the sheet holds.
//! Rule lookups read values best-effort through [`coerce_integer`], and the
//! recompute pass writes integers back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Stats mapping of a character (stat name -> JSON value).
///
/// Keys are not required to pre-exist; reading a missing key is not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterStats(BTreeMap<String, Value>);

impl CharacterStats {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Build a mapping from a JSON document.
    ///
    /// Anything that is not a JSON object yields an empty mapping, matching
    /// how an absent or corrupt stats column is treated.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            _ => Self::new(),
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Integer value of a stat; missing or non-numeric values read as `0`.
    pub fn integer(&self, name: &str) -> i64 {
        self.0.get(name).and_then(coerce_integer).unwrap_or(0)
    }

    /// Set a stat to an integer value, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: i64) {
        self.0.insert(name.into(), Value::from(value));
    }

    /// Overlay every entry of `other` onto this mapping.
    pub fn merge(&mut self, other: &CharacterStats) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, i64)> for CharacterStats {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
    }
}

/// Coerce a JSON value to an integer the way sheet data is read.
///
/// - integers are returned as-is
/// - finite floats are truncated toward zero
/// - booleans read as `0`/`1`
/// - strings holding a base-10 integer (surrounding whitespace allowed)
///
/// Everything else (null, arrays, objects, non-integer strings, floats out of
/// range) is not integer-coercible and returns `None`.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).ok()
            } else {
                let f = n.as_f64()?;
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
        }
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
