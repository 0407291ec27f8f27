//! # GraphQL wire values
//!
//! The tree handed over by a transport once it parsed a response payload, and the tree a
//! transport serializes when sending variables. It is deliberately minimal: null, booleans,
//! numbers, strings, lists and insertion-ordered maps.

mod de;
mod from;
mod hash;

use std::fmt;

pub use serde_json::Number;

/// Insertion-ordered field map of a [`WireValue::Map`].
pub type WireMap = indexmap::IndexMap<String, WireValue>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<WireValue>),
    Map(WireMap),
}

// `serde_json::Number` can neither hold NaN nor infinities, so equality is reflexive.
impl Eq for WireValue {}

/// Shape of a wire value, used when reporting what was found instead of what was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Null,
    Boolean,
    Number,
    String,
    List,
    Map,
}

impl WireKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireKind::Null => "null",
            WireKind::Boolean => "a boolean",
            WireKind::Number => "a number",
            WireKind::String => "a string",
            WireKind::List => "a list",
            WireKind::Map => "an object",
        }
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WireValue {
    pub fn kind(&self) -> WireKind {
        match self {
            WireValue::Null => WireKind::Null,
            WireValue::Bool(_) => WireKind::Boolean,
            WireValue::Number(_) => WireKind::Number,
            WireValue::String(_) => WireKind::String,
            WireValue::List(_) => WireKind::List,
            WireValue::Map(_) => WireKind::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, WireValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integral numbers only, a float like `1.5` yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&WireMap> {
        match self {
            WireValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key if this value is a map.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Builds a number from a float, `None` for NaN and infinities which JSON can't carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(WireValue::Number)
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl serde::Serialize for WireValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            WireValue::Null => serializer.serialize_unit(),
            WireValue::Bool(b) => serializer.serialize_bool(*b),
            WireValue::Number(n) => serde::Serialize::serialize(n, serializer),
            WireValue::String(s) => serializer.serialize_str(s),
            WireValue::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            WireValue::Map(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_keeps_key_order() {
        let json = r#"{"z":1,"a":[true,null,"x",1.5],"m":{"b":2,"a":3}}"#;
        let value: WireValue = serde_json::from_str(json).unwrap();

        let keys = value.as_map().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(value.to_string(), json);
    }

    #[test]
    fn accessors() {
        let value = WireValue::from(serde_json::json!({
            "int": 3,
            "float": 2.5,
            "text": "hi",
            "flag": false,
        }));

        assert_eq!(value.get("int").and_then(WireValue::as_i64), Some(3));
        assert_eq!(value.get("float").and_then(WireValue::as_i64), None);
        assert_eq!(value.get("float").and_then(WireValue::as_f64), Some(2.5));
        assert_eq!(value.get("text").and_then(WireValue::as_str), Some("hi"));
        assert_eq!(value.get("flag").and_then(WireValue::as_bool), Some(false));
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.get("text").map(WireValue::kind), Some(WireKind::String));
        assert!(WireValue::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn display_uses_compact_json() {
        let value = WireValue::from(serde_json::json!({"hero": {"name": "R2-D2", "friends": []}}));
        insta::assert_snapshot!(value.to_string(), @r###"{"hero":{"name":"R2-D2","friends":[]}}"###);
    }
}
