use crate::{WireMap, WireValue};

impl From<serde_json::Value> for WireValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => WireValue::Number(n),
            serde_json::Value::String(s) => WireValue::String(s),
            serde_json::Value::Array(list) => WireValue::List(list.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(map) => {
                WireValue::Map(map.into_iter().map(|(key, value)| (key, value.into())).collect())
            }
        }
    }
}

impl From<WireValue> for serde_json::Value {
    fn from(value: WireValue) -> Self {
        match value {
            WireValue::Null => serde_json::Value::Null,
            WireValue::Bool(b) => serde_json::Value::Bool(b),
            WireValue::Number(n) => serde_json::Value::Number(n),
            WireValue::String(s) => serde_json::Value::String(s),
            WireValue::List(list) => serde_json::Value::Array(list.into_iter().map(Into::into).collect()),
            WireValue::Map(map) => {
                serde_json::Value::Object(map.into_iter().map(|(key, value)| (key, value.into())).collect())
            }
        }
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        WireValue::Number(value.into())
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Number(value.into())
    }
}

impl From<u64> for WireValue {
    fn from(value: u64) -> Self {
        WireValue::Number(value.into())
    }
}

/// NaN and infinities have no JSON representation and become `null`.
impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        WireValue::from_f64(value).unwrap_or(WireValue::Null)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::String(value.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::String(value)
    }
}

impl From<WireMap> for WireValue {
    fn from(value: WireMap) -> Self {
        WireValue::Map(value)
    }
}

impl<T: Into<WireValue>> From<Vec<T>> for WireValue {
    fn from(value: Vec<T>) -> Self {
        WireValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(WireValue::Null)
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for WireValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        WireValue::Map(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}
