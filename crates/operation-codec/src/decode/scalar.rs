use wire::WireValue;

use crate::{descriptor::ScalarType, response::ScalarValue};

/// Reads a built-in scalar, `None` if the wire value has the wrong shape.
pub(super) fn decode_scalar(ty: ScalarType, value: &WireValue) -> Option<ScalarValue> {
    match (ty, value) {
        (ScalarType::String, WireValue::String(s)) => Some(ScalarValue::String(s.clone())),
        (ScalarType::Enum, WireValue::String(s)) => Some(ScalarValue::Enum(s.clone())),
        (ScalarType::Boolean, WireValue::Bool(b)) => Some(ScalarValue::Boolean(*b)),
        (ScalarType::Int, WireValue::Number(n)) => n.as_i64().map(ScalarValue::Int),
        (ScalarType::Float, WireValue::Number(n)) => n.as_f64().map(ScalarValue::Float),
        (ScalarType::Id, WireValue::String(s)) => Some(ScalarValue::Id(s.clone())),
        // IDs serialize as strings but servers may send integers.
        (ScalarType::Id, WireValue::Number(n)) if n.is_i64() || n.is_u64() => Some(ScalarValue::Id(n.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::string(ScalarType::String, serde_json::json!("a"), Some(ScalarValue::String("a".into())))]
    #[case::string_from_number(ScalarType::String, serde_json::json!(1), None)]
    #[case::int(ScalarType::Int, serde_json::json!(-3), Some(ScalarValue::Int(-3)))]
    #[case::int_from_float(ScalarType::Int, serde_json::json!(1.5), None)]
    #[case::int_overflow(ScalarType::Int, serde_json::json!(u64::MAX), None)]
    #[case::float(ScalarType::Float, serde_json::json!(1.5), Some(ScalarValue::Float(1.5)))]
    #[case::float_from_int(ScalarType::Float, serde_json::json!(2), Some(ScalarValue::Float(2.0)))]
    #[case::boolean(ScalarType::Boolean, serde_json::json!(true), Some(ScalarValue::Boolean(true)))]
    #[case::boolean_from_string(ScalarType::Boolean, serde_json::json!("true"), None)]
    #[case::id(ScalarType::Id, serde_json::json!("1000"), Some(ScalarValue::Id("1000".into())))]
    #[case::id_from_int(ScalarType::Id, serde_json::json!(1000), Some(ScalarValue::Id("1000".into())))]
    #[case::id_from_float(ScalarType::Id, serde_json::json!(1.5), None)]
    #[case::enum_value(ScalarType::Enum, serde_json::json!("JEDI"), Some(ScalarValue::Enum("JEDI".into())))]
    fn built_in_scalars(
        #[case] ty: ScalarType,
        #[case] value: serde_json::Value,
        #[case] expected: Option<ScalarValue>,
    ) {
        pretty_assertions::assert_eq!(decode_scalar(ty, &WireValue::from(value)), expected);
    }
}
