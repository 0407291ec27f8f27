use wire::{WireMap, WireValue};

use super::{InputField, InputObject, InputValue, Presence};
use crate::scalars::ScalarRegistry;

/// Encodes an input value for the wire, custom scalars through `registry`.
pub fn encode(value: &InputValue, registry: &ScalarRegistry) -> WireValue {
    match value {
        InputValue::Null => WireValue::Null,
        InputValue::Boolean(b) => WireValue::Bool(*b),
        InputValue::Int(i) => WireValue::from(*i),
        InputValue::Float(f) => WireValue::from(*f),
        InputValue::String(s) | InputValue::Id(s) | InputValue::Enum(s) => WireValue::from(s.as_str()),
        InputValue::Custom(custom) => registry.encode(custom),
        InputValue::List(items) => WireValue::List(items.iter().map(|item| encode(item, registry)).collect()),
        InputValue::Object(object) => WireValue::Map(encode_object(object, registry)),
    }
}

/// Absent optional fields are left out, null ones are kept with a `null` value.
pub fn encode_object(object: &InputObject, registry: &ScalarRegistry) -> WireMap {
    let mut map = WireMap::with_capacity(object.fields.len());
    for (name, field) in &object.fields {
        let value = match field {
            InputField::Required(value) | InputField::Optional(Presence::Value(value)) => encode(value, registry),
            InputField::Optional(Presence::Null) => WireValue::Null,
            InputField::Optional(Presence::Absent) => continue,
        };
        map.insert(name.clone(), value);
    }
    map
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::scalars::CustomScalarValue;

    #[test]
    fn presence_decides_whether_keys_are_sent() {
        let review = InputObject::new()
            .field("stars", 5)
            .optional("commentary", Presence::<String>::Absent)
            .optional("favoriteColor", Presence::<InputObject>::Null)
            .optional("title", Presence::Value("Great"));

        let wire = encode_object(&review, &ScalarRegistry::empty());

        insta::assert_json_snapshot!(wire, @r###"
        {
          "stars": 5,
          "favoriteColor": null,
          "title": "Great"
        }
        "###);
    }

    #[test]
    fn nested_values() {
        let registry = ScalarRegistry::with_aws_scalars();
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let input = InputObject::new()
            .field("episode", InputValue::enum_value("JEDI"))
            .field("ids", vec![InputValue::id("1"), InputValue::id("2")])
            .field("ratios", vec![Some(0.5), None])
            .field("since", CustomScalarValue::new("AWSDate", date))
            .field("filter", InputObject::new().field("active", true).optional("name", Presence::<&str>::Absent));

        insta::assert_json_snapshot!(encode(&InputValue::Object(input), &registry), @r###"
        {
          "episode": "JEDI",
          "ids": [
            "1",
            "2"
          ],
          "ratios": [
            0.5,
            null
          ],
          "since": "2024-01-31",
          "filter": {
            "active": true
          }
        }
        "###);
    }
}
