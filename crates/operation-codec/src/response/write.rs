use wire::{WireMap, WireValue};

use super::{ResultObject, ResultValue, ScalarValue};
use crate::scalars::ScalarRegistry;

impl ResultObject {
    /// Writes the object back in its wire shape: fields in declaration order, matched fragments
    /// merged into the same map and the type name under its discriminant key. Decoding the output
    /// with the same descriptors yields an equal object.
    pub fn to_wire(&self, registry: &ScalarRegistry) -> WireValue {
        let mut map = WireMap::with_capacity(self.len() + 1);
        write_object(self, registry, &mut map);
        WireValue::Map(map)
    }
}

fn write_object(object: &ResultObject, registry: &ScalarRegistry, map: &mut WireMap) {
    for (key, value) in object.fields() {
        merge(map, key, write_value(value, registry));
    }
    for slot in object.fragments() {
        if let Some(data) = slot.data() {
            write_object(data, registry, map);
        }
    }
    if let Some(discriminant) = object.discriminant() {
        if !map.contains_key(discriminant.key.as_ref()) {
            map.insert(discriminant.key.to_string(), WireValue::from(discriminant.value.as_ref()));
        }
    }
}

fn write_value(value: &ResultValue, registry: &ScalarRegistry) -> WireValue {
    match value {
        ResultValue::Null => WireValue::Null,
        ResultValue::Scalar(scalar) => match scalar {
            ScalarValue::Boolean(b) => WireValue::Bool(*b),
            ScalarValue::Int(i) => WireValue::from(*i),
            ScalarValue::Float(f) => WireValue::from(*f),
            ScalarValue::String(s) | ScalarValue::Id(s) | ScalarValue::Enum(s) => WireValue::from(s.as_str()),
        },
        ResultValue::Custom(custom) => registry.encode(custom),
        ResultValue::Object(object) => object.to_wire(registry),
        ResultValue::List(items) => WireValue::List(items.iter().map(|item| write_value(item, registry)).collect()),
    }
}

/// A field selected both directly and through a fragment appears once on the wire, with the union
/// of both sub-selections.
fn merge(map: &mut WireMap, key: &str, value: WireValue) {
    match map.get_mut(key) {
        Some(existing) => merge_value(existing, value),
        None => {
            map.insert(key.to_string(), value);
        }
    }
}

fn merge_value(existing: &mut WireValue, value: WireValue) {
    match (existing, value) {
        (WireValue::Map(existing), WireValue::Map(value)) => {
            for (key, value) in value {
                merge(existing, &key, value);
            }
        }
        (WireValue::List(existing), WireValue::List(value)) if existing.len() == value.len() => {
            for (existing, value) in existing.iter_mut().zip(value) {
                merge_value(existing, value);
            }
        }
        // Both sides were decoded from the same response value, so leaf values agree.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_maps_and_lists_are_merged() {
        let mut map = WireMap::new();
        merge(
            &mut map,
            "friends",
            WireValue::from(serde_json::json!([{"id": "1"}, {"id": "2"}])),
        );
        merge(
            &mut map,
            "friends",
            WireValue::from(serde_json::json!([{"name": "Luke"}, {"name": "Leia"}])),
        );

        insta::assert_json_snapshot!(map, @r###"
        {
          "friends": [
            {
              "id": "1",
              "name": "Luke"
            },
            {
              "id": "2",
              "name": "Leia"
            }
          ]
        }
        "###);
    }
}
