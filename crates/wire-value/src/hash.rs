use std::hash::{DefaultHasher, Hash, Hasher};

use crate::WireValue;

impl Hash for WireValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            WireValue::Null => {}
            WireValue::Bool(b) => b.hash(state),
            WireValue::Number(n) => {
                // Same split as `Number`'s own equality: integers compare as integers, the rest
                // by their float bits.
                if let Some(n) = n.as_i64() {
                    0u8.hash(state);
                    n.hash(state);
                } else if let Some(n) = n.as_u64() {
                    1u8.hash(state);
                    n.hash(state);
                } else {
                    2u8.hash(state);
                    n.as_f64().unwrap_or_default().to_bits().hash(state);
                }
            }
            WireValue::String(s) => s.hash(state),
            WireValue::List(list) => list.hash(state),
            WireValue::Map(map) => {
                // Map equality ignores key order, so entries are combined commutatively.
                map.len().hash(state);
                let entries = map.iter().fold(0u64, |acc, entry| {
                    let mut hasher = DefaultHasher::new();
                    entry.hash(&mut hasher);
                    acc.wrapping_add(hasher.finish())
                });
                entries.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::WireValue;

    #[test]
    fn equal_values_share_a_set_slot() {
        let a = WireValue::from(serde_json::json!({"id": 1, "tags": ["x"]}));
        let b = WireValue::from(serde_json::json!({"id": 1, "tags": ["x"]}));
        let c = WireValue::from(serde_json::json!({"id": 2, "tags": ["x"]}));

        let set = [a, b, c].into_iter().collect::<HashSet<_>>();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn map_key_order_does_not_matter() {
        use std::hash::{BuildHasher, RandomState};

        let a = WireValue::from(serde_json::json!({"a": 1, "b": 2}));
        let b = WireValue::from(serde_json::json!({"b": 2, "a": 1}));
        let state = RandomState::new();

        assert_eq!(a, b);
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
    }
}
