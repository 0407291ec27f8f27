use std::{
    any::Any,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Object-safe view of a typed scalar value, so that values of different Rust types can share the
/// result tree while keeping structural equality and hashing.
pub(super) trait DynScalar: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn DynScalar) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T> DynScalar for T
where
    T: fmt::Debug + Eq + Hash + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn DynScalar) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| other == self)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        self.hash(&mut state);
    }
}

/// A decoded custom scalar, tagged with its GraphQL type name.
#[derive(Clone)]
pub struct CustomScalarValue {
    type_name: Arc<str>,
    value: Arc<dyn DynScalar>,
}

impl CustomScalarValue {
    pub fn new<T>(type_name: impl Into<Arc<str>>, value: T) -> Self
    where
        T: fmt::Debug + Eq + Hash + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            value: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_ref().as_any().downcast_ref()
    }
}

impl PartialEq for CustomScalarValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name && self.value.as_ref().dyn_eq(other.value.as_ref())
    }
}

impl Eq for CustomScalarValue {}

impl Hash for CustomScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_name.hash(state);
        self.value.as_ref().dyn_hash(state);
    }
}

impl fmt::Debug for CustomScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&self.type_name).field(&self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, RandomState};

    use super::*;

    #[test]
    fn equality_needs_same_type_name_and_value() {
        let a = CustomScalarValue::new("Cents", 100_i64);
        let b = CustomScalarValue::new("Cents", 100_i64);
        let other_name = CustomScalarValue::new("Points", 100_i64);
        let other_type = CustomScalarValue::new("Cents", 100_i32);

        assert_eq!(a, b);
        assert_ne!(a, other_name);
        assert_ne!(a, other_type);

        let state = RandomState::new();
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
    }

    #[test]
    fn downcast() {
        let value = CustomScalarValue::new("Cents", 100_i64);

        assert_eq!(value.downcast_ref::<i64>(), Some(&100));
        assert_eq!(value.downcast_ref::<String>(), None);
        insta::assert_snapshot!(format!("{value:?}"), @"Cents(100)");
    }
}
