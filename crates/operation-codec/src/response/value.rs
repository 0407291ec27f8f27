use std::hash::{Hash, Hasher};

use super::ResultObject;
use crate::scalars::CustomScalarValue;

/// A decoded response value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultValue {
    Null,
    Scalar(ScalarValue),
    Custom(CustomScalarValue),
    Object(ResultObject),
    List(Vec<ResultValue>),
}

impl ResultValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResultValue::Null)
    }

    /// Strings, IDs and enum values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResultValue::Scalar(ScalarValue::String(s) | ScalarValue::Id(s) | ScalarValue::Enum(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ResultValue::Scalar(ScalarValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultValue::Scalar(ScalarValue::Float(f)) => Some(*f),
            ResultValue::Scalar(ScalarValue::Int(i)) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResultValue::Scalar(ScalarValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ResultObject> {
        match self {
            ResultValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResultValue]> {
        match self {
            ResultValue::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_custom<T: 'static>(&self) -> Option<&T> {
        match self {
            ResultValue::Custom(value) => value.downcast_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ScalarValue {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Id(String),
    Enum(String),
}

impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => a == b,
            (ScalarValue::Int(a), ScalarValue::Int(b)) => a == b,
            (ScalarValue::Float(a), ScalarValue::Float(b)) => a == b,
            (ScalarValue::String(a), ScalarValue::String(b))
            | (ScalarValue::Id(a), ScalarValue::Id(b))
            | (ScalarValue::Enum(a), ScalarValue::Enum(b)) => a == b,
            _ => false,
        }
    }
}

// Floats come from wire numbers, which are always finite.
impl Eq for ScalarValue {}

impl Hash for ScalarValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ScalarValue::Boolean(b) => b.hash(state),
            ScalarValue::Int(i) => i.hash(state),
            // -0.0 == 0.0
            ScalarValue::Float(f) => (if *f == 0.0 { 0.0_f64 } else { *f }).to_bits().hash(state),
            ScalarValue::String(s) | ScalarValue::Id(s) | ScalarValue::Enum(s) => s.hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, RandomState};

    use super::*;

    #[test]
    fn strings_ids_and_enums_are_distinct() {
        let string = ScalarValue::String("1".into());
        let id = ScalarValue::Id("1".into());

        assert_ne!(string, id);
        assert_eq!(ResultValue::Scalar(string).as_str(), ResultValue::Scalar(id).as_str());
    }

    #[test]
    fn signed_zeros_hash_the_same() {
        let state = RandomState::new();
        let positive = ScalarValue::Float(0.0);
        let negative = ScalarValue::Float(-0.0);

        assert_eq!(positive, negative);
        assert_eq!(state.hash_one(&positive), state.hash_one(&negative));
    }
}
