//! Operation variables and their encoding to wire values.

mod encode;
mod presence;

pub use encode::{encode, encode_object};
pub use presence::Presence;

use crate::scalars::CustomScalarValue;

#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Id(String),
    Enum(String),
    Custom(CustomScalarValue),
    List(Vec<InputValue>),
    Object(InputObject),
}

impl InputValue {
    pub fn id(id: impl Into<String>) -> Self {
        InputValue::Id(id.into())
    }

    pub fn enum_value(value: impl Into<String>) -> Self {
        InputValue::Enum(value.into())
    }
}

/// An input object with its fields in declaration order. Required fields always hold a value
/// (possibly `null` for nullable list items), optional ones may be absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputObject {
    fields: Vec<(String, InputField)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputField {
    Required(InputValue),
    Optional(Presence<InputValue>),
}

impl InputObject {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl ToInputValue) -> Self {
        self.fields
            .push((name.into(), InputField::Required(value.to_input_value())));
        self
    }

    #[must_use]
    pub fn optional<T: ToInputValue>(mut self, name: impl Into<String>, value: Presence<T>) -> Self {
        self.fields.push((
            name.into(),
            InputField::Optional(value.map(|value| value.to_input_value())),
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&InputField> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &InputField)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Conversion of Rust values into input values. `Presence` purposely doesn't implement it: absence
/// only exists for object fields, never for list items.
pub trait ToInputValue {
    fn to_input_value(&self) -> InputValue;
}

impl<T: ToInputValue + ?Sized> ToInputValue for &T {
    fn to_input_value(&self) -> InputValue {
        (**self).to_input_value()
    }
}

impl ToInputValue for InputValue {
    fn to_input_value(&self) -> InputValue {
        self.clone()
    }
}

impl ToInputValue for InputObject {
    fn to_input_value(&self) -> InputValue {
        InputValue::Object(self.clone())
    }
}

impl ToInputValue for CustomScalarValue {
    fn to_input_value(&self) -> InputValue {
        InputValue::Custom(self.clone())
    }
}

impl ToInputValue for bool {
    fn to_input_value(&self) -> InputValue {
        InputValue::Boolean(*self)
    }
}

impl ToInputValue for i32 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Int(i64::from(*self))
    }
}

impl ToInputValue for i64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Int(*self)
    }
}

impl ToInputValue for f64 {
    fn to_input_value(&self) -> InputValue {
        InputValue::Float(*self)
    }
}

impl ToInputValue for str {
    fn to_input_value(&self) -> InputValue {
        InputValue::String(self.to_string())
    }
}

impl ToInputValue for String {
    fn to_input_value(&self) -> InputValue {
        InputValue::String(self.clone())
    }
}

/// Nullability of the value itself, `None` is sent as `null`.
impl<T: ToInputValue> ToInputValue for Option<T> {
    fn to_input_value(&self) -> InputValue {
        match self {
            Some(value) => value.to_input_value(),
            None => InputValue::Null,
        }
    }
}

impl<T: ToInputValue> ToInputValue for [T] {
    fn to_input_value(&self) -> InputValue {
        InputValue::List(self.iter().map(ToInputValue::to_input_value).collect())
    }
}

impl<T: ToInputValue> ToInputValue for Vec<T> {
    fn to_input_value(&self) -> InputValue {
        self.as_slice().to_input_value()
    }
}

/// Typed variables of an operation.
pub trait Variables {
    fn to_input(&self) -> InputObject;
}

/// Operations without variables.
impl Variables for () {
    fn to_input(&self) -> InputObject {
        InputObject::new()
    }
}

impl Variables for InputObject {
    fn to_input(&self) -> InputObject {
        self.clone()
    }
}
