//! Custom scalar codecs, looked up by GraphQL type name.
//!
//! A [`ScalarRegistry`] is assembled once through its builder and is immutable afterwards: there
//! is no way to add or remove a codec once decoding started. Share it behind an `Arc`.

mod aws;
mod value;

use std::{fmt, hash::Hash, sync::Arc};

use fnv::FnvHashMap;
use wire::WireValue;

pub use aws::{DateScalar, DateTimeScalar, JsonScalar, TimestampScalar};
pub use value::CustomScalarValue;

use crate::{
    error::{DecodeError, ScalarError},
    response::ResponsePath,
};

/// Conversion between the wire representation of a custom scalar and a Rust type.
pub trait ScalarCodec: Send + Sync + 'static {
    type Value: fmt::Debug + Clone + Eq + Hash + Send + Sync + 'static;

    fn decode(&self, value: &WireValue) -> Result<Self::Value, ScalarError>;

    fn encode(&self, value: &Self::Value) -> WireValue;
}

trait ErasedCodec: Send + Sync {
    fn decode(&self, type_name: &Arc<str>, value: &WireValue) -> Result<CustomScalarValue, ScalarError>;

    /// `None` if the value wasn't produced for this codec's Rust type.
    fn encode(&self, value: &CustomScalarValue) -> Option<WireValue>;
}

impl<C: ScalarCodec> ErasedCodec for C {
    fn decode(&self, type_name: &Arc<str>, value: &WireValue) -> Result<CustomScalarValue, ScalarError> {
        ScalarCodec::decode(self, value).map(|value| CustomScalarValue::new(type_name.clone(), value))
    }

    fn encode(&self, value: &CustomScalarValue) -> Option<WireValue> {
        value
            .downcast_ref::<C::Value>()
            .map(|value| ScalarCodec::encode(self, value))
    }
}

struct Entry {
    type_name: Arc<str>,
    codec: Box<dyn ErasedCodec>,
}

pub struct ScalarRegistry {
    codecs: FnvHashMap<Arc<str>, Entry>,
}

#[derive(Default)]
pub struct ScalarRegistryBuilder {
    codecs: FnvHashMap<Arc<str>, Entry>,
}

impl ScalarRegistryBuilder {
    /// Registers `codec` for `type_name`, replacing any codec previously registered for it.
    #[must_use]
    pub fn register<C: ScalarCodec>(mut self, type_name: impl Into<Arc<str>>, codec: C) -> Self {
        let type_name: Arc<str> = type_name.into();
        let entry = Entry {
            type_name: type_name.clone(),
            codec: Box::new(codec),
        };
        if self.codecs.insert(type_name.clone(), entry).is_some() {
            tracing::debug!("Replaced the codec of custom scalar {type_name}");
        }
        self
    }

    /// Registers the AWS AppSync scalars: `AWSDate`, `AWSDateTime`, `AWSTimestamp` and `AWSJSON`.
    #[must_use]
    pub fn with_aws_scalars(self) -> Self {
        self.register("AWSDate", DateScalar)
            .register("AWSDateTime", DateTimeScalar)
            .register("AWSTimestamp", TimestampScalar)
            .register("AWSJSON", JsonScalar)
    }

    pub fn build(self) -> ScalarRegistry {
        ScalarRegistry { codecs: self.codecs }
    }
}

impl ScalarRegistry {
    pub fn builder() -> ScalarRegistryBuilder {
        ScalarRegistryBuilder::default()
    }

    pub fn empty() -> Self {
        Self::builder().build()
    }

    pub fn with_aws_scalars() -> Self {
        Self::builder().with_aws_scalars().build()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.codecs.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.codecs.values().map(|entry| entry.type_name.as_ref())
    }

    pub fn decode(&self, type_name: &str, value: &WireValue) -> Result<CustomScalarValue, DecodeError> {
        self.decode_at(type_name, value, &ResponsePath::default())
    }

    /// Decodes and extracts the typed value, for callers that know the codec's Rust type.
    pub fn decode_typed<T: Clone + 'static>(&self, type_name: &str, value: &WireValue) -> Result<T, DecodeError> {
        let decoded = self.decode(type_name, value)?;
        decoded
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| DecodeError::ScalarDecodeFailed {
                type_name: type_name.into(),
                path: ResponsePath::default(),
                source: ScalarError::new(format!("codec doesn't produce {}", std::any::type_name::<T>())),
            })
    }

    pub(crate) fn decode_at(
        &self,
        type_name: &str,
        value: &WireValue,
        path: &ResponsePath,
    ) -> Result<CustomScalarValue, DecodeError> {
        let Some(entry) = self.codecs.get(type_name) else {
            return Err(DecodeError::UnknownScalar {
                type_name: type_name.into(),
                path: path.clone(),
            });
        };
        entry
            .codec
            .decode(&entry.type_name, value)
            .map_err(|source| DecodeError::ScalarDecodeFailed {
                type_name: type_name.into(),
                path: path.clone(),
                source,
            })
    }

    /// Encodes a custom scalar for the wire.
    ///
    /// # Panics
    ///
    /// If no codec is registered for the value's type name, or if the value's Rust type isn't the
    /// one the registered codec produces. Both mean the client was built against another registry.
    #[allow(clippy::panic)]
    pub fn encode(&self, value: &CustomScalarValue) -> WireValue {
        let Some(entry) = self.codecs.get(value.type_name()) else {
            tracing::error!("No codec registered for custom scalar {}", value.type_name());
            panic!("no codec registered for custom scalar '{}'", value.type_name());
        };
        match entry.codec.encode(value) {
            Some(wire) => wire,
            None => {
                tracing::error!("Value {value:?} doesn't match the codec of custom scalar {}", value.type_name());
                panic!("value {value:?} doesn't match the codec of custom scalar '{}'", value.type_name());
            }
        }
    }

    pub fn encode_typed<T>(&self, type_name: &str, value: T) -> WireValue
    where
        T: fmt::Debug + Eq + Hash + Send + Sync + 'static,
    {
        self.encode(&CustomScalarValue::new(type_name, value))
    }
}

impl fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.type_names().collect::<Vec<_>>();
        names.sort_unstable();
        f.debug_struct("ScalarRegistry").field("type_names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Cents;

    impl ScalarCodec for Cents {
        type Value = i64;

        fn decode(&self, value: &WireValue) -> Result<i64, ScalarError> {
            value.as_i64().ok_or_else(|| ScalarError::unexpected("an integer", value))
        }

        fn encode(&self, value: &i64) -> WireValue {
            WireValue::from(*value)
        }
    }

    struct Stringly;

    impl ScalarCodec for Stringly {
        type Value = String;

        fn decode(&self, value: &WireValue) -> Result<String, ScalarError> {
            Ok(value.to_string())
        }

        fn encode(&self, value: &String) -> WireValue {
            WireValue::from(value.as_str())
        }
    }

    #[test]
    fn decode_and_encode() {
        let registry = ScalarRegistry::builder().register("Cents", Cents).build();

        let value = registry.decode("Cents", &WireValue::from(250)).unwrap();
        assert_eq!(value.type_name(), "Cents");
        assert_eq!(value.downcast_ref::<i64>(), Some(&250));
        assert_eq!(registry.encode(&value), WireValue::from(250));
        assert_eq!(registry.decode_typed::<i64>("Cents", &WireValue::from(3)), Ok(3));
    }

    #[test]
    fn decode_errors() {
        let registry = ScalarRegistry::builder().register("Cents", Cents).build();

        let error = registry.decode("Money", &WireValue::from(250)).unwrap_err();
        insta::assert_snapshot!(error, @"no codec registered for custom scalar 'Money' at '(root)'");

        let error = registry.decode("Cents", &WireValue::from("250")).unwrap_err();
        insta::assert_snapshot!(error, @"could not decode custom scalar 'Cents' at '(root)': expected an integer, found a string");
    }

    #[test]
    fn last_registration_wins() {
        let registry = ScalarRegistry::builder()
            .register("Cents", Cents)
            .register("Cents", Stringly)
            .build();

        let value = registry.decode("Cents", &WireValue::from(250)).unwrap();
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("250"));
        assert_eq!(registry.type_names().collect::<Vec<_>>(), vec!["Cents"]);
    }

    #[test]
    fn aws_scalars() {
        let registry = ScalarRegistry::with_aws_scalars();

        insta::assert_debug_snapshot!(registry, @r###"
        ScalarRegistry {
            type_names: [
                "AWSDate",
                "AWSDateTime",
                "AWSJSON",
                "AWSTimestamp",
            ],
        }
        "###);
    }

    #[test]
    #[should_panic(expected = "no codec registered for custom scalar 'Cents'")]
    fn encode_unregistered() {
        ScalarRegistry::empty().encode_typed("Cents", 1_i64);
    }

    #[test]
    #[should_panic(expected = "doesn't match the codec of custom scalar 'Cents'")]
    fn encode_mismatching_type() {
        let registry = ScalarRegistry::builder().register("Cents", Cents).build();
        registry.encode_typed("Cents", "1".to_string());
    }
}
