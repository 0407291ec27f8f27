use std::sync::Arc;

use tracing::instrument;
use wire::{WireMap, WireValue};

use crate::{
    decode,
    descriptor::{Descriptors, FieldKind},
    error::{ConfigurationError, DecodeError},
    input::{encode_object, Variables},
    operation::OperationDescriptor,
    request::{OperationRequest, PersistedQueryMode},
    response::{Response, ResultObject},
    scalars::ScalarRegistry,
};

/// Everything needed to talk to a server about one operation: its identity, the descriptors of its
/// response and the custom scalars it uses. Cheap to clone and safe to share between threads.
#[derive(Debug, Clone)]
pub struct OperationCodec {
    operation: Arc<OperationDescriptor>,
    descriptors: Arc<Descriptors>,
    registry: Arc<ScalarRegistry>,
}

impl OperationCodec {
    /// Fails if the root selection set doesn't exist or if a custom scalar reachable from it has no
    /// codec in `registry`.
    pub fn new(
        operation: impl Into<Arc<OperationDescriptor>>,
        descriptors: Arc<Descriptors>,
        registry: Arc<ScalarRegistry>,
    ) -> Result<Self, ConfigurationError> {
        let operation = operation.into();
        let root = operation.root();
        if !descriptors.contains_selection_set(root) {
            return Err(ConfigurationError::Dangling {
                referrer: format!("operation {}", operation.name()),
                target: root.to_string(),
            });
        }

        for field in descriptors.reachable_fields(root) {
            let mut kind = &field.kind;
            while let FieldKind::List(item) = kind {
                kind = &item.kind;
            }
            if let FieldKind::CustomScalar(type_name) = kind {
                if !registry.contains(type_name) {
                    tracing::error!("Operation {} uses the unregistered scalar {type_name}", operation.name());
                    return Err(ConfigurationError::UnregisteredScalar {
                        type_name: type_name.to_string(),
                        response_key: field.response_key.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            operation,
            descriptors,
            registry,
        })
    }

    pub fn operation(&self) -> &OperationDescriptor {
        &self.operation
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descriptors
    }

    pub fn registry(&self) -> &ScalarRegistry {
        &self.registry
    }

    /// Decodes the `data` of a response.
    #[instrument(skip_all, fields(operation.name = %self.operation.name()))]
    pub fn decode(&self, data: &WireValue) -> Result<ResultObject, DecodeError> {
        decode::decode(&self.descriptors, &self.registry, self.operation.root(), data)
    }

    /// Decodes the `data` of a response, evaluating `@skip` / `@include` against the encoded
    /// variables the request was sent with.
    #[instrument(skip_all, fields(operation.name = %self.operation.name()))]
    pub fn decode_with_variables(&self, data: &WireValue, variables: &WireMap) -> Result<ResultObject, DecodeError> {
        decode::decode_with_variables(&self.descriptors, &self.registry, self.operation.root(), data, variables)
    }

    #[instrument(skip_all, fields(operation.name = %self.operation.name()))]
    pub fn decode_response(&self, response: &WireValue, variables: &WireMap) -> Result<Response, DecodeError> {
        decode::decode_response(
            &self.descriptors,
            &self.registry,
            self.operation.root(),
            response,
            variables,
        )
    }

    pub fn encode_variables(&self, variables: &impl Variables) -> WireMap {
        encode_object(&variables.to_input(), &self.registry)
    }

    pub fn request(&self, variables: &impl Variables, mode: PersistedQueryMode) -> WireValue {
        OperationRequest {
            operation: &self.operation,
            variables: self.encode_variables(variables),
            mode,
        }
        .to_wire()
    }

    /// Wire shape of a result, see [`ResultObject::to_wire`].
    pub fn to_wire(&self, result: &ResultObject) -> WireValue {
        result.to_wire(&self.registry)
    }
}
