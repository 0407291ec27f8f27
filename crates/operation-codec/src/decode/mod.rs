//! Descriptor driven decoding of response trees.
//!
//! Fields are read in declaration order from the wire map of their object. Fragments read the
//! discriminant of that same map and, if the object's type is one they apply to, decode their own
//! selection set against it. Decoding stops at the first error, no partial result is returned.

mod field;
mod scalar;
mod selection_set;

use wire::{WireMap, WireValue};

use self::selection_set::SelectionSetDecoder;
use crate::{
    descriptor::{Descriptors, SelectionSetId},
    error::{DecodeError, ExpectedKind},
    response::{GraphqlError, Response, ResponsePath, ResultObject},
    scalars::ScalarRegistry,
};

pub(crate) struct DecodeContext<'ctx> {
    pub descriptors: &'ctx Descriptors,
    pub registry: &'ctx ScalarRegistry,
    /// Operation variables, only used to evaluate `@skip` / `@include`.
    pub variables: &'ctx WireMap,
}

pub fn decode(
    descriptors: &Descriptors,
    registry: &ScalarRegistry,
    selection_set: SelectionSetId,
    input: &WireValue,
) -> Result<ResultObject, DecodeError> {
    decode_with_variables(descriptors, registry, selection_set, input, &WireMap::new())
}

pub fn decode_with_variables(
    descriptors: &Descriptors,
    registry: &ScalarRegistry,
    selection_set: SelectionSetId,
    input: &WireValue,
    variables: &WireMap,
) -> Result<ResultObject, DecodeError> {
    tracing::trace!("Decoding {selection_set}");
    let ctx = DecodeContext {
        descriptors,
        registry,
        variables,
    };
    SelectionSetDecoder {
        ctx: &ctx,
        path: &ResponsePath::default(),
        id: selection_set,
    }
    .decode(input)
}

/// Decodes a whole `{ "data": ..., "errors": [...], "extensions": {...} }` response.
pub fn decode_response(
    descriptors: &Descriptors,
    registry: &ScalarRegistry,
    selection_set: SelectionSetId,
    input: &WireValue,
    variables: &WireMap,
) -> Result<Response, DecodeError> {
    let root = ResponsePath::default();
    let Some(envelope) = input.as_map() else {
        return Err(DecodeError::mismatch(&root, ExpectedKind::Object, input));
    };

    let errors = match envelope.get("errors") {
        None | Some(WireValue::Null) => Vec::new(),
        Some(errors) => serde_json::from_value::<Vec<GraphqlError>>(serde_json::Value::from(errors.clone()))
            .map_err(|_| DecodeError::mismatch(&root.child("errors"), ExpectedKind::GraphqlErrors, errors))?,
    };

    let extensions = match envelope.get("extensions") {
        None | Some(WireValue::Null) => WireMap::new(),
        Some(WireValue::Map(extensions)) => extensions.clone(),
        Some(other) => return Err(DecodeError::mismatch(&root.child("extensions"), ExpectedKind::Object, other)),
    };

    let data = match envelope.get("data") {
        None | Some(WireValue::Null) => None,
        Some(data) => Some(decode_with_variables(descriptors, registry, selection_set, data, variables)?),
    };

    if !errors.is_empty() {
        tracing::debug!("Response carries {} GraphQL errors", errors.len());
    }

    Ok(Response {
        data,
        errors,
        extensions,
    })
}
