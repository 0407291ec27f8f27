use wire::{WireMap, WireValue};

use crate::operation::OperationDescriptor;

/// How the document is sent along a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistedQueryMode {
    /// Plain request with the full document.
    #[default]
    Disabled,
    /// Only the hash, the server answers `PersistedQueryNotFound` if it doesn't know it yet.
    HashOnly,
    /// Document and hash, to register the document on the server.
    HashAndDocument,
}

/// Body of a GraphQL request, handed over to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest<'a> {
    pub operation: &'a OperationDescriptor,
    pub variables: WireMap,
    pub mode: PersistedQueryMode,
}

impl OperationRequest<'_> {
    pub fn to_wire(&self) -> WireValue {
        let mut body = WireMap::with_capacity(4);
        body.insert("operationName".into(), WireValue::from(self.operation.name()));
        if self.mode != PersistedQueryMode::HashOnly {
            body.insert("query".into(), WireValue::from(self.operation.document_text()));
        }
        body.insert("variables".into(), WireValue::Map(self.variables.clone()));
        if self.mode != PersistedQueryMode::Disabled {
            body.insert("extensions".into(), self.operation.persisted_query_extension());
        }
        WireValue::Map(body)
    }
}
