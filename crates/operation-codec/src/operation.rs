use operation_normalizer::OperationType;
use sha2::{Digest, Sha256};
use wire::{WireMap, WireValue};

use crate::{
    config::{CodecConfig, DocumentHashAlgorithm},
    descriptor::SelectionSetId,
    error::ConfigurationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl From<OperationType> for OperationKind {
    fn from(ty: OperationType) -> Self {
        match ty {
            OperationType::Query => OperationKind::Query,
            OperationType::Mutation => OperationKind::Mutation,
            OperationType::Subscription => OperationKind::Subscription,
        }
    }
}

/// Identity of an operation: its normalized document and the hash of that document, plus the
/// selection set its `data` decodes with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: String,
    kind: OperationKind,
    document: String,
    content_hash: String,
    hash_algorithm: DocumentHashAlgorithm,
    sha256: String,
    root: SelectionSetId,
}

impl OperationDescriptor {
    /// Normalizes `source_text`, keeping `operation_name` and the fragments it uses, and hashes the
    /// result with SHA-256.
    pub fn new(
        source_text: &str,
        operation_name: Option<&str>,
        root: SelectionSetId,
    ) -> Result<Self, ConfigurationError> {
        Self::with_config(source_text, operation_name, root, &CodecConfig::default())
    }

    pub fn with_config(
        source_text: &str,
        operation_name: Option<&str>,
        root: SelectionSetId,
        config: &CodecConfig,
    ) -> Result<Self, ConfigurationError> {
        let normalized = operation_normalizer::normalize(source_text, operation_name)
            .map_err(|err| ConfigurationError::InvalidDocument(err.to_string()))?;
        let name = normalized.name.ok_or(ConfigurationError::AnonymousOperation)?;

        let sha256 = hash_document(&normalized.document, DocumentHashAlgorithm::Sha256);
        let content_hash = match config.document_hash {
            DocumentHashAlgorithm::Sha256 => sha256.clone(),
            algorithm => hash_document(&normalized.document, algorithm),
        };

        tracing::debug!("Operation {name} has hash {content_hash} ({})", config.document_hash);

        Ok(Self {
            name,
            kind: normalized.ty.into(),
            document: normalized.document,
            content_hash,
            hash_algorithm: config.document_hash,
            sha256,
            root,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Normalized document text, the one sent to the server.
    pub fn document_text(&self) -> &str {
        &self.document
    }

    /// Lowercase hex digest of the normalized document.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn hash_algorithm(&self) -> DocumentHashAlgorithm {
        self.hash_algorithm
    }

    /// Selection set of the operation's `data`.
    pub fn root(&self) -> SelectionSetId {
        self.root
    }

    /// `{"persistedQuery": {"version": 1, "sha256Hash": "..."}}`, the request extension of automatic
    /// persisted queries. Always SHA-256, whatever the content hash algorithm is.
    pub fn persisted_query_extension(&self) -> WireValue {
        let persisted_query = [
            ("version", WireValue::from(1)),
            ("sha256Hash", WireValue::from(self.sha256.as_str())),
        ]
        .into_iter()
        .collect::<WireValue>();

        WireValue::Map(WireMap::from_iter([("persistedQuery".to_string(), persisted_query)]))
    }
}

fn hash_document(document: &str, algorithm: DocumentHashAlgorithm) -> String {
    match algorithm {
        DocumentHashAlgorithm::Sha256 => hex::encode(Sha256::digest(document.as_bytes())),
        DocumentHashAlgorithm::Blake3 => blake3::hash(document.as_bytes()).to_hex().to_string(),
    }
}
