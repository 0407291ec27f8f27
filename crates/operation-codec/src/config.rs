use crate::descriptor::DEFAULT_DISCRIMINANT_KEY;

/// Codec settings shared by all operations of a client.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Response key carrying the concrete type of an object, `__typename` unless a server
    /// rewrites it.
    pub discriminant_key: String,
    /// Digest used for operation content hashes.
    pub document_hash: DocumentHashAlgorithm,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            discriminant_key: DEFAULT_DISCRIMINANT_KEY.to_string(),
            document_hash: DocumentHashAlgorithm::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DocumentHashAlgorithm {
    /// Compatible with automatic persisted queries.
    #[default]
    Sha256,
    Blake3,
}
