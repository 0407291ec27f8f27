use std::{fmt, sync::Arc};

use wire::{WireKind, WireValue};

use crate::{descriptor::ScalarType, response::ResponsePath};

/// Why a response couldn't be decoded. Only the first encountered error is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("missing required field '{key}' at '{path}'")]
    MissingField { key: String, path: ResponsePath },
    #[error("expected {expected} at '{path}', found {found}")]
    TypeMismatch {
        path: ResponsePath,
        expected: ExpectedKind,
        found: WireKind,
    },
    #[error("no codec registered for custom scalar '{type_name}' at '{path}'")]
    UnknownScalar { type_name: Arc<str>, path: ResponsePath },
    #[error("could not decode custom scalar '{type_name}' at '{path}': {source}")]
    ScalarDecodeFailed {
        type_name: Arc<str>,
        path: ResponsePath,
        #[source]
        source: ScalarError,
    },
}

impl DecodeError {
    pub fn path(&self) -> &ResponsePath {
        match self {
            DecodeError::MissingField { path, .. }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::UnknownScalar { path, .. }
            | DecodeError::ScalarDecodeFailed { path, .. } => path,
        }
    }

    /// Response key of the field that failed, if the failure happened inside an object.
    pub fn response_key(&self) -> Option<&str> {
        match self {
            DecodeError::MissingField { key, .. } => Some(key),
            _ => self.path().last_key(),
        }
    }

    pub(crate) fn mismatch(path: &ResponsePath, expected: ExpectedKind, found: &WireValue) -> Self {
        DecodeError::TypeMismatch {
            path: path.clone(),
            expected,
            found: found.kind(),
        }
    }
}

/// What the descriptor expected to find in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedKind {
    Scalar(ScalarType),
    CustomScalar,
    Object,
    List,
    TypeName,
    GraphqlErrors,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedKind::Scalar(scalar) => f.write_str(scalar.expected()),
            ExpectedKind::CustomScalar => f.write_str("a custom scalar"),
            ExpectedKind::Object => f.write_str("an object"),
            ExpectedKind::List => f.write_str("a list"),
            ExpectedKind::TypeName => f.write_str("a type name string"),
            ExpectedKind::GraphqlErrors => f.write_str("a list of GraphQL errors"),
        }
    }
}

/// Rejection of a wire value by a custom scalar codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ScalarError {
    message: Box<str>,
}

impl ScalarError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into().into_boxed_str(),
        }
    }

    pub fn unexpected(expected: &str, found: &WireValue) -> Self {
        Self::new(format!("expected {expected}, found {}", found.kind()))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Inconsistency between descriptors, registry and document. These come from the build, never from
/// a response, so callers are expected to treat them as fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{label} declares no possible types")]
    EmptyPossibleTypes { label: String },
    #[error("field '{response_key}' uses a fragment as list item")]
    FragmentInList { response_key: String },
    #[error("response key '{response_key}' is used twice in {selection_set}")]
    DuplicateResponseKey { response_key: String, selection_set: String },
    #[error("{referrer} references the unknown {target}")]
    Dangling { referrer: String, target: String },
    /// Nested selection sets have to be built before the selection sets referencing them.
    #[error("{referrer} references {target}, which isn't built before it")]
    Cyclic { referrer: String, target: String },
    #[error("custom scalar '{type_name}' used by field '{response_key}' has no registered codec")]
    UnregisteredScalar { type_name: String, response_key: String },
    #[error("operations must be named")]
    AnonymousOperation,
    #[error("invalid operation document: {0}")]
    InvalidDocument(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key_and_the_expected_kind() {
        let path = ResponsePath::default().child("search").child(0).child("id");

        let missing = DecodeError::MissingField {
            key: "id".into(),
            path: path.clone(),
        };
        insta::assert_snapshot!(missing, @"missing required field 'id' at 'search.0.id'");
        assert_eq!(missing.response_key(), Some("id"));

        let mismatch = DecodeError::mismatch(&path, ExpectedKind::Scalar(ScalarType::Int), &WireValue::from("1"));
        insta::assert_snapshot!(mismatch, @"expected an integer at 'search.0.id', found a string");
        assert_eq!(mismatch.response_key(), Some("id"));

        let failed = DecodeError::ScalarDecodeFailed {
            type_name: "AWSDate".into(),
            path: ResponsePath::default().child("createdAt"),
            source: ScalarError::new("premature end of input"),
        };
        insta::assert_snapshot!(failed, @"could not decode custom scalar 'AWSDate' at 'createdAt': premature end of input");
    }

    #[test]
    fn root_level_errors_have_no_key() {
        let error = DecodeError::mismatch(&ResponsePath::default(), ExpectedKind::Object, &WireValue::Null);
        insta::assert_snapshot!(error, @"expected an object at '(root)', found null");
        assert_eq!(error.response_key(), None);
    }
}
