//! Decoded results and the GraphQL response envelope.

mod object;
mod path;
mod value;
mod write;

use wire::WireMap;

pub(crate) use object::{Discriminant, FragmentLabel};
pub use object::{FragmentSlot, ResultObject};
pub use path::{ResponsePath, ResponsePathSegment};
pub use value::{ResultValue, ScalarValue};

/// A complete GraphQL response: `data` is `None` when the server returned `null` or no data at all,
/// the errors then tell why.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub data: Option<ResultObject>,
    pub errors: Vec<GraphqlError>,
    pub extensions: WireMap,
}

impl Response {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<ErrorPathSegment>>,
    #[serde(default, skip_serializing_if = "WireMap::is_empty")]
    pub extensions: WireMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ErrorPathSegment {
    Index(usize),
    Field(String),
}

impl GraphqlError {
    /// Error code from the `extensions`, if the server set one.
    pub fn code(&self) -> Option<&str> {
        self.extensions.get("code").and_then(|code| code.as_str())
    }
}
