//! # GraphQL operation codec
//!
//! Decodes GraphQL responses into immutable, structurally comparable result objects and encodes
//! operation variables, driven by static descriptors instead of per-operation generated code.
//!
//! - [`descriptor`]: what a response of an operation looks like, fields, nested objects, lists and
//!   fragments dispatched on `__typename`.
//! - [`scalars`]: codecs for custom scalars, looked up by type name.
//! - [`decode`]: wire values to [`ResultObject`].
//! - [`input`]: variables with three-state optional fields, encoded to wire values.
//! - [`OperationDescriptor`]: normalized document text and its hash.
//! - [`OperationCodec`]: all of the above for a single operation.

mod codec;
mod config;
pub mod decode;
pub mod descriptor;
mod error;
pub mod input;
mod operation;
mod request;
pub mod response;
pub mod scalars;

pub use codec::OperationCodec;
pub use config::{CodecConfig, DocumentHashAlgorithm};
pub use error::{ConfigurationError, DecodeError, ExpectedKind, ScalarError};
pub use operation::{OperationDescriptor, OperationKind};
pub use request::{OperationRequest, PersistedQueryMode};
pub use response::{Response, ResultObject, ResultValue, ScalarValue};
pub use wire::{WireMap, WireValue};
