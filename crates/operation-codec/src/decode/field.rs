use wire::WireValue;

use super::{scalar::decode_scalar, selection_set::SelectionSetDecoder, DecodeContext};
use crate::{
    descriptor::FieldKind,
    error::{DecodeError, ExpectedKind},
    response::{ResponsePath, ResultValue},
};

/// Decodes the value of a field, or of a list item, at `path`.
pub(super) struct ValueDecoder<'ctx, 'parent> {
    pub ctx: &'parent DecodeContext<'ctx>,
    pub path: &'parent ResponsePath,
    pub kind: &'ctx FieldKind,
    pub nullable: bool,
}

impl ValueDecoder<'_, '_> {
    pub fn decode(&self, value: &WireValue) -> Result<ResultValue, DecodeError> {
        if value.is_null() {
            return if self.nullable {
                Ok(ResultValue::Null)
            } else {
                Err(DecodeError::mismatch(self.path, expected(self.kind), value))
            };
        }

        match self.kind {
            FieldKind::Scalar(ty) => decode_scalar(*ty, value)
                .map(ResultValue::Scalar)
                .ok_or_else(|| DecodeError::mismatch(self.path, ExpectedKind::Scalar(*ty), value)),
            FieldKind::CustomScalar(type_name) => self
                .ctx
                .registry
                .decode_at(type_name, value, self.path)
                .map(ResultValue::Custom),
            FieldKind::Object(id) => SelectionSetDecoder {
                ctx: self.ctx,
                path: self.path,
                id: *id,
            }
            .decode(value)
            .map(ResultValue::Object),
            FieldKind::List(item) => {
                let Some(items) = value.as_list() else {
                    return Err(DecodeError::mismatch(self.path, ExpectedKind::List, value));
                };
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| {
                        ValueDecoder {
                            ctx: self.ctx,
                            path: &self.path.child(index),
                            kind: &item.kind,
                            nullable: item.nullable,
                        }
                        .decode(value)
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(ResultValue::List)
            }
            FieldKind::NamedFragment(_) | FieldKind::InlineFragment(_) => {
                unreachable!("fragments are dispatched by their selection set and never are list items")
            }
        }
    }
}

fn expected(kind: &FieldKind) -> ExpectedKind {
    match kind {
        FieldKind::Scalar(ty) => ExpectedKind::Scalar(*ty),
        FieldKind::CustomScalar(_) => ExpectedKind::CustomScalar,
        FieldKind::List(_) => ExpectedKind::List,
        FieldKind::Object(_) | FieldKind::NamedFragment(_) | FieldKind::InlineFragment(_) => ExpectedKind::Object,
    }
}
