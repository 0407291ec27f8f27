use std::sync::Arc;

use wire::{WireMap, WireValue};

use super::{field::ValueDecoder, DecodeContext};
use crate::{
    descriptor::{FieldKind, PossibleTypes, SelectionSetId},
    error::{DecodeError, ExpectedKind},
    response::{Discriminant, FragmentLabel, FragmentSlot, ResponsePath, ResultObject, ResultValue},
};

pub(super) struct SelectionSetDecoder<'ctx, 'parent> {
    pub ctx: &'parent DecodeContext<'ctx>,
    pub path: &'parent ResponsePath,
    pub id: SelectionSetId,
}

impl SelectionSetDecoder<'_, '_> {
    pub fn decode(&self, value: &WireValue) -> Result<ResultObject, DecodeError> {
        let Some(map) = value.as_map() else {
            return Err(DecodeError::mismatch(self.path, ExpectedKind::Object, value));
        };
        self.decode_map(map)
    }

    fn decode_map(&self, map: &WireMap) -> Result<ResultObject, DecodeError> {
        let descriptors = self.ctx.descriptors;
        let fields = descriptors.fields(self.id);
        let mut values = Vec::with_capacity(fields.len());
        let mut fragments = Vec::new();
        let mut typename = None;

        for field in fields {
            let included = field.is_included(self.ctx.variables);
            let (label, possible_types, selection_set) = match &field.kind {
                FieldKind::NamedFragment(id) => {
                    let fragment = &descriptors[*id];
                    (
                        FragmentLabel::Named(fragment.name.clone()),
                        &fragment.possible_types,
                        fragment.selection_set,
                    )
                }
                FieldKind::InlineFragment(fragment) => (
                    FragmentLabel::Inline(fragment.possible_types.clone()),
                    &fragment.possible_types,
                    fragment.selection_set,
                ),
                _ => {
                    let value = if included {
                        self.decode_field_value(map, &field.response_key, &field.kind, field.nullable)?
                    } else {
                        ResultValue::Null
                    };
                    values.push((field.response_key.clone(), value));
                    continue;
                }
            };

            let data = if included {
                self.dispatch(map, &mut typename, possible_types, selection_set)?
            } else {
                None
            };
            fragments.push(FragmentSlot { label, data });
        }

        if typename.is_none() {
            typename = self.discriminant(map)?;
        }

        Ok(ResultObject::new(typename, values, fragments))
    }

    fn decode_field_value(
        &self,
        map: &WireMap,
        key: &Arc<str>,
        kind: &FieldKind,
        nullable: bool,
    ) -> Result<ResultValue, DecodeError> {
        let path = self.path.child(key);
        match map.get(key.as_ref()) {
            Some(value) => ValueDecoder {
                ctx: self.ctx,
                path: &path,
                kind,
                nullable,
            }
            .decode(value),
            None if nullable => Ok(ResultValue::Null),
            None => Err(DecodeError::MissingField {
                key: key.to_string(),
                path,
            }),
        }
    }

    /// Decodes the fragment's selection set against the same map when the object's type is one of
    /// its possible types.
    fn dispatch(
        &self,
        map: &WireMap,
        typename: &mut Option<Discriminant>,
        possible_types: &PossibleTypes,
        selection_set: SelectionSetId,
    ) -> Result<Option<ResultObject>, DecodeError> {
        if typename.is_none() {
            *typename = self.discriminant(map)?;
        }
        let Some(discriminant) = typename.as_ref() else {
            return Err(DecodeError::MissingField {
                key: self.ctx.descriptors.discriminant_key().to_string(),
                path: self.path.child(self.ctx.descriptors.discriminant_key_arc()),
            });
        };

        if !possible_types.contains(&discriminant.value) {
            tracing::trace!("Skipping fragment at '{}' for type {}", self.path, discriminant.value);
            return Ok(None);
        }

        SelectionSetDecoder {
            ctx: self.ctx,
            path: self.path,
            id: selection_set,
        }
        .decode_map(map)
        .map(Some)
    }

    fn discriminant(&self, map: &WireMap) -> Result<Option<Discriminant>, DecodeError> {
        let key = self.ctx.descriptors.discriminant_key_arc();
        match map.get(key.as_ref()) {
            None | Some(WireValue::Null) => Ok(None),
            Some(WireValue::String(value)) => Ok(Some(Discriminant {
                key: key.clone(),
                value: value.as_str().into(),
            })),
            Some(value) => Err(DecodeError::mismatch(&self.path.child(key), ExpectedKind::TypeName, value)),
        }
    }
}
