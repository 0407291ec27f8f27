//! Static description of what an operation's response looks like.
//!
//! Everything lives in a single arena, [`Descriptors`], built once per operation (or per group of
//! operations sharing fragments) and then shared read-only by every decode call. Selection sets own
//! a contiguous range of fields, nested selection sets and fragments are referenced by id.

mod builder;
mod field;

use std::{collections::HashSet, sync::Arc};

use id_newtypes::IdRange;

pub use builder::DescriptorsBuilder;
pub use field::*;

/// Response key of the `__typename` meta field, used to dispatch fragments.
pub const DEFAULT_DISCRIMINANT_KEY: &str = "__typename";

#[derive(Debug, Clone)]
pub struct Descriptors {
    discriminant_key: Arc<str>,
    fields: Vec<FieldDescriptor>,
    selection_sets: Vec<SelectionSetDescriptor>,
    fragments: Vec<FragmentDescriptor>,
}

id_newtypes::NonZeroU32! {
    Descriptors.fields[FieldDescriptorId] => FieldDescriptor,
    Descriptors.selection_sets[SelectionSetId] => SelectionSetDescriptor,
    Descriptors.fragments[FragmentId] => FragmentDescriptor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSetDescriptor {
    pub field_ids: IdRange<FieldDescriptorId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDescriptor {
    pub name: Arc<str>,
    pub type_condition: Arc<str>,
    pub possible_types: PossibleTypes,
    pub selection_set: SelectionSetId,
}

impl Descriptors {
    pub fn builder() -> DescriptorsBuilder {
        DescriptorsBuilder::default()
    }

    /// Response key carrying the concrete type name of an object.
    pub fn discriminant_key(&self) -> &str {
        &self.discriminant_key
    }

    pub(crate) fn discriminant_key_arc(&self) -> &Arc<str> {
        &self.discriminant_key
    }

    /// Fields of a selection set in declaration order.
    pub fn fields(&self, id: SelectionSetId) -> &[FieldDescriptor] {
        &self[self[id].field_ids]
    }

    pub fn fragment_by_name(&self, name: &str) -> Option<FragmentId> {
        self.fragments
            .iter()
            .position(|fragment| fragment.name.as_ref() == name)
            .map(FragmentId::from)
    }

    pub fn selection_set_count(&self) -> usize {
        self.selection_sets.len()
    }

    pub(crate) fn contains_selection_set(&self, id: SelectionSetId) -> bool {
        usize::from(id) < self.selection_sets.len()
    }

    /// Every field reachable from `root`, through nested objects, lists and fragments. Each
    /// selection set is visited once even when several fragments share it.
    pub fn reachable_fields(&self, root: SelectionSetId) -> Vec<&FieldDescriptor> {
        let mut visited = HashSet::new();
        let mut stack = vec![root];
        let mut fields = Vec::new();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            for field in self.fields(id) {
                fields.push(field);
                let mut kind = &field.kind;
                while let FieldKind::List(item) = kind {
                    kind = &item.kind;
                }
                match kind {
                    FieldKind::Object(id) => stack.push(*id),
                    FieldKind::NamedFragment(id) => stack.push(self[*id].selection_set),
                    FieldKind::InlineFragment(fragment) => stack.push(fragment.selection_set),
                    FieldKind::Scalar(_) | FieldKind::CustomScalar(_) | FieldKind::List(_) => {}
                }
            }
        }

        fields
    }
}
