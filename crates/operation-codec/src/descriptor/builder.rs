use std::{collections::HashSet, sync::Arc};

use id_newtypes::IdRange;

use super::{
    Descriptors, FieldDescriptor, FieldKind, FragmentDescriptor, FragmentId, SelectionSetDescriptor, SelectionSetId,
    DEFAULT_DISCRIMINANT_KEY,
};
use crate::{config::CodecConfig, error::ConfigurationError};

/// Builds a [`Descriptors`] arena bottom-up: nested selection sets and fragments have to exist
/// before the fields referencing them. `build` rejects any reference to a selection set that isn't
/// older than the referring one, so the result is acyclic.
pub struct DescriptorsBuilder {
    descriptors: Descriptors,
}

impl Default for DescriptorsBuilder {
    fn default() -> Self {
        Self::with_discriminant_key(DEFAULT_DISCRIMINANT_KEY)
    }
}

impl DescriptorsBuilder {
    pub fn with_discriminant_key(key: impl Into<Arc<str>>) -> Self {
        Self {
            descriptors: Descriptors {
                discriminant_key: key.into(),
                fields: Vec::new(),
                selection_sets: Vec::new(),
                fragments: Vec::new(),
            },
        }
    }

    pub fn from_config(config: &CodecConfig) -> Self {
        Self::with_discriminant_key(config.discriminant_key.as_str())
    }

    pub fn selection_set(&mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> SelectionSetId {
        let start = self.descriptors.fields.len();
        let key = &self.descriptors.discriminant_key;
        self.descriptors.fields.extend(fields.into_iter().map(|mut field| {
            if field.kind.is_fragment() {
                field.response_key = key.clone();
                field.field_name = key.clone();
            }
            field
        }));
        let end = self.descriptors.fields.len();

        let id = SelectionSetId::from(self.descriptors.selection_sets.len());
        self.descriptors.selection_sets.push(SelectionSetDescriptor {
            field_ids: IdRange::from(start..end),
        });
        id
    }

    pub fn fragment<S: Into<Arc<str>>>(
        &mut self,
        name: impl Into<Arc<str>>,
        type_condition: impl Into<Arc<str>>,
        possible_types: impl IntoIterator<Item = S>,
        selection_set: SelectionSetId,
    ) -> FragmentId {
        let id = FragmentId::from(self.descriptors.fragments.len());
        self.descriptors.fragments.push(FragmentDescriptor {
            name: name.into(),
            type_condition: type_condition.into(),
            possible_types: possible_types.into_iter().collect(),
            selection_set,
        });
        id
    }

    pub fn build(self) -> Result<Descriptors, ConfigurationError> {
        let descriptors = self.descriptors;

        for (i, fragment) in descriptors.fragments.iter().enumerate() {
            let label = || format!("fragment {} ({})", fragment.name, FragmentId::from(i));
            if fragment.possible_types.is_empty() {
                return Err(ConfigurationError::EmptyPossibleTypes { label: label() });
            }
            check_selection_set(&descriptors, None, fragment.selection_set, label)?;
        }

        for (i, selection_set) in descriptors.selection_sets.iter().enumerate() {
            let id = SelectionSetId::from(i);
            let mut keys = HashSet::new();
            for field in &descriptors[selection_set.field_ids] {
                let label = || format!("field '{}' of {id}", field.response_key);
                match &field.kind {
                    FieldKind::Scalar(_) | FieldKind::CustomScalar(_) => {}
                    FieldKind::Object(nested) => check_selection_set(&descriptors, Some(id), *nested, label)?,
                    FieldKind::List(item) => {
                        let mut kind = &item.kind;
                        while let FieldKind::List(item) = kind {
                            kind = &item.kind;
                        }
                        match kind {
                            FieldKind::Object(nested) => check_selection_set(&descriptors, Some(id), *nested, label)?,
                            FieldKind::NamedFragment(_) | FieldKind::InlineFragment(_) => {
                                return Err(ConfigurationError::FragmentInList {
                                    response_key: field.response_key.to_string(),
                                })
                            }
                            _ => {}
                        }
                    }
                    FieldKind::NamedFragment(fragment) => {
                        let Some(target) = descriptors.fragments.get(usize::from(*fragment)) else {
                            return Err(ConfigurationError::Dangling {
                                referrer: label(),
                                target: fragment.to_string(),
                            });
                        };
                        if target.selection_set >= id {
                            return Err(ConfigurationError::Cyclic {
                                referrer: label(),
                                target: format!("fragment {} ({fragment})", target.name),
                            });
                        }
                    }
                    FieldKind::InlineFragment(fragment) => {
                        if fragment.possible_types.is_empty() {
                            return Err(ConfigurationError::EmptyPossibleTypes {
                                label: format!("inline fragment of {id}"),
                            });
                        }
                        check_selection_set(&descriptors, Some(id), fragment.selection_set, label)?;
                    }
                }

                if !field.kind.is_fragment() && !keys.insert(field.response_key.clone()) {
                    return Err(ConfigurationError::DuplicateResponseKey {
                        response_key: field.response_key.to_string(),
                        selection_set: id.to_string(),
                    });
                }
            }
        }

        Ok(descriptors)
    }
}

/// `id` has to exist and, when referenced from another selection set, to be built before it.
fn check_selection_set(
    descriptors: &Descriptors,
    referring: Option<SelectionSetId>,
    id: SelectionSetId,
    referrer: impl FnOnce() -> String,
) -> Result<(), ConfigurationError> {
    if !descriptors.contains_selection_set(id) {
        return Err(ConfigurationError::Dangling {
            referrer: referrer(),
            target: id.to_string(),
        });
    }
    if referring.is_some_and(|referring| id >= referring) {
        return Err(ConfigurationError::Cyclic {
            referrer: referrer(),
            target: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ListItem, ScalarType};

    #[test]
    fn fragment_fields_use_the_discriminant_key() {
        let mut builder = DescriptorsBuilder::with_discriminant_key("kind");
        let nested = builder.selection_set([FieldDescriptor::scalar("id", ScalarType::Id)]);
        let root = builder.selection_set([
            FieldDescriptor::scalar("kind", ScalarType::String),
            FieldDescriptor::inline_fragment(["A"], nested),
        ]);
        let descriptors = builder.build().unwrap();

        assert_eq!(descriptors.discriminant_key(), "kind");
        let keys = descriptors
            .fields(root)
            .iter()
            .map(|field| field.response_key.as_ref())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["kind", "kind"]);
    }

    #[test]
    fn empty_possible_types() {
        let mut builder = Descriptors::builder();
        let nested = builder.selection_set([]);
        builder.selection_set([FieldDescriptor::inline_fragment(Vec::<String>::new(), nested)]);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"inline fragment of SelectionSet#1 declares no possible types");

        let mut builder = Descriptors::builder();
        let nested = builder.selection_set([]);
        builder.fragment("Empty", "Node", Vec::<String>::new(), nested);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"fragment Empty (Fragment#0) declares no possible types");
    }

    #[test]
    fn fragment_as_list_item() {
        let mut builder = Descriptors::builder();
        let nested = builder.selection_set([]);
        let fragment = builder.fragment("F", "Node", ["A"], nested);
        builder.selection_set([FieldDescriptor::list(
            "nodes",
            ListItem::new(FieldKind::List(Box::new(ListItem::new(FieldKind::NamedFragment(fragment))))),
        )]);

        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::FragmentInList {
                response_key: "nodes".into()
            }
        );
    }

    #[test]
    fn duplicate_response_key() {
        let mut builder = Descriptors::builder();
        builder.selection_set([
            FieldDescriptor::scalar("name", ScalarType::String),
            FieldDescriptor::scalar("name", ScalarType::String).alias_of("fullName"),
        ]);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"response key 'name' is used twice in SelectionSet#0");
    }

    #[test]
    fn several_fragments_in_one_selection_set_are_fine() {
        let mut builder = Descriptors::builder();
        let a = builder.selection_set([FieldDescriptor::scalar("a", ScalarType::Int)]);
        let b = builder.selection_set([FieldDescriptor::scalar("b", ScalarType::Int)]);
        builder.selection_set([
            FieldDescriptor::inline_fragment(["A"], a),
            FieldDescriptor::inline_fragment(["B"], b),
        ]);

        assert!(builder.build().is_ok());
    }

    #[test]
    fn dangling_ids() {
        let mut other = Descriptors::builder();
        other.selection_set([]);
        let foreign = other.selection_set([]);

        let mut builder = Descriptors::builder();
        builder.selection_set([FieldDescriptor::object("hero", foreign)]);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"field 'hero' of SelectionSet#0 references the unknown SelectionSet#1");
    }

    #[test]
    fn self_referencing_inline_fragment() {
        let mut builder = Descriptors::builder();
        builder.selection_set([FieldDescriptor::inline_fragment(["A"], SelectionSetId::from(0))]);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"field '__typename' of SelectionSet#0 references SelectionSet#0, which isn't built before it");
    }

    #[test]
    fn object_referencing_a_younger_selection_set() {
        let mut builder = Descriptors::builder();
        builder.selection_set([FieldDescriptor::object("hero", SelectionSetId::from(1))]);
        builder.selection_set([FieldDescriptor::object("friend", SelectionSetId::from(0))]);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"field 'hero' of SelectionSet#0 references SelectionSet#1, which isn't built before it");
    }

    #[test]
    fn fragment_reaching_itself() {
        let mut builder = Descriptors::builder();
        let details = builder.selection_set([
            FieldDescriptor::scalar("name", ScalarType::String),
            FieldDescriptor::named_fragment(FragmentId::from(0)),
        ]);
        builder.fragment("Details", "Character", ["Droid", "Human"], details);

        let error = builder.build().unwrap_err();
        insta::assert_snapshot!(error, @"field '__typename' of SelectionSet#0 references fragment Details (Fragment#0), which isn't built before it");
    }
}
