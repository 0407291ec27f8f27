use std::sync::Arc;

use wire::{WireMap, WireValue};

use super::{FragmentId, SelectionSetId, DEFAULT_DISCRIMINANT_KEY};

/// Static description of one selected field: where to find it in a response map and what to expect
/// there.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Key of the field in the response, the alias if there is one.
    pub response_key: Arc<str>,
    /// Name of the field in the schema.
    pub field_name: Arc<str>,
    pub arguments: Vec<(String, ArgumentValue)>,
    pub kind: FieldKind,
    pub nullable: bool,
    /// `@skip` / `@include` directives, all of them must hold for the field to be read.
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarType),
    CustomScalar(Arc<str>),
    Object(SelectionSetId),
    List(Box<ListItem>),
    NamedFragment(FragmentId),
    InlineFragment(InlineFragment),
}

impl FieldKind {
    pub fn is_fragment(&self) -> bool {
        matches!(self, FieldKind::NamedFragment(_) | FieldKind::InlineFragment(_))
    }
}

/// Element of a list field. Nested lists are lists of lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub kind: FieldKind,
    pub nullable: bool,
}

impl ListItem {
    pub fn new(kind: FieldKind) -> Self {
        Self { kind, nullable: false }
    }

    pub fn nullable(kind: FieldKind) -> Self {
        Self { kind, nullable: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub possible_types: PossibleTypes,
    pub selection_set: SelectionSetId,
}

/// Concrete type names a fragment applies to. Kept sorted for lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PossibleTypes(Arc<[Arc<str>]>);

impl PossibleTypes {
    pub fn contains(&self, type_name: &str) -> bool {
        self.0.binary_search_by(|name| name.as_ref().cmp(type_name)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|name| name.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<Arc<str>>> FromIterator<S> for PossibleTypes {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut names = iter.into_iter().map(Into::into).collect::<Vec<Arc<str>>>();
        names.sort_unstable();
        names.dedup();
        PossibleTypes(names.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Boolean,
    #[strum(serialize = "ID")]
    Id,
    Enum,
}

impl ScalarType {
    pub(crate) fn expected(&self) -> &'static str {
        match self {
            ScalarType::String => "a string",
            ScalarType::Int => "an integer",
            ScalarType::Float => "a number",
            ScalarType::Boolean => "a boolean",
            ScalarType::Id => "an ID",
            ScalarType::Enum => "an enum value",
        }
    }
}

/// Argument of a field as written in the document: literals and references to operation variables.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Literal(WireValue),
    Variable(String),
    List(Vec<ArgumentValue>),
    Object(Vec<(String, ArgumentValue)>),
}

impl ArgumentValue {
    fn resolve(&self, variables: &WireMap) -> WireValue {
        match self {
            ArgumentValue::Literal(value) => value.clone(),
            ArgumentValue::Variable(name) => variables.get(name).cloned().unwrap_or_default(),
            ArgumentValue::List(items) => WireValue::List(items.iter().map(|item| item.resolve(variables)).collect()),
            ArgumentValue::Object(fields) => fields
                .iter()
                .map(|(name, value)| (name.clone(), value.resolve(variables)))
                .collect(),
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ArgumentValue {
                fn from(value: $ty) -> Self {
                    ArgumentValue::Literal(value.into())
                }
            }
        )*
    };
}

literal_from!(WireValue, bool, i32, i64, f64, &str, String);

/// A boolean operation variable a field depends on. `@include(if: $v)` is `inverted: false`,
/// `@skip(if: $v)` is `inverted: true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    pub variable: String,
    pub inverted: bool,
}

impl Condition {
    /// A variable that isn't provided or isn't a boolean counts as `false`.
    pub fn holds(&self, variables: &WireMap) -> bool {
        let value = variables.get(&self.variable).and_then(WireValue::as_bool).unwrap_or(false);
        value != self.inverted
    }
}

impl FieldDescriptor {
    pub fn new(response_key: impl Into<Arc<str>>, kind: FieldKind) -> Self {
        let response_key = response_key.into();
        Self {
            field_name: response_key.clone(),
            response_key,
            arguments: Vec::new(),
            kind,
            nullable: false,
            conditions: Vec::new(),
        }
    }

    pub fn scalar(response_key: impl Into<Arc<str>>, ty: ScalarType) -> Self {
        Self::new(response_key, FieldKind::Scalar(ty))
    }

    pub fn custom_scalar(response_key: impl Into<Arc<str>>, type_name: impl Into<Arc<str>>) -> Self {
        Self::new(response_key, FieldKind::CustomScalar(type_name.into()))
    }

    pub fn object(response_key: impl Into<Arc<str>>, selection_set: SelectionSetId) -> Self {
        Self::new(response_key, FieldKind::Object(selection_set))
    }

    pub fn list(response_key: impl Into<Arc<str>>, item: ListItem) -> Self {
        Self::new(response_key, FieldKind::List(Box::new(item)))
    }

    /// The `__typename` meta field, selected like any other string.
    pub fn typename() -> Self {
        Self::scalar(DEFAULT_DISCRIMINANT_KEY, ScalarType::String)
    }

    /// Response key is replaced by the discriminant key of the builder it's added to.
    pub fn named_fragment(fragment: FragmentId) -> Self {
        Self::new(DEFAULT_DISCRIMINANT_KEY, FieldKind::NamedFragment(fragment))
    }

    /// Response key is replaced by the discriminant key of the builder it's added to.
    pub fn inline_fragment<S: Into<Arc<str>>>(
        possible_types: impl IntoIterator<Item = S>,
        selection_set: SelectionSetId,
    ) -> Self {
        Self::new(
            DEFAULT_DISCRIMINANT_KEY,
            FieldKind::InlineFragment(InlineFragment {
                possible_types: possible_types.into_iter().collect(),
                selection_set,
            }),
        )
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks `response_key` as an alias of the schema field `field_name`.
    #[must_use]
    pub fn alias_of(mut self, field_name: impl Into<Arc<str>>) -> Self {
        self.field_name = field_name.into();
        self
    }

    #[must_use]
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn skip_if(mut self, variable: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            variable: variable.into(),
            inverted: true,
        });
        self
    }

    #[must_use]
    pub fn include_if(mut self, variable: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            variable: variable.into(),
            inverted: false,
        });
        self
    }

    pub fn is_included(&self, variables: &WireMap) -> bool {
        self.conditions.iter().all(|condition| condition.holds(variables))
    }

    /// Arguments with every variable reference replaced by its value, `null` for missing ones.
    pub fn resolve_arguments(&self, variables: &WireMap) -> WireMap {
        self.arguments
            .iter()
            .map(|(name, value)| (name.clone(), value.resolve(variables)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variables(value: serde_json::Value) -> WireMap {
        match WireValue::from(value) {
            WireValue::Map(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn resolve_arguments_substitutes_variables() {
        let field = FieldDescriptor::object("hero", SelectionSetId::from(0))
            .argument("episode", ArgumentValue::Variable("episode".into()))
            .argument("first", 10)
            .argument(
                "filter",
                ArgumentValue::Object(vec![
                    ("name".into(), ArgumentValue::Variable("name".into())),
                    (
                        "tags".into(),
                        ArgumentValue::List(vec!["a".into(), ArgumentValue::Variable("tag".into())]),
                    ),
                ]),
            );

        let resolved = field.resolve_arguments(&variables(serde_json::json!({
            "episode": "JEDI",
            "tag": "b"
        })));

        insta::assert_json_snapshot!(resolved, @r###"
        {
          "episode": "JEDI",
          "first": 10,
          "filter": {
            "name": null,
            "tags": [
              "a",
              "b"
            ]
          }
        }
        "###);
    }

    #[rstest::rstest]
    #[case::include_true(FieldDescriptor::typename().include_if("v"), serde_json::json!({"v": true}), true)]
    #[case::include_false(FieldDescriptor::typename().include_if("v"), serde_json::json!({"v": false}), false)]
    #[case::include_missing(FieldDescriptor::typename().include_if("v"), serde_json::json!({}), false)]
    #[case::skip_true(FieldDescriptor::typename().skip_if("v"), serde_json::json!({"v": true}), false)]
    #[case::skip_missing(FieldDescriptor::typename().skip_if("v"), serde_json::json!({}), true)]
    #[case::both(
        FieldDescriptor::typename().include_if("a").skip_if("b"),
        serde_json::json!({"a": true, "b": true}),
        false
    )]
    fn conditions(#[case] field: FieldDescriptor, #[case] vars: serde_json::Value, #[case] expected: bool) {
        assert_eq!(field.is_included(&variables(vars)), expected);
    }

    #[test]
    fn possible_types_are_sorted_and_deduplicated() {
        let types = ["Human", "Droid", "Human"].into_iter().collect::<PossibleTypes>();
        assert_eq!(types.iter().collect::<Vec<_>>(), vec!["Droid", "Human"]);
        assert!(types.contains("Human"));
        assert!(!types.contains("Starship"));
    }
}
