use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::{Arc, OnceLock},
};

use fnv::FnvHasher;

use super::{ResultValue, ScalarValue};
use crate::descriptor::PossibleTypes;

/// A decoded object: its fields in declaration order, its concrete type if the response told it and
/// one slot per fragment selected on it.
///
/// Immutable and cheap to clone. Equality and hashing are structural, the hash and the display
/// rendering are computed on first use and kept.
#[derive(Clone)]
pub struct ResultObject(Arc<ObjectInner>);

struct ObjectInner {
    typename: Option<Discriminant>,
    fields: Box<[(Arc<str>, ResultValue)]>,
    fragments: Box<[FragmentSlot]>,
    hash: OnceLock<u64>,
    rendered: OnceLock<String>,
}

/// The concrete type name of an object and the response key it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Discriminant {
    pub key: Arc<str>,
    pub value: Arc<str>,
}

/// Result of a fragment spread: `data` is `None` when the object's type isn't one the fragment
/// applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentSlot {
    pub(crate) label: FragmentLabel,
    pub(crate) data: Option<ResultObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum FragmentLabel {
    Named(Arc<str>),
    Inline(PossibleTypes),
}

impl FragmentSlot {
    /// Fragment name for named fragments.
    pub fn name(&self) -> Option<&str> {
        match &self.label {
            FragmentLabel::Named(name) => Some(name),
            FragmentLabel::Inline(_) => None,
        }
    }

    /// Type names an inline fragment applies to.
    pub fn possible_types(&self) -> Option<&PossibleTypes> {
        match &self.label {
            FragmentLabel::Named(_) => None,
            FragmentLabel::Inline(possible_types) => Some(possible_types),
        }
    }

    pub fn data(&self) -> Option<&ResultObject> {
        self.data.as_ref()
    }
}

impl ResultObject {
    pub(crate) fn new(
        typename: Option<Discriminant>,
        fields: Vec<(Arc<str>, ResultValue)>,
        fragments: Vec<FragmentSlot>,
    ) -> Self {
        ResultObject(Arc::new(ObjectInner {
            typename,
            fields: fields.into_boxed_slice(),
            fragments: fragments.into_boxed_slice(),
            hash: OnceLock::new(),
            rendered: OnceLock::new(),
        }))
    }

    /// Concrete type of the object, when the response carried the discriminant.
    pub fn typename(&self) -> Option<&str> {
        self.0.typename.as_ref().map(|typename| typename.value.as_ref())
    }

    pub(crate) fn discriminant(&self) -> Option<&Discriminant> {
        self.0.typename.as_ref()
    }

    pub fn get(&self, response_key: &str) -> Option<&ResultValue> {
        self.0
            .fields
            .iter()
            .find(|(key, _)| key.as_ref() == response_key)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl ExactSizeIterator<Item = (&str, &ResultValue)> {
        self.0.fields.iter().map(|(key, value)| (key.as_ref(), value))
    }

    pub fn len(&self) -> usize {
        self.0.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.fields.is_empty()
    }

    pub fn fragments(&self) -> &[FragmentSlot] {
        &self.0.fragments
    }

    /// Data of the first inline fragment applying to `type_name` that matched. Sibling fragments
    /// may overlap, see [`ResultObject::as_types`] for all of them.
    pub fn as_type(&self, type_name: &str) -> Option<&ResultObject> {
        self.as_types(type_name).next()
    }

    /// Data of every matched inline fragment applying to `type_name`, in declaration order.
    pub fn as_types<'a, 'b>(&'a self, type_name: &'b str) -> impl Iterator<Item = &'a ResultObject> + 'b
    where
        'a: 'b,
    {
        self.0.fragments.iter().filter_map(move |slot| match (&slot.label, &slot.data) {
            (FragmentLabel::Inline(possible_types), Some(data)) if possible_types.contains(type_name) => Some(data),
            _ => None,
        })
    }

    /// Data of the named fragment `name`, if it matched.
    pub fn fragment(&self, name: &str) -> Option<&ResultObject> {
        self.0.fragments.iter().find_map(|slot| match (&slot.label, &slot.data) {
            (FragmentLabel::Named(fragment), Some(data)) if fragment.as_ref() == name => Some(data),
            _ => None,
        })
    }

    pub fn ptr_eq(&self, other: &ResultObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn structural_hash(&self) -> u64 {
        *self.0.hash.get_or_init(|| {
            let mut hasher = FnvHasher::default();
            self.0.typename.hash(&mut hasher);
            self.0.fields.hash(&mut hasher);
            self.0.fragments.hash(&mut hasher);
            hasher.finish()
        })
    }

    fn rendered(&self) -> &str {
        self.0.rendered.get_or_init(|| {
            let mut out = String::new();
            // Writing into a String can't fail.
            let _ = render_object(self, &mut out);
            out
        })
    }
}

impl PartialEq for ResultObject {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if self.structural_hash() != other.structural_hash() {
            return false;
        }
        self.0.typename == other.0.typename
            && self.0.fields == other.0.fields
            && self.0.fragments == other.0.fragments
    }
}

impl Eq for ResultObject {}

impl Hash for ResultObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

/// Renders as `Droid { name: "R2-D2", ... on Droid { primaryFunction: "Astromech" } }`, fragments
/// that didn't match are left out.
impl fmt::Display for ResultObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rendered())
    }
}

impl fmt::Debug for ResultObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Fields<'a>(&'a [(Arc<str>, ResultValue)]);

        impl fmt::Debug for Fields<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.0.iter().map(|(key, value)| (key, value))).finish()
            }
        }

        f.debug_struct("ResultObject")
            .field("typename", &self.typename())
            .field("fields", &Fields(&self.0.fields))
            .field("fragments", &self.0.fragments)
            .finish()
    }
}

fn render_object(object: &ResultObject, out: &mut String) -> fmt::Result {
    if let Some(typename) = object.typename() {
        out.push_str(typename);
        out.push(' ');
    }
    render_body(object, out)
}

fn render_body(object: &ResultObject, out: &mut String) -> fmt::Result {
    use fmt::Write;

    out.push('{');
    let mut first = true;
    for (key, value) in object.fields() {
        out.push_str(if first { " " } else { ", " });
        first = false;
        write!(out, "{key}: ")?;
        render_value(value, out)?;
    }
    for slot in object.fragments() {
        let Some(data) = slot.data() else { continue };
        out.push_str(if first { " " } else { ", " });
        first = false;
        match &slot.label {
            FragmentLabel::Named(name) => write!(out, "...{name} ")?,
            FragmentLabel::Inline(possible_types) => {
                out.push_str("... on ");
                for (i, name) in possible_types.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    out.push_str(name);
                }
                out.push(' ');
            }
        }
        render_body(data, out)?;
    }
    out.push_str(if first { "}" } else { " }" });
    Ok(())
}

fn render_value(value: &ResultValue, out: &mut String) -> fmt::Result {
    use fmt::Write;

    match value {
        ResultValue::Null => out.push_str("null"),
        ResultValue::Scalar(scalar) => match scalar {
            ScalarValue::Boolean(b) => write!(out, "{b}")?,
            ScalarValue::Int(i) => write!(out, "{i}")?,
            ScalarValue::Float(f) => write!(out, "{f:?}")?,
            ScalarValue::String(s) | ScalarValue::Id(s) => write!(out, "{s:?}")?,
            ScalarValue::Enum(s) => out.push_str(s),
        },
        ResultValue::Custom(custom) => write!(out, "{custom:?}")?,
        ResultValue::Object(object) => out.push_str(object.rendered()),
        ResultValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(item, out)?;
            }
            out.push(']');
        }
    }
    Ok(())
}
