/// Three-state value of an optional input field.
///
/// `Absent` fields are left out of the encoded variables, `Null` ones are sent as `null`. GraphQL
/// servers treat both differently: an absent argument keeps its default value, a null one unsets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Presence<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Presence<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Presence::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Presence::Null)
    }

    /// Present, whether null or not.
    pub fn is_defined(&self) -> bool {
        !self.is_absent()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Presence::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Presence<&T> {
        match self {
            Presence::Absent => Presence::Absent,
            Presence::Null => Presence::Null,
            Presence::Value(value) => Presence::Value(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Presence<U> {
        match self {
            Presence::Absent => Presence::Absent,
            Presence::Null => Presence::Null,
            Presence::Value(value) => Presence::Value(f(value)),
        }
    }

    /// `None` when absent, `Some(None)` when null.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Presence::Absent => None,
            Presence::Null => Some(None),
            Presence::Value(value) => Some(Some(value)),
        }
    }

    /// A nullable value that is always sent, `None` being sent as `null`.
    pub fn from_nullable(value: Option<T>) -> Self {
        match value {
            Some(value) => Presence::Value(value),
            None => Presence::Null,
        }
    }

    /// A value that is sent only if there is one, `None` leaving the field out.
    pub fn from_optional(value: Option<T>) -> Self {
        match value {
            Some(value) => Presence::Value(value),
            None => Presence::Absent,
        }
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        Presence::from_nullable(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states() {
        let absent = Presence::<i32>::default();
        assert!(absent.is_absent());
        assert!(!absent.is_defined());
        assert_eq!(absent.into_option(), None);

        let null = Presence::<i32>::from(None);
        assert!(null.is_null());
        assert!(null.is_defined());
        assert_eq!(null.into_option(), Some(None));

        let value = Presence::from(Some(3));
        assert_eq!(value.value(), Some(&3));
        assert_eq!(value.map(|v| v * 2), Presence::Value(6));
        assert_eq!(Presence::from_optional(None::<i32>), Presence::Absent);
    }
}
