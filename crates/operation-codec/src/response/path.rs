use std::{fmt, sync::Arc};

/// Location of a value inside a response, from the root `data` object.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct ResponsePath(im::Vector<ResponsePathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResponsePathSegment {
    Key(Arc<str>),
    Index(usize),
}

impl ResponsePath {
    pub fn child(&self, segment: impl Into<ResponsePathSegment>) -> ResponsePath {
        let mut path = self.0.clone();
        path.push_back(segment.into());
        ResponsePath(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponsePathSegment> {
        self.0.iter()
    }

    /// The closest object key, skipping list indices.
    pub fn last_key(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|segment| match segment {
            ResponsePathSegment::Key(key) => Some(key.as_ref()),
            ResponsePathSegment::Index(_) => None,
        })
    }
}

impl From<&Arc<str>> for ResponsePathSegment {
    fn from(key: &Arc<str>) -> Self {
        ResponsePathSegment::Key(key.clone())
    }
}

impl From<&str> for ResponsePathSegment {
    fn from(key: &str) -> Self {
        ResponsePathSegment::Key(key.into())
    }
}

impl From<usize> for ResponsePathSegment {
    fn from(index: usize) -> Self {
        ResponsePathSegment::Index(index)
    }
}

impl fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                ResponsePathSegment::Key(key) => f.write_str(key)?,
                ResponsePathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ResponsePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponsePath").field(&self.to_string()).finish()
    }
}

/// Serialized the way GraphQL error paths are: a list of keys and indices.
impl serde::Serialize for ResponsePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.0.iter().map(|segment| match segment {
            ResponsePathSegment::Key(key) => serde_json::Value::String(key.to_string()),
            ResponsePathSegment::Index(index) => serde_json::Value::from(*index),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_does_not_modify_parent() {
        let parent = ResponsePath::default().child("hero");
        let child = parent.child("friends").child(2);

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 3);
        assert_eq!(child.to_string(), "hero.friends.2");
        assert_eq!(child.last_key(), Some("friends"));
        insta::assert_json_snapshot!(child, @r###"
        [
          "hero",
          "friends",
          2
        ]
        "###);
    }
}
