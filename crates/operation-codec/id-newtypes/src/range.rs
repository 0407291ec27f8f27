/// A contiguous, half-open range of arena ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdRange<Id> {
    pub start: Id,
    pub end: Id,
}

impl<Id> IdRange<Id>
where
    Id: From<usize> + Copy,
    usize: From<Id>,
{
    pub fn empty() -> Self {
        Self {
            start: Id::from(0),
            end: Id::from(0),
        }
    }

    pub fn len(&self) -> usize {
        usize::from(self.end) - usize::from(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: Id) -> bool {
        (usize::from(self.start)..usize::from(self.end)).contains(&usize::from(id))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Id> {
        (usize::from(self.start)..usize::from(self.end)).map(Id::from)
    }
}

impl<Id> From<std::ops::Range<usize>> for IdRange<Id>
where
    Id: From<usize>,
{
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: Id::from(range.start),
            end: Id::from(range.end),
        }
    }
}

impl<Id> std::fmt::Debug for IdRange<Id>
where
    Id: Copy,
    usize: From<Id>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", usize::from(self.start), usize::from(self.end))
    }
}
