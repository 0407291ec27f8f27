//! Compact arena ids for the descriptor tables.
//!
//! Ids are stored as `NonZeroU32` shifted by one so that `Option<Id>` stays four bytes wide.

mod range;
pub use range::IdRange;

#[macro_export]
macro_rules! debug_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name = stringify!($name);
                write!(f, "{}#{}", name.strip_suffix("Id").unwrap_or(name), usize::from(*self))
            }
        }
        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Implements read-only indexing of `$ty.$field` by an id and by an [`IdRange`] of ids.
/// Arenas are append-only while building and frozen afterwards, so there is no `IndexMut`.
#[macro_export]
macro_rules! index {
    ($($ty:ident$(.$field:ident)+[$name:ident] => $output:ty,)*) => {
        $(
            impl std::ops::Index<$name> for $ty {
                type Output = $output;

                fn index(&self, index: $name) -> &Self::Output {
                    &self$(.$field)+[usize::from(index)]
                }
            }

            impl std::ops::Index<$crate::IdRange<$name>> for $ty {
                type Output = [$output];

                fn index(&self, range: $crate::IdRange<$name>) -> &Self::Output {
                    let $crate::IdRange { start, end } = range;
                    &self$(.$field)+[usize::from(start)..usize::from(end)]
                }
            }
        )*
    };
}

#[macro_export]
macro_rules! NonZeroU32 {
    ($($ty:ident$(.$field:ident)+[$name:ident] => $output:ty,)*) => {
        $(
            $crate::NonZeroU32! { $name, }
            $crate::index! { $ty$(.$field)+[$name] => $output, }
        )*
    };
    ($($name:ident,)*) => {
        $(
            #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
            pub struct $name(std::num::NonZeroU32);

            impl From<usize> for $name {
                fn from(value: usize) -> Self {
                    Self(
                        u32::try_from(value)
                            .ok()
                            .and_then(|value| value.checked_add(1))
                            .and_then(std::num::NonZeroU32::new)
                            .expect(concat!("Too many ", stringify!($name)))
                    )
                }
            }

            impl From<$name> for u32 {
                fn from(id: $name) -> Self {
                    id.0.get() - 1
                }
            }

            impl From<$name> for usize {
                fn from(id: $name) -> Self {
                    (id.0.get() - 1) as usize
                }
            }

            $crate::debug_display! { $name }
        )*
    };
}
