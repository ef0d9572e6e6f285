//! Opaque handles for entities and buffs

use std::fmt;

/// Handle for a host entity that owns a buff system.
///
/// The buff engine never allocates these; the host hands them in and gets
/// them back in events.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct EntityId(pub u64);

/// Handle for a buff inside one `BuffSystem`.
///
/// Issued by the owning system when a buff is added. Ids are unique per
/// system and never reused.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BuffId(pub u64);

macro_rules! raw_handle {
    ($ty:ident) => {
        impl $ty {
            pub fn from_raw(id: u64) -> Self {
                Self(id)
            }

            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($ty), "({})"), self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

raw_handle!(EntityId);
raw_handle!(BuffId);

impl BuffId {
    /// The id following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let id = EntityId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{id:?}"), "EntityId(42)");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_buff_id_next() {
        let id = BuffId::from_raw(7);
        assert_eq!(id.next(), BuffId(8));
        assert!(id.next() > id);
    }
}
