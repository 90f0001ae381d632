//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every entity in the warehouse (robot, pod, slot, station, order) lives in
//! an arena `Vec` or map and is referred to by one of these ids, never by a
//! pointer.  All ids are `Copy + Ord + Hash` so they work as map keys and in
//! ordered sets; `BTreeSet<RobotId>` iterates robots in canonical index order,
//! which is what the engine relies on for deterministic tie-breaks.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a robot in the warehouse robot pool.
    pub struct RobotId(u32);
}

typed_id! {
    /// Index of an inventory pod.  Pod `i` is created on slot `i` at build time.
    pub struct PodId(u32);
}

typed_id! {
    /// Index of a storage slot in the layout grid (row-major).
    pub struct SlotId(u32);
}

typed_id! {
    /// Index of a picking workstation.
    pub struct StationId(u16);
}

typed_id! {
    /// Sequential order number.  Orders are numbered in arrival order, so
    /// comparing two `OrderId`s compares their arrival order.
    pub struct OrderId(u64);
}

typed_id! {
    /// SKU class stored on a pod.  Every pod holds exactly one item type.
    pub struct ItemType(u16);
}

impl OrderId {
    /// The id following `self`.
    #[inline]
    pub fn next(self) -> OrderId {
        OrderId(self.0 + 1)
    }
}
