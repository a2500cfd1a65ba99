//! Typed indices into the simulator's arenas.
//!
//! Every id is a `u32` slot number.  `u32::MAX` is reserved as the "none"
//! value so parent links and routing predecessors fit in a plain `Vec`
//! without an `Option` per slot.

use std::fmt;

macro_rules! arena_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// The reserved "none" slot.
            pub const INVALID: $name = $name(u32::MAX);

            /// Id of arena slot `i`.  Arenas never grow past `u32::MAX - 1`
            /// entries.
            #[inline]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < u32::MAX as usize, "{} arena overflow", $prefix);
                $name(i as u32)
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "#{}"), self.0)
                } else {
                    f.write_str(concat!($prefix, "#none"))
                }
            }
        }
    };
}

arena_id! {
    /// Slot of a pose node in the `PoseTree`.  Nodes are never removed, only
    /// re-parented, so a `NodeId` stays valid for the life of the tree.
    NodeId, "node"
}

arena_id! {
    /// Handle of one running movement, returned by `PoseTree::start_movement`
    /// and needed to end it.
    MovementId, "movement"
}

arena_id! {
    /// Slot of a module in the routing graph.
    ModuleId, "module"
}
