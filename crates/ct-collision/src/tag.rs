//! Collision-check eligibility.
//!
//! Two independent checks exist, each defined by a [`TagPair`]:
//!
//! | Pair                 | First tag       | Second tag          | Drives          |
//! |----------------------|-----------------|---------------------|-----------------|
//! | `SegmentAndShape`    | `Segment`       | `SegmentCollidable` | sensor flags    |
//! | `PointAndMovingShape`| `MovablePoint`  | `MovingShape`       | reparenting     |
//!
//! A node may carry tags from both pairs.

use std::fmt;
use std::ops::BitOr;

use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Segment,
    SegmentCollidable,
    MovablePoint,
    MovingShape,
}

impl Tag {
    pub const ALL: [Tag; 4] =
        [Tag::Segment, Tag::SegmentCollidable, Tag::MovablePoint, Tag::MovingShape];

    #[inline]
    pub const fn flag(self) -> TagSet {
        match self {
            Tag::Segment => TagSet::SEGMENT,
            Tag::SegmentCollidable => TagSet::SEGMENT_COLLIDABLE,
            Tag::MovablePoint => TagSet::MOVABLE_POINT,
            Tag::MovingShape => TagSet::MOVING_SHAPE,
        }
    }
}

bitflags! {
    /// The tags one collider carries.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TagSet: u8 {
        const SEGMENT            = 0b0000_0001;
        const SEGMENT_COLLIDABLE = 0b0000_0010;
        const MOVABLE_POINT      = 0b0000_0100;
        const MOVING_SHAPE       = 0b0000_1000;
    }
}

impl TagSet {
    pub const EMPTY: TagSet = TagSet::empty();

    #[inline]
    pub fn has(self, tag: Tag) -> bool {
        self.contains(tag.flag())
    }

    pub fn tags(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |&t| self.has(t))
    }
}

impl From<Tag> for TagSet {
    fn from(tag: Tag) -> Self {
        tag.flag()
    }
}

impl BitOr for Tag {
    type Output = TagSet;
    fn bitor(self, rhs: Tag) -> TagSet {
        self.flag() | rhs.flag()
    }
}

impl BitOr<Tag> for TagSet {
    type Output = TagSet;
    fn bitor(self, rhs: Tag) -> TagSet {
        self | rhs.flag()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.tags().map(|t| format!("{t:?}")).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// One of the two checked tag combinations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagPair {
    /// Light-barrier segments against anything they can detect.
    SegmentAndShape,
    /// Boxes against belts that carry them.
    PointAndMovingShape,
}

impl TagPair {
    /// `(first, second)` tag of the pair.
    pub fn tags(self) -> (Tag, Tag) {
        match self {
            TagPair::SegmentAndShape => (Tag::Segment, Tag::SegmentCollidable),
            TagPair::PointAndMovingShape => (Tag::MovablePoint, Tag::MovingShape),
        }
    }
}
