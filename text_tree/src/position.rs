// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::element::TreeId;
use crate::symbol::LogicalDirection;

/// A stable location between two symbols of a [`TextTree`](crate::TextTree).
///
/// A `Position` is a handle: the tree stores its offset and gravity and
/// relocates it on every mutation, so it never becomes invalid until it is
/// discarded. Equality compares handle identity. Use
/// [`TextTree::compare_positions`](crate::TextTree::compare_positions) to
/// compare locations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) tree: TreeId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl Position {
    /// The identity of the tree this position belongs to.
    pub fn tree_id(self) -> TreeId {
        self.tree
    }
}

/// Tree-side state of a [`Position`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct PositionData {
    pub(crate) offset: usize,
    pub(crate) gravity: LogicalDirection,
    /// The tree start and end positions can never move.
    pub(crate) pinned: bool,
}

impl PositionData {
    pub(crate) fn new(offset: usize, gravity: LogicalDirection) -> Self {
        Self {
            offset,
            gravity,
            pinned: false,
        }
    }

    pub(crate) fn pinned(offset: usize, gravity: LogicalDirection) -> Self {
        Self {
            offset,
            gravity,
            pinned: true,
        }
    }

    /// Adjusts for `count` symbols inserted at gap `gap`.
    pub(crate) fn relocate_insert(&mut self, gap: usize, count: usize) {
        if self.offset > gap || (self.offset == gap && self.gravity == LogicalDirection::Forward)
        {
            self.offset += count;
        }
    }

    /// Adjusts for the symbols `[lo, hi)` being removed.
    ///
    /// Positions inside the removed span collapse onto `lo`.
    pub(crate) fn relocate_remove(&mut self, lo: usize, hi: usize) {
        if self.offset >= hi {
            self.offset -= hi - lo;
        } else if self.offset > lo {
            self.offset = lo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PositionData;
    use crate::LogicalDirection::{Backward, Forward};

    #[test]
    fn gravity_decides_ties() {
        let mut backward = PositionData::new(3, Backward);
        let mut forward = PositionData::new(3, Forward);
        backward.relocate_insert(3, 2);
        forward.relocate_insert(3, 2);
        assert_eq!(backward.offset, 3);
        assert_eq!(forward.offset, 5);
    }

    #[test]
    fn insertion_before_shifts_both() {
        let mut backward = PositionData::new(3, Backward);
        backward.relocate_insert(1, 4);
        assert_eq!(backward.offset, 7);
        let mut after = PositionData::new(3, Forward);
        after.relocate_insert(5, 4);
        assert_eq!(after.offset, 3);
    }

    #[test]
    fn removal_collapses_inside() {
        let mut inside = PositionData::new(4, Forward);
        let mut at_end = PositionData::new(6, Backward);
        let mut beyond = PositionData::new(9, Backward);
        let mut at_start = PositionData::new(2, Forward);
        for p in [&mut inside, &mut at_end, &mut beyond, &mut at_start] {
            p.relocate_remove(2, 6);
        }
        assert_eq!(inside.offset, 2);
        assert_eq!(at_end.offset, 2);
        assert_eq!(beyond.offset, 5);
        assert_eq!(at_start.offset, 2);
    }
}
