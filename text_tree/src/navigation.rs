// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Creating, comparing and moving positions.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::cluster;
use crate::symbol::{ElementEdge, LogicalDirection, PointerContext, Symbol};
use crate::{ElementId, Error, ObjectId, Position, TextTree};

impl TextTree {
    /// Creates a position `offset` symbols from the start of the tree.
    pub fn position_at_offset(
        &mut self,
        offset: usize,
        gravity: LogicalDirection,
    ) -> Result<Position, Error> {
        let len = self.symbol_count();
        if offset > len {
            return Err(Error::out_of_range(
                isize::try_from(offset).unwrap_or(isize::MAX),
                len,
            ));
        }
        Ok(self.new_position(offset, gravity))
    }

    /// Creates a position `offset` symbols away from `from`.
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange) if
    /// the location would be outside the tree.
    pub fn create_position(
        &mut self,
        from: Position,
        offset: isize,
        gravity: LogicalDirection,
    ) -> Result<Position, Error> {
        let target = self.target(self.gap(from)?, offset)?;
        Ok(self.new_position(target, gravity))
    }

    /// Creates a position at one of the four gaps around an element's boundaries.
    pub fn element_position(
        &mut self,
        element: ElementId,
        edge: ElementEdge,
        gravity: LogicalDirection,
    ) -> Result<Position, Error> {
        let data = self.element_data(element)?;
        let gap = match edge {
            ElementEdge::BeforeStart => data.start,
            ElementEdge::AfterStart => data.start + 1,
            ElementEdge::BeforeEnd => data.end,
            ElementEdge::AfterEnd => data.end + 1,
        };
        Ok(self.new_position(gap, gravity))
    }

    /// Releases a position. The handle is invalid afterwards.
    ///
    /// The permanent [`start`](Self::start) and [`end`](Self::end) positions
    /// cannot be discarded.
    pub fn discard_position(&mut self, position: Position) -> Result<(), Error> {
        self.data_mut(position)?;
        self.positions.remove(position.index);
        Ok(())
    }

    /// Number of live positions, including the permanent start and end.
    pub fn live_positions(&self) -> usize {
        self.positions.len()
    }

    /// Whether `position` belongs to this tree and was not discarded.
    pub fn is_valid_position(&self, position: Position) -> bool {
        self.data(position).is_ok()
    }

    /// Whether `position` was created by this tree, discarded or not.
    pub fn owns_position(&self, position: Position) -> bool {
        position.tree == self.id()
    }

    /// Offset of `position` from the start of the tree.
    pub fn offset_of(&self, position: Position) -> Result<usize, Error> {
        self.gap(position)
    }

    /// Gravity of `position`.
    pub fn gravity(&self, position: Position) -> Result<LogicalDirection, Error> {
        self.data(position).map(|data| data.gravity)
    }

    /// Changes the gravity of `position`.
    pub fn set_gravity(
        &mut self,
        position: Position,
        gravity: LogicalDirection,
    ) -> Result<(), Error> {
        self.data_mut(position)?.gravity = gravity;
        Ok(())
    }

    /// Signed number of symbols from `from` to `to`.
    pub fn offset_to_position(&self, from: Position, to: Position) -> Result<isize, Error> {
        let (a, b) = self.comparable(from, to)?;
        Ok(signed(b) - signed(a))
    }

    /// Orders two positions by offset. Gravity does not take part.
    pub fn compare_positions(&self, a: Position, b: Position) -> Result<Ordering, Error> {
        let (a, b) = self.comparable(a, b)?;
        Ok(a.cmp(&b))
    }

    /// The earlier of two positions, `a` when they are at the same offset.
    pub fn min_position(&self, a: Position, b: Position) -> Result<Position, Error> {
        Ok(match self.compare_positions(a, b)? {
            Ordering::Greater => b,
            _ => a,
        })
    }

    /// The later of two positions, `a` when they are at the same offset.
    pub fn max_position(&self, a: Position, b: Position) -> Result<Position, Error> {
        Ok(match self.compare_positions(a, b)? {
            Ordering::Less => b,
            _ => a,
        })
    }

    /// Moves `position` over one symbol.
    ///
    /// Returns `false`, leaving the position unchanged, at the start or end
    /// of the tree.
    pub fn move_position(
        &mut self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<bool, Error> {
        let len = self.symbol_count();
        let data = self.data_mut(position)?;
        match direction {
            LogicalDirection::Forward if data.offset < len => data.offset += 1,
            LogicalDirection::Backward if data.offset > 0 => data.offset -= 1,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Moves `position` by a signed number of symbols.
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::ErrorKind::OutOfRange),
    /// without moving, if the target is outside the tree.
    pub fn move_by_distance(&mut self, position: Position, distance: isize) -> Result<(), Error> {
        let current = self.data_mut(position)?.offset;
        let target = self.target(current, distance)?;
        self.data_mut(position)?.offset = target;
        Ok(())
    }

    /// Moves `position` to the location of `target`, keeping its gravity.
    pub fn move_to_position(&mut self, position: Position, target: Position) -> Result<(), Error> {
        if position.tree != target.tree {
            return Err(Error::cross_container(self.symbol_count()));
        }
        let offset = self.gap(target)?;
        self.data_mut(position)?.offset = offset;
        Ok(())
    }

    /// Kind of the symbol next to `position` in `direction`.
    pub fn pointer_context(
        &self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<PointerContext, Error> {
        let gap = self.gap(position)?;
        Ok(self
            .symbol_at(gap, direction)
            .map_or(PointerContext::None, Symbol::context))
    }

    /// The element whose boundary is next to `position` in `direction`.
    pub fn adjacent_element(
        &self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<Option<ElementId>, Error> {
        let gap = self.gap(position)?;
        Ok(match self.symbol_at(gap, direction) {
            Some(Symbol::ElementStart(index) | Symbol::ElementEnd(index)) => {
                Some(self.element_handle(index))
            }
            _ => None,
        })
    }

    /// The embedded object next to `position` in `direction`.
    pub fn adjacent_object(
        &self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<Option<ObjectId>, Error> {
        let gap = self.gap(position)?;
        Ok(match self.symbol_at(gap, direction) {
            Some(Symbol::Object(index)) => Some(self.object_handle(index)),
            _ => None,
        })
    }

    /// The innermost element containing `position`, `None` at root scope.
    pub fn scope_of(&self, position: Position) -> Result<Option<ElementId>, Error> {
        let gap = self.gap(position)?;
        Ok(self.scope_index(gap).map(|index| self.element_handle(index)))
    }

    /// The characters next to `position` in `direction`, up to the first
    /// non-text symbol. Returned in document order.
    pub fn text_in_run(
        &self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<String, Error> {
        let gap = self.gap(position)?;
        let (lo, hi) = self.run_bounds(gap);
        Ok(match direction {
            LogicalDirection::Forward => self.chars(gap, hi).into_iter().collect(),
            LogicalDirection::Backward => self.chars(lo, gap).into_iter().collect(),
        })
    }

    /// Length of [`text_in_run`](Self::text_in_run) in characters.
    pub fn text_run_length(
        &self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<usize, Error> {
        let gap = self.gap(position)?;
        let (lo, hi) = self.run_bounds(gap);
        Ok(match direction {
            LogicalDirection::Forward => hi - gap,
            LogicalDirection::Backward => gap - lo,
        })
    }

    /// Whether `position` sits on a grapheme cluster boundary.
    ///
    /// A position between a base character and its combining marks, or
    /// between `\r` and `\n`, is not an insertion position.
    pub fn is_at_insertion_position(&self, position: Position) -> Result<bool, Error> {
        let gap = self.gap(position)?;
        Ok(self.is_cluster_boundary(gap))
    }

    /// Moves `position` to the next insertion position in `direction`.
    ///
    /// Text is crossed one grapheme cluster at a time, every other symbol
    /// one at a time. Returns `false` at the start or end of the tree.
    pub fn move_to_insertion_position(
        &mut self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<bool, Error> {
        let gap = self.data_mut(position)?.offset;
        let Some(target) = self.next_cluster_gap(gap, direction) else {
            return Ok(false);
        };
        self.data_mut(position)?.offset = target;
        Ok(true)
    }

    pub(crate) fn is_cluster_boundary(&self, gap: usize) -> bool {
        let (lo, bounds) = self.cluster_window(gap);
        bounds.contains(&(gap - lo))
    }

    /// Nearest cluster boundary at or beyond `gap` in `direction`.
    pub(crate) fn snap_to_cluster(&self, gap: usize, direction: LogicalDirection) -> usize {
        let (lo, bounds) = self.cluster_window(gap);
        lo + match direction {
            LogicalDirection::Forward => cluster::ceil(&bounds, gap - lo),
            LogicalDirection::Backward => cluster::floor(&bounds, gap - lo),
        }
    }

    fn next_cluster_gap(&self, gap: usize, direction: LogicalDirection) -> Option<usize> {
        match self.symbol_at(gap, direction)? {
            Symbol::Char(_) => {
                let (lo, bounds) = self.cluster_window(gap);
                let step = match direction {
                    LogicalDirection::Forward => cluster::after(&bounds, gap - lo),
                    LogicalDirection::Backward => cluster::before(&bounds, gap - lo),
                };
                step.map(|b| lo + b)
            }
            _ => Some(match direction {
                LogicalDirection::Forward => gap + 1,
                LogicalDirection::Backward => gap - 1,
            }),
        }
    }

    /// Cluster boundaries of the characters around `gap`.
    ///
    /// The window reaches back to the nearest safe boundary before `gap`
    /// (or the run start) and forward to the nearest one after it (or the
    /// run end). Both edges are real boundaries, so the returned ones,
    /// relative to the returned start, are exact and include a boundary on
    /// each side of `gap` whenever a character is adjacent.
    fn cluster_window(&self, gap: usize) -> (usize, Vec<usize>) {
        let mut before: Vec<char> = Vec::new();
        for symbol in self.storage.iter_back(gap) {
            let Symbol::Char(c) = symbol else {
                break;
            };
            if before.last().is_some_and(|&next| cluster::is_safe_break(c, next)) {
                break;
            }
            before.push(c);
        }
        let lo = gap - before.len();
        before.reverse();
        let mut window = before;
        let mut forward = 0;
        for symbol in self.storage.iter_range(gap..self.storage.len()) {
            let Symbol::Char(c) = symbol else {
                break;
            };
            if forward > 0 && window.last().is_some_and(|&prev| cluster::is_safe_break(prev, c)) {
                break;
            }
            window.push(c);
            forward += 1;
        }
        (lo, cluster::boundaries(&window))
    }

    /// Offsets of two positions known to share a tree.
    fn comparable(&self, a: Position, b: Position) -> Result<(usize, usize), Error> {
        if a.tree != b.tree {
            return Err(Error::cross_tree_comparison(self.symbol_count()));
        }
        Ok((self.gap(a)?, self.gap(b)?))
    }

    fn target(&self, gap: usize, distance: isize) -> Result<usize, Error> {
        let len = self.symbol_count();
        let Some(target) = signed(gap).checked_add(distance) else {
            return Err(Error::out_of_range(signed(gap).saturating_add(distance), len));
        };
        match usize::try_from(target) {
            Ok(offset) if offset <= len => Ok(offset),
            _ => Err(Error::out_of_range(target, len)),
        }
    }
}

fn signed(offset: usize) -> isize {
    isize::try_from(offset).unwrap_or(isize::MAX)
}
