// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::event::{ListenerId, Listeners};
use crate::symbol::{LogicalDirection, Symbol};
use crate::{Error, Position, Property, PropertyValue, TextTree};

/// A span of a [`TextTree`] between two positions.
///
/// The range owns two positions in the tree. Its start has backward gravity
/// and its end forward gravity, so text inserted at either edge, or into an
/// empty range, becomes part of the range.
///
/// Construction orders the two positions and widens the span so that it
/// never splits a grapheme cluster, a `\r\n` pair included.
///
/// ```
/// use text_tree::{LogicalDirection, TextRange, TextTree};
///
/// let mut tree = TextTree::new();
/// let start = tree.start();
/// tree.insert_text(start, "abcd").unwrap();
///
/// let (start, end) = (tree.start(), tree.end());
/// let mut range = TextRange::new(&mut tree, end, start).unwrap();
/// assert_eq!(range.text(&tree).unwrap(), "abcd");
///
/// range.set_text(&mut tree, "xyz").unwrap();
/// assert_eq!(tree.text(), "xyz");
/// assert_eq!(range.text(&tree).unwrap(), "xyz");
/// range.release(&mut tree).unwrap();
/// ```
#[derive(Debug)]
pub struct TextRange {
    start: Position,
    end: Position,
    listeners: Listeners<RangeChange>,
}

/// Notification sent to range subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RangeChange {
    /// Offset of the range start after the change.
    pub start: usize,
    /// Offset of the range end after the change.
    pub end: usize,
}

impl TextRange {
    /// Creates a range between `p1` and `p2`, in either order.
    ///
    /// Fails with [`ErrorKind::CrossContainer`](crate::ErrorKind::CrossContainer)
    /// if the positions do not both belong to `tree`.
    pub fn new(tree: &mut TextTree, p1: Position, p2: Position) -> Result<Self, Error> {
        let (lo, hi) = normalize(tree, p1, p2)?;
        Ok(Self {
            start: tree.new_position(lo, LogicalDirection::Backward),
            end: tree.new_position(hi, LogicalDirection::Forward),
            listeners: Listeners::default(),
        })
    }

    /// The position at the start of the range.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The position at the end of the range.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Offset of the start of the range.
    pub fn start_offset(&self, tree: &TextTree) -> Result<usize, Error> {
        tree.offset_of(self.start)
    }

    /// Offset of the end of the range.
    pub fn end_offset(&self, tree: &TextTree) -> Result<usize, Error> {
        tree.offset_of(self.end)
    }

    /// Whether start and end are at the same offset.
    pub fn is_empty(&self, tree: &TextTree) -> Result<bool, Error> {
        let (lo, hi) = self.bounds(tree)?;
        Ok(lo == hi)
    }

    /// Whether `position` lies between start and end, both included.
    ///
    /// Gravity plays no part.
    pub fn contains(&self, tree: &TextTree, position: Position) -> Result<bool, Error> {
        if position.tree != self.start.tree {
            return Err(Error::cross_container(tree.symbol_count()));
        }
        let (lo, hi) = self.bounds(tree)?;
        let gap = tree.offset_of(position)?;
        Ok(lo <= gap && gap <= hi)
    }

    /// The text covered by the range.
    ///
    /// Every block element that closes inside the range adds the configured
    /// paragraph separator.
    pub fn text(&self, tree: &TextTree) -> Result<String, Error> {
        let (lo, hi) = self.bounds(tree)?;
        Ok(tree.text_between(lo, hi))
    }

    /// Replaces the content of the range with `text`.
    ///
    /// Subscribers are notified once. Setting empty text on an empty range
    /// changes nothing and notifies nobody.
    pub fn set_text(&mut self, tree: &mut TextTree, text: &str) -> Result<(), Error> {
        let (lo, hi) = self.bounds(tree)?;
        if lo == hi && text.is_empty() {
            return Ok(());
        }
        tree.replace_range(lo, hi, text)?;
        self.notify(tree)
    }

    /// Moves the range to span `p1` and `p2`, with the same normalization as
    /// [`new`](Self::new).
    ///
    /// Subscribers are notified only if an edge moved.
    pub fn select(&mut self, tree: &mut TextTree, p1: Position, p2: Position) -> Result<(), Error> {
        let (lo, hi) = normalize(tree, p1, p2)?;
        if self.bounds(tree)? == (lo, hi) {
            return Ok(());
        }
        tree.data_mut(self.start)?.offset = lo;
        tree.data_mut(self.end)?.offset = hi;
        self.notify(tree)
    }

    /// Sets `property` on every element lying entirely inside the range.
    ///
    /// Returns how many elements changed. Subscribers are notified when at
    /// least one did.
    pub fn apply_property_value(
        &mut self,
        tree: &mut TextTree,
        property: Property,
        value: &PropertyValue,
    ) -> Result<usize, Error> {
        let (lo, hi) = self.bounds(tree)?;
        let covered: alloc::vec::Vec<_> = tree
            .elements
            .iter()
            .filter(|(_, data)| data.start >= lo && data.end < hi)
            .map(|(index, _)| tree.element_handle(index))
            .collect();
        let mut changed = 0;
        for element in covered {
            let before = tree.revision();
            tree.set_element_value(element, property, value.clone())?;
            if tree.revision() != before {
                changed += 1;
            }
        }
        if changed > 0 {
            self.notify(tree)?;
        }
        Ok(changed)
    }

    /// The value of `property` if it resolves the same for all text in the
    /// range, `None` when it is mixed or unset.
    ///
    /// An empty range reports the value at its position.
    pub fn property_value(
        &self,
        tree: &TextTree,
        property: Property,
    ) -> Result<Option<PropertyValue>, Error> {
        let (lo, hi) = self.bounds(tree)?;
        if lo == hi {
            return Ok(tree.get_value(self.start, property)?.cloned());
        }
        let mut uniform: Option<Option<&PropertyValue>> = None;
        for (i, symbol) in tree.storage.iter_range(lo..hi).enumerate() {
            if !matches!(symbol, Symbol::Char(_)) {
                continue;
            }
            // The gap after a character shares its scope.
            let value = tree.value_at_gap(lo + i + 1, property);
            match uniform {
                None => uniform = Some(value),
                Some(seen) if seen == value => {}
                Some(_) => return Ok(None),
            }
        }
        Ok(uniform.flatten().cloned())
    }

    /// Registers a callback invoked whenever the range changes.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RangeChange) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Discards the range's positions.
    pub fn release(self, tree: &mut TextTree) -> Result<(), Error> {
        tree.discard_position(self.start)?;
        tree.discard_position(self.end)
    }

    fn bounds(&self, tree: &TextTree) -> Result<(usize, usize), Error> {
        Ok((tree.offset_of(self.start)?, tree.offset_of(self.end)?))
    }

    fn notify(&mut self, tree: &TextTree) -> Result<(), Error> {
        let (start, end) = self.bounds(tree)?;
        self.listeners.emit(&RangeChange { start, end });
        Ok(())
    }
}

/// Orders two positions and widens them to cluster boundaries.
fn normalize(tree: &TextTree, p1: Position, p2: Position) -> Result<(usize, usize), Error> {
    if p1.tree != p2.tree || p1.tree != tree.id() {
        return Err(Error::cross_container(tree.symbol_count()));
    }
    let a = tree.offset_of(p1)?;
    let b = tree.offset_of(p2)?;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Ok((
        tree.snap_to_cluster(lo, LogicalDirection::Backward),
        tree.snap_to_cluster(hi, LogicalDirection::Forward),
    ))
}
