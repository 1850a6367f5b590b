// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::arena::Arena;
use crate::element::{ElementData, ElementId, EmbeddedObject, ObjectId, TreeId};
use crate::event::{ChangeKind, ListenerId, Listeners, TextChange};
use crate::position::{Position, PositionData};
use crate::property::PropertyMap;
use crate::storage::SymbolStorage;
use crate::symbol::{LogicalDirection, Symbol};
use crate::{Error, TextTreeConfig};

/// A mutable stream of characters, nested elements and embedded objects.
///
/// Content is addressed through [`Position`]s, stable handles to the gaps
/// between symbols. The tree relocates every live position on each
/// mutation, so positions are never invalidated by edits; only
/// [`discard_position`](Self::discard_position) ends their life.
///
/// ```
/// use text_tree::{LogicalDirection, TextElement, TextTree};
///
/// let mut tree = TextTree::new();
/// let start = tree.start();
/// tree.insert_text(start, "hello world").unwrap();
///
/// let from = tree.position_at_offset(6, LogicalDirection::Backward).unwrap();
/// let to = tree.position_at_offset(11, LogicalDirection::Forward).unwrap();
/// tree.insert_element(from, to, TextElement::inline("Bold")).unwrap();
///
/// // The element added two boundary symbols around "world".
/// assert_eq!(tree.symbol_count(), 13);
/// assert_eq!(tree.offset_of(to).unwrap(), 13);
/// assert_eq!(tree.text(), "hello world");
/// ```
#[derive(Debug)]
pub struct TextTree {
    id: TreeId,
    config: TextTreeConfig,
    pub(crate) storage: SymbolStorage,
    pub(crate) elements: Arena<ElementData>,
    pub(crate) objects: Arena<EmbeddedObject>,
    pub(crate) positions: Arena<PositionData>,
    pub(crate) root_properties: PropertyMap,
    revision: u64,
    listeners: Listeners<TextChange>,
    start: Position,
    end: Position,
}

impl Default for TextTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTree {
    /// Creates an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TextTreeConfig::default())
    }

    /// Creates an empty tree.
    pub fn with_config(config: TextTreeConfig) -> Self {
        let id = TreeId::next();
        let mut positions = Arena::default();
        let (start_index, start_generation) =
            positions.insert(PositionData::pinned(0, LogicalDirection::Backward));
        let (end_index, end_generation) =
            positions.insert(PositionData::pinned(0, LogicalDirection::Forward));
        Self {
            id,
            storage: SymbolStorage::new(config.block_capacity()),
            config,
            elements: Arena::default(),
            objects: Arena::default(),
            positions,
            root_properties: PropertyMap::default(),
            revision: 0,
            listeners: Listeners::default(),
            start: Position {
                tree: id,
                index: start_index,
                generation: start_generation,
            },
            end: Position {
                tree: id,
                index: end_index,
                generation: end_generation,
            },
        }
    }

    /// The identity of this tree.
    pub fn id(&self) -> TreeId {
        self.id
    }

    /// The configuration the tree was created with.
    pub fn config(&self) -> &TextTreeConfig {
        &self.config
    }

    /// Number of symbols in the tree.
    pub fn symbol_count(&self) -> usize {
        self.storage.len()
    }

    /// Whether the tree holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Counter bumped by every change to content, structure or properties.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The permanent position at the start of the tree.
    ///
    /// It has backward gravity, so it stays in front of anything inserted there.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The permanent position at the end of the tree.
    ///
    /// It has forward gravity, so it stays behind anything inserted there.
    pub fn end(&self) -> Position {
        self.end
    }

    /// The text of the whole tree.
    ///
    /// Closed block elements contribute the configured paragraph separator.
    pub fn text(&self) -> String {
        self.text_between(0, self.storage.len())
    }

    /// Registers a callback invoked once for every change to the tree.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&TextChange) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(crate) fn data(&self, position: Position) -> Result<&PositionData, Error> {
        if position.tree != self.id {
            return Err(Error::invalid_position(self.storage.len()));
        }
        self.positions
            .get(position.index, position.generation)
            .ok_or_else(|| Error::invalid_position(self.storage.len()))
    }

    /// Mutable access to a position that the caller may move.
    pub(crate) fn data_mut(&mut self, position: Position) -> Result<&mut PositionData, Error> {
        let len = self.storage.len();
        if position.tree != self.id {
            return Err(Error::invalid_position(len));
        }
        match self.positions.get_mut(position.index, position.generation) {
            Some(data) if !data.pinned => Ok(data),
            Some(data) => Err(Error::invalid_position_at(data.offset, len)),
            None => Err(Error::invalid_position(len)),
        }
    }

    pub(crate) fn gap(&self, position: Position) -> Result<usize, Error> {
        self.data(position).map(|data| data.offset)
    }

    pub(crate) fn new_position(&mut self, offset: usize, gravity: LogicalDirection) -> Position {
        let (index, generation) = self.positions.insert(PositionData::new(offset, gravity));
        Position {
            tree: self.id,
            index,
            generation,
        }
    }

    pub(crate) fn element_handle(&self, index: u32) -> ElementId {
        ElementId {
            tree: self.id,
            index,
            generation: self.elements.generation(index),
        }
    }

    pub(crate) fn object_handle(&self, index: u32) -> ObjectId {
        ObjectId {
            tree: self.id,
            index,
            generation: self.objects.generation(index),
        }
    }

    pub(crate) fn element_data(&self, element: ElementId) -> Result<&ElementData, Error> {
        if element.tree != self.id {
            return Err(Error::unknown_element(self.storage.len()));
        }
        self.elements
            .get(element.index, element.generation)
            .ok_or_else(|| Error::unknown_element(self.storage.len()))
    }

    pub(crate) fn element_data_mut(&mut self, element: ElementId) -> Result<&mut ElementData, Error> {
        let len = self.storage.len();
        if element.tree != self.id {
            return Err(Error::unknown_element(len));
        }
        self.elements
            .get_mut(element.index, element.generation)
            .ok_or_else(|| Error::unknown_element(len))
    }

    /// The symbol next to `gap` in `direction`.
    pub(crate) fn symbol_at(&self, gap: usize, direction: LogicalDirection) -> Option<Symbol> {
        match direction {
            LogicalDirection::Forward => self.storage.get(gap),
            LogicalDirection::Backward => gap.checked_sub(1).and_then(|i| self.storage.get(i)),
        }
    }

    /// Innermost element whose content contains `gap`.
    pub(crate) fn scope_index(&self, gap: usize) -> Option<u32> {
        self.elements
            .iter()
            .filter(|(_, data)| data.encloses_gap(gap))
            .max_by_key(|(_, data)| data.start)
            .map(|(index, _)| index)
    }

    /// The gaps delimiting the characters contiguous with `gap`.
    pub(crate) fn run_bounds(&self, gap: usize) -> (usize, usize) {
        let before = self
            .storage
            .iter_back(gap)
            .take_while(|symbol| matches!(symbol, Symbol::Char(_)))
            .count();
        let after = self
            .storage
            .iter_range(gap..self.storage.len())
            .take_while(|symbol| matches!(symbol, Symbol::Char(_)))
            .count();
        (gap - before, gap + after)
    }

    pub(crate) fn chars(&self, lo: usize, hi: usize) -> Vec<char> {
        self.storage
            .iter_range(lo..hi)
            .filter_map(Symbol::as_char)
            .collect()
    }

    /// Text of the symbols `[lo, hi)`.
    pub(crate) fn text_between(&self, lo: usize, hi: usize) -> String {
        let mut text = String::new();
        for symbol in self.storage.iter_range(lo..hi) {
            match symbol {
                Symbol::Char(c) => text.push(c),
                Symbol::ElementEnd(index) => {
                    if self
                        .elements
                        .by_index(index)
                        .is_some_and(|data| data.element.is_block())
                    {
                        text.push_str(self.config.paragraph_separator());
                    }
                }
                Symbol::Object(_) => {
                    if let Some(replacement) = self.config.object_replacement() {
                        text.push(replacement);
                    }
                }
                Symbol::ElementStart(_) => {}
            }
        }
        text
    }

    /// Checks that `[lo, hi)` holds only complete elements.
    ///
    /// Returns the offset of the first unbalanced boundary otherwise.
    pub(crate) fn unbalanced_at(&self, lo: usize, hi: usize) -> Option<usize> {
        let mut depth = 0_usize;
        let mut opened_at = Vec::new();
        for (i, symbol) in self.storage.iter_range(lo..hi).enumerate() {
            match symbol {
                Symbol::ElementStart(_) => {
                    depth += 1;
                    opened_at.push(lo + i);
                }
                Symbol::ElementEnd(_) => {
                    if depth == 0 {
                        return Some(lo + i);
                    }
                    depth -= 1;
                    opened_at.pop();
                }
                _ => {}
            }
        }
        opened_at.first().copied()
    }

    /// Moves positions and element boundaries after `count` symbols were inserted at `gap`.
    pub(crate) fn relocate_insert(&mut self, gap: usize, count: usize) {
        for (_, data) in self.positions.iter_mut() {
            data.relocate_insert(gap, count);
        }
        for (_, data) in self.elements.iter_mut() {
            data.relocate_insert(gap, count);
        }
        log::trace!("relocated for {count} symbols inserted at {gap}");
    }

    /// Moves positions and element boundaries after `[lo, hi)` was removed.
    pub(crate) fn relocate_remove(&mut self, lo: usize, hi: usize) {
        for (_, data) in self.positions.iter_mut() {
            data.relocate_remove(lo, hi);
        }
        for (_, data) in self.elements.iter_mut() {
            data.relocate_remove(lo, hi);
        }
        log::trace!("relocated for symbols {lo}..{hi} removed");
    }

    /// Rebuilds every element's parent link from boundary indices.
    pub(crate) fn recompute_parents(&mut self) {
        let mut order: Vec<(usize, usize, u32)> = self
            .elements
            .iter()
            .map(|(index, data)| (data.start, data.end, index))
            .collect();
        order.sort_unstable();
        let mut open: SmallVec<[(usize, u32); 16]> = SmallVec::new();
        for (start, end, index) in order {
            while open.last().is_some_and(|&(open_end, _)| open_end < start) {
                open.pop();
            }
            let parent = open.last().map(|&(_, parent)| parent);
            if let Some(data) = self.elements.by_index_mut(index) {
                data.parent = parent;
            }
            open.push((end, index));
        }
    }

    /// Bumps the revision and notifies listeners.
    pub(crate) fn commit(&mut self, kind: ChangeKind, offset: usize, removed: usize, added: usize) {
        self.revision += 1;
        let change = TextChange {
            revision: self.revision,
            kind,
            offset,
            removed,
            added,
        };
        log::debug!(
            "tree change {:?} at {offset}: -{removed} +{added} (revision {})",
            change.kind,
            self.revision
        );
        self.listeners.emit(&change);
    }
}
