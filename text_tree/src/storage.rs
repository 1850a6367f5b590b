// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Block storage for the symbol stream.

use alloc::vec::Vec;
use core::ops::Range;

use crate::symbol::Symbol;

/// The symbol stream, split into blocks of bounded size.
///
/// Inserting into a block that then exceeds the capacity splits it into
/// half-full blocks. Removing symbols drops emptied blocks and merges a
/// block into its successor when both fit into one.
#[derive(Clone, Debug)]
pub(crate) struct SymbolStorage {
    blocks: Vec<Vec<Symbol>>,
    len: usize,
    capacity: usize,
}

impl SymbolStorage {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            blocks: Vec::new(),
            len: 0,
            capacity: capacity.max(2),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn block_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().map(Vec::len)
    }

    /// Finds the block holding symbol `index` and the index within it.
    fn locate(&self, index: usize) -> Option<(usize, usize)> {
        let mut base = 0;
        for (i, block) in self.blocks.iter().enumerate() {
            if index < base + block.len() {
                return Some((i, index - base));
            }
            base += block.len();
        }
        None
    }

    /// Finds where a symbol inserted at gap `gap` lands.
    ///
    /// A gap between two blocks belongs to the end of the earlier block.
    fn locate_gap(&mut self, gap: usize) -> (usize, usize) {
        if self.blocks.is_empty() {
            self.blocks.push(Vec::new());
            return (0, 0);
        }
        let mut base = 0;
        for (i, block) in self.blocks.iter().enumerate() {
            if gap <= base + block.len() {
                return (i, gap - base);
            }
            base += block.len();
        }
        let last = self.blocks.len() - 1;
        (last, self.blocks[last].len())
    }

    pub(crate) fn get(&self, index: usize) -> Option<Symbol> {
        let (block, offset) = self.locate(index)?;
        Some(self.blocks[block][offset])
    }

    /// Iterates the symbols in `range`, clamped to the stream.
    pub(crate) fn iter_range(&self, range: Range<usize>) -> SymbolIter<'_> {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        let (block, offset) = self.locate(start).unwrap_or((self.blocks.len(), 0));
        SymbolIter {
            storage: self,
            block,
            offset,
            remaining: end - start,
        }
    }

    /// Iterates the symbols before gap `gap`, nearest first.
    pub(crate) fn iter_back(&self, gap: usize) -> SymbolRevIter<'_> {
        let gap = gap.min(self.len);
        let (block, offset) = match gap.checked_sub(1).and_then(|last| self.locate(last)) {
            Some((block, offset)) => (block, offset + 1),
            None => (0, 0),
        };
        SymbolRevIter {
            storage: self,
            block,
            offset,
        }
    }

    pub(crate) fn insert(&mut self, gap: usize, symbols: &[Symbol]) {
        if symbols.is_empty() {
            return;
        }
        let (block, offset) = self.locate_gap(gap);
        self.blocks[block].splice(offset..offset, symbols.iter().copied());
        self.len += symbols.len();
        if self.blocks[block].len() > self.capacity {
            self.split(block);
        }
    }

    fn split(&mut self, block: usize) {
        let half = (self.capacity / 2).max(1);
        let symbols = core::mem::take(&mut self.blocks[block]);
        let pieces: Vec<Vec<Symbol>> = symbols.chunks(half).map(<[Symbol]>::to_vec).collect();
        log::trace!("splitting storage block {block} into {} blocks", pieces.len());
        self.blocks.splice(block..=block, pieces);
    }

    /// Removes the symbols in `range` and returns them in order.
    pub(crate) fn remove(&mut self, range: Range<usize>) -> Vec<Symbol> {
        let end = range.end.min(self.len);
        let start = range.start.min(end);
        let mut removed = Vec::with_capacity(end - start);
        if start == end {
            return removed;
        }
        let mut base = 0;
        let mut first_touched = None;
        for (i, block) in self.blocks.iter_mut().enumerate() {
            let block_len = block.len();
            let lo = start.max(base);
            let hi = end.min(base + block_len);
            if lo < hi {
                first_touched.get_or_insert(i);
                removed.extend(block.drain(lo - base..hi - base));
            }
            base += block_len;
            if base >= end {
                break;
            }
        }
        self.len -= removed.len();
        self.blocks.retain(|block| !block.is_empty());
        if let Some(first) = first_touched {
            self.merge_around(first.min(self.blocks.len().saturating_sub(1)));
        }
        removed
    }

    fn merge_around(&mut self, block: usize) {
        let start = block.saturating_sub(1);
        let mut i = start;
        while i + 1 < self.blocks.len() && i <= block + 1 {
            if self.blocks[i].len() + self.blocks[i + 1].len() <= self.capacity / 2 {
                let next = self.blocks.remove(i + 1);
                self.blocks[i].extend(next);
                log::trace!("merged storage blocks {i} and {}", i + 1);
            } else {
                i += 1;
            }
        }
    }
}

/// Forward iterator over a slice of the symbol stream.
#[derive(Clone, Debug)]
pub(crate) struct SymbolIter<'a> {
    storage: &'a SymbolStorage,
    block: usize,
    offset: usize,
    remaining: usize,
}

impl Iterator for SymbolIter<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            let block = self.storage.blocks.get(self.block)?;
            if let Some(symbol) = block.get(self.offset) {
                self.offset += 1;
                self.remaining -= 1;
                return Some(*symbol);
            }
            self.block += 1;
            self.offset = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Backward iterator over the symbol stream, walking blocks in reverse.
#[derive(Clone, Debug)]
pub(crate) struct SymbolRevIter<'a> {
    storage: &'a SymbolStorage,
    block: usize,
    /// Symbols of `block` not yet yielded.
    offset: usize,
}

impl Iterator for SymbolRevIter<'_> {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        while self.offset == 0 {
            self.block = self.block.checked_sub(1)?;
            self.offset = self.storage.blocks.get(self.block)?.len();
        }
        self.offset -= 1;
        self.storage
            .blocks
            .get(self.block)
            .and_then(|block| block.get(self.offset))
            .copied()
    }
}
