// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural inspection for tests and debugging.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::symbol::Symbol;
use crate::TextTree;

/// Storage layout figures of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StorageStats {
    /// Symbols in the tree.
    pub symbols: usize,
    /// Storage blocks in use.
    pub blocks: usize,
    /// Largest number of symbols held by one block.
    pub largest_block: usize,
    /// Configured block capacity.
    pub block_capacity: usize,
    /// Live elements.
    pub elements: usize,
    /// Live embedded objects.
    pub objects: usize,
    /// Live positions, the permanent start and end included.
    pub positions: usize,
}

/// Indented outline of a tree, one line per element, text run and object.
///
/// Created by [`TextTree::dump`].
///
/// ```
/// use text_tree::{TextElement, TextTree};
///
/// let mut tree = TextTree::new();
/// let paragraph = tree.append_child(None, TextElement::block("Paragraph")).unwrap();
/// tree.append_text(Some(paragraph), "hi").unwrap();
/// assert_eq!(
///     tree.dump().to_string(),
///     "root [4]\n  Paragraph #0 [4]\n    text \"hi\" [2]\n",
/// );
/// ```
#[derive(Debug)]
pub struct TreeDump<'a> {
    tree: &'a TextTree,
}

impl TextTree {
    /// An outline of the tree's structure.
    pub fn dump(&self) -> TreeDump<'_> {
        TreeDump { tree: self }
    }

    /// Storage layout figures.
    pub fn storage_stats(&self) -> StorageStats {
        StorageStats {
            symbols: self.storage.len(),
            blocks: self.storage.block_count(),
            largest_block: self.storage.block_lengths().max().unwrap_or(0),
            block_capacity: self.storage.capacity(),
            elements: self.elements.len(),
            objects: self.objects.len(),
            positions: self.positions.len(),
        }
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.tree;
        writeln!(f, "root [{}]", tree.symbol_count())?;
        let mut depth = 1;
        let mut run = String::new();
        let mut symbols: Vec<Symbol> = tree.storage.iter_range(0..tree.symbol_count()).collect();
        // Sentinel so the last run is flushed.
        symbols.push(Symbol::ElementEnd(u32::MAX));
        for symbol in symbols {
            if let Symbol::Char(c) = symbol {
                run.push(c);
                continue;
            }
            if !run.is_empty() {
                let count = run.chars().count();
                writeln!(f, "{:indent$}text {:?} [{count}]", "", run, indent = depth * 2)?;
                run.clear();
            }
            match symbol {
                Symbol::ElementStart(index) => {
                    if let Some(data) = tree.elements.by_index(index) {
                        writeln!(
                            f,
                            "{:indent$}{} #{index} [{}]",
                            "",
                            data.element.name(),
                            data.end - data.start + 1,
                            indent = depth * 2
                        )?;
                    }
                    depth += 1;
                }
                Symbol::ElementEnd(_) => depth = depth.saturating_sub(1).max(1),
                Symbol::Object(index) => {
                    let name = tree.objects.by_index(index).map_or("?", |o| o.name());
                    writeln!(f, "{:indent$}object {name} [1]", "", indent = depth * 2)?;
                }
                Symbol::Char(_) => {}
            }
        }
        Ok(())
    }
}
