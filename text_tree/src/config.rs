// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Default number of symbols held by one storage block.
pub const DEFAULT_BLOCK_CAPACITY: usize = 4096;

/// Tunables for a [`TextTree`](crate::TextTree).
///
/// ```
/// use text_tree::{TextTree, TextTreeConfig};
///
/// let config = TextTreeConfig::default()
///     .with_paragraph_separator("\n")
///     .with_object_replacement(Some('\u{FFFC}'));
/// let tree = TextTree::with_config(config);
/// assert_eq!(tree.config().paragraph_separator(), "\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTreeConfig {
    block_capacity: usize,
    paragraph_separator: &'static str,
    object_replacement: Option<char>,
}

impl Default for TextTreeConfig {
    fn default() -> Self {
        Self {
            block_capacity: DEFAULT_BLOCK_CAPACITY,
            paragraph_separator: "\r\n",
            object_replacement: None,
        }
    }
}

impl TextTreeConfig {
    /// Sets the number of symbols per storage block.
    ///
    /// Values below 2 are raised to 2 so that a full block can always be split.
    #[must_use]
    pub fn with_block_capacity(mut self, capacity: usize) -> Self {
        self.block_capacity = capacity.max(2);
        self
    }

    /// Sets the text emitted after every closed block element when extracting text.
    #[must_use]
    pub fn with_paragraph_separator(mut self, separator: &'static str) -> Self {
        self.paragraph_separator = separator;
        self
    }

    /// Sets the character emitted for embedded objects when extracting text.
    ///
    /// `None` skips embedded objects entirely.
    #[must_use]
    pub fn with_object_replacement(mut self, replacement: Option<char>) -> Self {
        self.object_replacement = replacement;
        self
    }

    /// Number of symbols per storage block.
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Text emitted after every closed block element.
    pub fn paragraph_separator(&self) -> &'static str {
        self.paragraph_separator
    }

    /// Character emitted for embedded objects, if any.
    pub fn object_replacement(&self) -> Option<char> {
        self.object_replacement
    }
}
