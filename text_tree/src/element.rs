// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::property::PropertyMap;

/// Process-unique identity of a [`TextTree`](crate::TextTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable handle to an element of a tree.
///
/// Stays valid while the element is in the tree. After extraction or
/// deletion every accessor fails with
/// [`ErrorKind::UnknownElement`](crate::ErrorKind::UnknownElement).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) tree: TreeId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Stable handle to an embedded object of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub(crate) tree: TreeId,
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Describes an element to insert.
///
/// Block elements end a paragraph when text is extracted; inline elements
/// do not.
///
/// ```
/// use text_tree::TextElement;
///
/// let paragraph = TextElement::block("Paragraph");
/// assert!(paragraph.is_block());
/// assert_eq!(TextElement::inline("Run").name(), "Run");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextElement {
    name: Arc<str>,
    block: bool,
}

impl TextElement {
    /// An inline element such as a run or a hyperlink.
    pub fn inline(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            block: false,
        }
    }

    /// A block element such as a paragraph or a section.
    pub fn block(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            block: true,
        }
    }

    /// The element's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the element is block level.
    pub fn is_block(&self) -> bool {
        self.block
    }
}

/// Describes an embedded object, an atomic non-text symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmbeddedObject {
    name: Arc<str>,
}

impl EmbeddedObject {
    /// Creates a named object.
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
        }
    }

    /// The object's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Arena entry for an element that is part of the stream.
#[derive(Clone, Debug)]
pub(crate) struct ElementData {
    pub(crate) element: TextElement,
    /// Symbol index of the start boundary.
    pub(crate) start: usize,
    /// Symbol index of the end boundary.
    pub(crate) end: usize,
    pub(crate) parent: Option<u32>,
    pub(crate) properties: PropertyMap,
}

impl ElementData {
    /// Whether gap `gap` lies inside this element.
    pub(crate) fn encloses_gap(&self, gap: usize) -> bool {
        self.start < gap && gap <= self.end
    }

    pub(crate) fn relocate_insert(&mut self, gap: usize, count: usize) {
        if self.start >= gap {
            self.start += count;
        }
        if self.end >= gap {
            self.end += count;
        }
    }

    /// Shifts indices after removing the symbols at `[lo, hi)`.
    ///
    /// The removed span never contains exactly one of the boundaries.
    pub(crate) fn relocate_remove(&mut self, lo: usize, hi: usize) {
        let count = hi - lo;
        if self.start >= hi {
            self.start -= count;
        }
        if self.end >= hi {
            self.end -= count;
        }
    }
}
