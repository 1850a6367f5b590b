// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element hierarchy queries and the child collection API.
//!
//! A parent of `None` means the root of the tree.

use alloc::string::String;
use alloc::vec::Vec;

use crate::element::TreeId;
use crate::{ElementId, Error, TextElement, TextTree};

/// Iterator over the direct child elements of a scope, in document order.
#[derive(Clone, Debug)]
pub struct Children {
    inner: alloc::vec::IntoIter<ElementId>,
}

impl Iterator for Children {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Children {
    fn next_back(&mut self) -> Option<ElementId> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Children {}

/// A child enumerator that detects changes to its tree.
///
/// Unlike [`Children`], the cursor does not borrow the tree. It records the
/// tree revision when created and every accessor fails with
/// [`ErrorKind::StaleIterator`](crate::ErrorKind::StaleIterator) once the
/// tree has changed since.
///
/// ```
/// use text_tree::{ErrorKind, TextElement, TextTree};
///
/// let mut tree = TextTree::new();
/// tree.append_child(None, TextElement::block("Paragraph")).unwrap();
/// let mut cursor = tree.element_cursor(None).unwrap();
/// assert!(cursor.move_next(&tree).unwrap());
///
/// tree.append_child(None, TextElement::block("Paragraph")).unwrap();
/// let err = cursor.move_next(&tree).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::StaleIterator);
/// ```
#[derive(Clone, Debug)]
pub struct ElementCursor {
    tree: TreeId,
    revision: u64,
    items: Vec<ElementId>,
    /// `None` before the first call to `move_next`.
    index: Option<usize>,
}

impl ElementCursor {
    /// Advances to the next child. Returns `false` past the last one.
    pub fn move_next(&mut self, tree: &TextTree) -> Result<bool, Error> {
        self.check(tree)?;
        let next = self.index.map_or(0, |i| i + 1).min(self.items.len());
        self.index = Some(next);
        Ok(next < self.items.len())
    }

    /// The child the cursor is on, `None` before the first or after the last one.
    pub fn current(&self, tree: &TextTree) -> Result<Option<ElementId>, Error> {
        self.check(tree)?;
        Ok(self.index.and_then(|i| self.items.get(i).copied()))
    }

    /// Moves back before the first child.
    pub fn reset(&mut self, tree: &TextTree) -> Result<(), Error> {
        self.check(tree)?;
        self.index = None;
        Ok(())
    }

    fn check(&self, tree: &TextTree) -> Result<(), Error> {
        if self.tree != tree.id() || self.revision != tree.revision() {
            return Err(Error::stale_iterator(tree.symbol_count()));
        }
        Ok(())
    }
}

impl TextTree {
    /// Whether `element` is currently part of this tree.
    pub fn contains_element(&self, element: ElementId) -> bool {
        self.element_data(element).is_ok()
    }

    /// The descriptor of `element`.
    pub fn element(&self, element: ElementId) -> Result<&TextElement, Error> {
        self.element_data(element).map(|data| &data.element)
    }

    /// The element enclosing `element`, `None` at root scope.
    pub fn parent(&self, element: ElementId) -> Result<Option<ElementId>, Error> {
        let parent = self.element_data(element)?.parent;
        Ok(parent.map(|index| self.element_handle(index)))
    }

    /// Symbols covered by `element`, both boundaries included.
    pub fn element_symbol_count(&self, element: ElementId) -> Result<usize, Error> {
        let data = self.element_data(element)?;
        Ok(data.end - data.start + 1)
    }

    /// The text inside `element`.
    pub fn element_text(&self, element: ElementId) -> Result<String, Error> {
        let data = self.element_data(element)?;
        Ok(self.text_between(data.start + 1, data.end))
    }

    /// The direct children of `parent`.
    pub fn children(&self, parent: Option<ElementId>) -> Result<Children, Error> {
        Ok(Children {
            inner: self.child_list(parent)?.into_iter(),
        })
    }

    /// A revision-checked enumerator over the direct children of `parent`.
    pub fn element_cursor(&self, parent: Option<ElementId>) -> Result<ElementCursor, Error> {
        Ok(ElementCursor {
            tree: self.id(),
            revision: self.revision(),
            items: self.child_list(parent)?,
            index: None,
        })
    }

    /// Number of direct children of `parent`.
    pub fn child_count(&self, parent: Option<ElementId>) -> Result<usize, Error> {
        Ok(self.child_list(parent)?.len())
    }

    /// The first child of `parent`.
    pub fn first_child(&self, parent: Option<ElementId>) -> Result<Option<ElementId>, Error> {
        Ok(self.child_list(parent)?.first().copied())
    }

    /// The last child of `parent`.
    pub fn last_child(&self, parent: Option<ElementId>) -> Result<Option<ElementId>, Error> {
        Ok(self.child_list(parent)?.last().copied())
    }

    /// Whether `child` is a direct child of `parent`.
    ///
    /// A stale or foreign `child` is simply not contained.
    pub fn contains_child(&self, parent: Option<ElementId>, child: ElementId) -> Result<bool, Error> {
        let parent_index = self.scope_handle(parent)?;
        Ok(self
            .element_data(child)
            .is_ok_and(|data| data.parent == parent_index))
    }

    /// Appends an empty element at the end of `parent`'s content.
    pub fn append_child(
        &mut self,
        parent: Option<ElementId>,
        element: TextElement,
    ) -> Result<ElementId, Error> {
        let (_, hi) = self.content_bounds(parent)?;
        self.insert_element_at(hi, hi, element)
    }

    /// Appends text at the end of `parent`'s content.
    pub fn append_text(&mut self, parent: Option<ElementId>, text: &str) -> Result<(), Error> {
        let (_, hi) = self.content_bounds(parent)?;
        self.insert_text_at(hi, text);
        Ok(())
    }

    /// Inserts an empty element just before `sibling`, in the same scope.
    pub fn insert_child_before(
        &mut self,
        sibling: ElementId,
        element: TextElement,
    ) -> Result<ElementId, Error> {
        let gap = self.element_data(sibling)?.start;
        self.insert_element_at(gap, gap, element)
    }

    /// Inserts an empty element just after `sibling`, in the same scope.
    pub fn insert_child_after(
        &mut self,
        sibling: ElementId,
        element: TextElement,
    ) -> Result<ElementId, Error> {
        let gap = self.element_data(sibling)?.end + 1;
        self.insert_element_at(gap, gap, element)
    }

    /// Removes `child` and its content from `parent`.
    ///
    /// Returns `false`, changing nothing, when `child` is not a direct child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: Option<ElementId>, child: ElementId) -> Result<bool, Error> {
        if !self.contains_child(parent, child)? {
            return Ok(false);
        }
        let data = self.element_data(child)?;
        let (lo, hi) = (data.start, data.end + 1);
        self.delete_range(lo, hi)?;
        Ok(true)
    }

    /// Removes all content of `parent`, children and text alike.
    pub fn clear_children(&mut self, parent: Option<ElementId>) -> Result<(), Error> {
        let (lo, hi) = self.content_bounds(parent)?;
        self.delete_range(lo, hi)?;
        Ok(())
    }

    /// The gaps at the start and end of `parent`'s content.
    fn content_bounds(&self, parent: Option<ElementId>) -> Result<(usize, usize), Error> {
        match parent {
            None => Ok((0, self.symbol_count())),
            Some(element) => {
                let data = self.element_data(element)?;
                Ok((data.start + 1, data.end))
            }
        }
    }

    /// Validates `parent` and returns its arena index.
    fn scope_handle(&self, parent: Option<ElementId>) -> Result<Option<u32>, Error> {
        match parent {
            None => Ok(None),
            Some(element) => self.element_data(element).map(|_| Some(element.index)),
        }
    }

    fn child_list(&self, parent: Option<ElementId>) -> Result<Vec<ElementId>, Error> {
        let parent_index = self.scope_handle(parent)?;
        let mut children: Vec<(usize, u32)> = self
            .elements
            .iter()
            .filter(|(_, data)| data.parent == parent_index)
            .map(|(index, data)| (data.start, index))
            .collect();
        children.sort_unstable();
        Ok(children
            .into_iter()
            .map(|(_, index)| self.element_handle(index))
            .collect())
    }
}
