// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural mutations.
//!
//! Each public operation validates everything it needs before touching
//! storage, so a failed call leaves the tree unchanged, and a successful
//! one produces exactly one [`TextChange`](crate::TextChange).

use alloc::vec::Vec;

use crate::element::ElementData;
use crate::event::ChangeKind;
use crate::fragment::{Fragment, Piece};
use crate::property::PropertyMap;
use crate::symbol::{LogicalDirection, Symbol};
use crate::{ElementId, EmbeddedObject, Error, ObjectId, Position, TextElement, TextTree};

impl TextTree {
    /// Inserts `text` at `position`.
    ///
    /// Positions at the same gap with backward gravity end up before the new
    /// text, those with forward gravity after it. Inserting an empty string
    /// does nothing.
    pub fn insert_text(&mut self, position: Position, text: &str) -> Result<(), Error> {
        let gap = self.gap(position)?;
        self.insert_text_at(gap, text);
        Ok(())
    }

    /// Wraps the content between `start` and `end` in a new element.
    ///
    /// `start == end` creates an empty element. Fails with
    /// [`ErrorKind::InvalidRange`](crate::ErrorKind::InvalidRange) when
    /// `start` is after `end`, and with
    /// [`ErrorKind::ScopeViolation`](crate::ErrorKind::ScopeViolation) when
    /// the two positions are not in the same scope.
    pub fn insert_element(
        &mut self,
        start: Position,
        end: Position,
        element: TextElement,
    ) -> Result<ElementId, Error> {
        let lo = self.gap(start)?;
        let hi = self.gap(end)?;
        self.insert_element_at(lo, hi, element)
    }

    /// Removes an element's boundaries, keeping its content in place.
    ///
    /// Child elements move to the former parent. The element's property
    /// values are dropped and `element` becomes stale.
    pub fn extract_element(&mut self, element: ElementId) -> Result<TextElement, Error> {
        let data = self.element_data(element)?;
        let (start, end) = (data.start, data.end);
        let removed = self
            .elements
            .remove(element.index)
            .ok_or_else(|| Error::unknown_element(self.symbol_count()))?;
        self.storage.remove(end..end + 1);
        self.relocate_remove(end, end + 1);
        self.storage.remove(start..start + 1);
        self.relocate_remove(start, start + 1);
        self.recompute_parents();
        self.commit(ChangeKind::ElementExtracted(element), start, 2, 0);
        Ok(removed.element)
    }

    /// Extracts the innermost element containing `position`.
    ///
    /// Fails with [`ErrorKind::InvalidPosition`](crate::ErrorKind::InvalidPosition)
    /// at root scope.
    pub fn extract_element_at(&mut self, position: Position) -> Result<TextElement, Error> {
        let gap = self.gap(position)?;
        let index = self
            .scope_index(gap)
            .ok_or_else(|| Error::invalid_position_at(gap, self.symbol_count()))?;
        self.extract_element(self.element_handle(index))
    }

    /// Inserts an embedded object at `position`.
    pub fn insert_embedded_object(
        &mut self,
        position: Position,
        object: EmbeddedObject,
    ) -> Result<ObjectId, Error> {
        let gap = self.gap(position)?;
        let (index, _) = self.objects.insert(object);
        self.relocate_insert(gap, 1);
        self.storage.insert(gap, &[Symbol::Object(index)]);
        let id = self.object_handle(index);
        self.commit(ChangeKind::ObjectInserted(id), gap, 0, 1);
        Ok(id)
    }

    /// Deletes the embedded object next to `position` in `direction`.
    ///
    /// Fails with [`ErrorKind::NotAnEmbeddedObject`](crate::ErrorKind::NotAnEmbeddedObject)
    /// if the adjacent symbol is anything else.
    pub fn delete_embedded_object(
        &mut self,
        position: Position,
        direction: LogicalDirection,
    ) -> Result<EmbeddedObject, Error> {
        let gap = self.gap(position)?;
        let Some(Symbol::Object(index)) = self.symbol_at(gap, direction) else {
            return Err(Error::not_an_embedded_object(gap, self.symbol_count()));
        };
        let at = match direction {
            LogicalDirection::Forward => gap,
            LogicalDirection::Backward => gap - 1,
        };
        let id = self.object_handle(index);
        let object = self
            .objects
            .remove(index)
            .ok_or_else(|| Error::not_an_embedded_object(gap, self.symbol_count()))?;
        self.storage.remove(at..at + 1);
        self.relocate_remove(at, at + 1);
        self.commit(ChangeKind::ObjectDeleted(id), at, 1, 0);
        Ok(object)
    }

    /// Removes everything between `start` and `end`.
    ///
    /// Elements entirely inside the span are removed together with their
    /// content. Partially covered elements are never trimmed: the call fails
    /// with [`ErrorKind::ScopeViolation`](crate::ErrorKind::ScopeViolation).
    /// Positions inside the span collapse onto `start`. `start == end` does
    /// nothing.
    pub fn delete_content(&mut self, start: Position, end: Position) -> Result<Fragment, Error> {
        let lo = self.gap(start)?;
        let hi = self.gap(end)?;
        self.delete_range(lo, hi)
    }

    /// Replaces everything between `start` and `end` with `text`.
    ///
    /// Same rules as [`delete_content`](Self::delete_content) followed by
    /// [`insert_text`](Self::insert_text) at `start`, but applied as one
    /// change. Returns the removed content.
    pub fn replace_content(
        &mut self,
        start: Position,
        end: Position,
        text: &str,
    ) -> Result<Fragment, Error> {
        let lo = self.gap(start)?;
        let hi = self.gap(end)?;
        self.replace_range(lo, hi, text)
    }

    /// Inserts previously removed content at `position`.
    ///
    /// This is the inverse of [`delete_content`](Self::delete_content).
    /// Fresh element and object ids are allocated. A fragment whose element
    /// boundaries do not pair up fails with
    /// [`ErrorKind::ScopeViolation`](crate::ErrorKind::ScopeViolation).
    pub fn insert_fragment(&mut self, position: Position, fragment: &Fragment) -> Result<(), Error> {
        let gap = self.gap(position)?;
        if fragment.is_empty() {
            return Ok(());
        }
        if !fragment.is_balanced() {
            return Err(Error::scope_violation(gap, self.symbol_count()));
        }
        let count = fragment.symbol_count();
        self.relocate_insert(gap, count);
        let mut symbols = Vec::with_capacity(count);
        let mut open = Vec::new();
        for piece in &fragment.pieces {
            let at = gap + symbols.len();
            let symbol = match piece {
                Piece::Char(c) => Symbol::Char(*c),
                Piece::Start(element, properties) => {
                    let (index, _) = self.elements.insert(ElementData {
                        element: element.clone(),
                        start: at,
                        end: at,
                        parent: None,
                        properties: properties.clone(),
                    });
                    open.push(index);
                    Symbol::ElementStart(index)
                }
                Piece::End => {
                    // Balance was checked above.
                    let Some(index) = open.pop() else {
                        continue;
                    };
                    if let Some(data) = self.elements.by_index_mut(index) {
                        data.end = at;
                    }
                    Symbol::ElementEnd(index)
                }
                Piece::Object(object) => {
                    let (index, _) = self.objects.insert(object.clone());
                    Symbol::Object(index)
                }
            };
            symbols.push(symbol);
        }
        self.storage.insert(gap, &symbols);
        self.recompute_parents();
        self.commit(ChangeKind::FragmentInserted, gap, 0, count);
        Ok(())
    }

    /// Deletes up to `count` characters of the text run next to `position`.
    ///
    /// A positive count deletes forward, a negative one backward. Deletion
    /// stops at the end of the run. `position` must be at an insertion
    /// position, otherwise the call fails with
    /// [`ErrorKind::InvalidPosition`](crate::ErrorKind::InvalidPosition).
    /// Returns the number of characters removed.
    pub fn delete_text_in_run(&mut self, position: Position, count: isize) -> Result<usize, Error> {
        let gap = self.gap(position)?;
        if !self.is_cluster_boundary(gap) {
            return Err(Error::invalid_position_at(gap, self.symbol_count()));
        }
        let (lo, hi) = self.run_bounds(gap);
        let amount = count.unsigned_abs();
        let (a, b) = if count >= 0 {
            (gap, gap + amount.min(hi - gap))
        } else {
            (gap - amount.min(gap - lo), gap)
        };
        if a == b {
            return Ok(0);
        }
        self.storage.remove(a..b);
        self.relocate_remove(a, b);
        self.commit(ChangeKind::ContentDeleted, a, b - a, 0);
        Ok(b - a)
    }

    pub(crate) fn insert_text_at(&mut self, gap: usize, text: &str) {
        let symbols: Vec<Symbol> = text.chars().map(Symbol::Char).collect();
        if symbols.is_empty() {
            return;
        }
        let count = symbols.len();
        self.storage.insert(gap, &symbols);
        self.relocate_insert(gap, count);
        self.commit(ChangeKind::TextInserted, gap, 0, count);
    }

    pub(crate) fn insert_element_at(
        &mut self,
        lo: usize,
        hi: usize,
        element: TextElement,
    ) -> Result<ElementId, Error> {
        let len = self.symbol_count();
        if lo > hi {
            return Err(Error::invalid_range(lo, len));
        }
        if let Some(at) = self.unbalanced_at(lo, hi) {
            log::debug!("refusing element {:?} over {lo}..{hi}", element.name());
            return Err(Error::scope_violation(at, len));
        }
        // The end boundary goes in first so that positions at `lo` and `hi`
        // follow their own gravity independently.
        self.relocate_insert(hi, 1);
        self.relocate_insert(lo, 1);
        let (index, _) = self.elements.insert(ElementData {
            element,
            start: lo,
            end: hi + 1,
            parent: None,
            properties: PropertyMap::default(),
        });
        self.storage.insert(hi, &[Symbol::ElementEnd(index)]);
        self.storage.insert(lo, &[Symbol::ElementStart(index)]);
        self.recompute_parents();
        let id = self.element_handle(index);
        self.commit(ChangeKind::ElementInserted(id), lo, 0, 2);
        Ok(id)
    }

    pub(crate) fn delete_range(&mut self, lo: usize, hi: usize) -> Result<Fragment, Error> {
        self.validate_span(lo, hi)?;
        if lo == hi {
            return Ok(Fragment::default());
        }
        let fragment = self.remove_span(lo, hi);
        self.commit(ChangeKind::ContentDeleted, lo, hi - lo, 0);
        Ok(fragment)
    }

    pub(crate) fn replace_range(
        &mut self,
        lo: usize,
        hi: usize,
        text: &str,
    ) -> Result<Fragment, Error> {
        self.validate_span(lo, hi)?;
        let symbols: Vec<Symbol> = text.chars().map(Symbol::Char).collect();
        if lo == hi && symbols.is_empty() {
            return Ok(Fragment::default());
        }
        let fragment = self.remove_span(lo, hi);
        self.storage.insert(lo, &symbols);
        self.relocate_insert(lo, symbols.len());
        self.commit(ChangeKind::ContentReplaced, lo, hi - lo, symbols.len());
        Ok(fragment)
    }

    fn validate_span(&self, lo: usize, hi: usize) -> Result<(), Error> {
        let len = self.symbol_count();
        if lo > hi {
            return Err(Error::invalid_range(lo, len));
        }
        if let Some(at) = self.unbalanced_at(lo, hi) {
            log::debug!("refusing to remove {lo}..{hi}: partial element at {at}");
            return Err(Error::scope_violation(at, len));
        }
        Ok(())
    }

    /// Removes a validated span without notifying.
    fn remove_span(&mut self, lo: usize, hi: usize) -> Fragment {
        let removed = self.storage.remove(lo..hi);
        let mut fragment = Fragment::default();
        for symbol in removed {
            let piece = match symbol {
                Symbol::Char(c) => Piece::Char(c),
                Symbol::ElementStart(index) => {
                    let Some(data) = self.elements.remove(index) else {
                        continue;
                    };
                    Piece::Start(data.element, data.properties)
                }
                Symbol::ElementEnd(_) => Piece::End,
                Symbol::Object(index) => {
                    let Some(object) = self.objects.remove(index) else {
                        continue;
                    };
                    Piece::Object(object)
                }
            };
            fragment.pieces.push(piece);
        }
        self.relocate_remove(lo, hi);
        self.recompute_parents();
        fragment
    }
}
