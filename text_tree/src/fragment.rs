// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use crate::element::{EmbeddedObject, TextElement};
use crate::property::PropertyMap;

/// Content removed from a tree, ready to be inserted again.
///
/// Returned by [`TextTree::delete_content`](crate::TextTree::delete_content)
/// and consumed by [`TextTree::insert_fragment`](crate::TextTree::insert_fragment).
/// A fragment is always well nested. It keeps element descriptors and their
/// property values, but not their ids: inserting it creates new elements.
#[derive(Clone, Debug, Default)]
pub struct Fragment {
    pub(crate) pieces: Vec<Piece>,
}

#[derive(Clone, Debug)]
pub(crate) enum Piece {
    Char(char),
    Start(TextElement, PropertyMap),
    End,
    Object(EmbeddedObject),
}

impl Fragment {
    /// Whether the fragment holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Number of symbols in the fragment.
    pub fn symbol_count(&self) -> usize {
        self.pieces.len()
    }

    /// Whether every element start has a matching end, properly nested.
    pub(crate) fn is_balanced(&self) -> bool {
        let mut depth = 0_usize;
        for piece in &self.pieces {
            match piece {
                Piece::Start(..) => depth += 1,
                Piece::End => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                Piece::Char(_) | Piece::Object(_) => {}
            }
        }
        depth == 0
    }

    /// The characters of the fragment, without any separators.
    pub fn chars(&self) -> String {
        self.pieces
            .iter()
            .filter_map(|piece| match piece {
                Piece::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Descriptors of the elements in the fragment, in document order.
    pub fn elements(&self) -> impl Iterator<Item = &TextElement> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Start(element, _) => Some(element),
            _ => None,
        })
    }

    /// Descriptors of the embedded objects in the fragment, in document order.
    pub fn objects(&self) -> impl Iterator<Item = &EmbeddedObject> + '_ {
        self.pieces.iter().filter_map(|piece| match piece {
            Piece::Object(object) => Some(object),
            _ => None,
        })
    }
}
