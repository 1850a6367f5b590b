// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A direction along the symbol stream.
///
/// Doubles as the gravity of a [`Position`](crate::Position): a position with
/// `Backward` gravity stays before content inserted at its gap, one with
/// `Forward` gravity ends up after it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogicalDirection {
    /// Towards the start of the tree.
    Backward,
    /// Towards the end of the tree.
    #[default]
    Forward,
}

impl LogicalDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Backward => Self::Forward,
            Self::Forward => Self::Backward,
        }
    }
}

/// The kind of symbol adjacent to a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerContext {
    /// The position is at the start or end of the tree.
    None,
    /// A character.
    Text,
    /// The opening boundary of an element.
    ElementStart,
    /// The closing boundary of an element.
    ElementEnd,
    /// An embedded object.
    EmbeddedObject,
}

/// One of the four gaps around the boundaries of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementEdge {
    /// Just before the start boundary, in the parent scope.
    BeforeStart,
    /// Just after the start boundary, inside the element.
    AfterStart,
    /// Just before the end boundary, inside the element.
    BeforeEnd,
    /// Just after the end boundary, in the parent scope.
    AfterEnd,
}

/// One entry of the symbol stream.
///
/// Element and object symbols carry arena slot indices; generations are
/// checked through the arenas, never through the stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Symbol {
    Char(char),
    ElementStart(u32),
    ElementEnd(u32),
    Object(u32),
}

impl Symbol {
    pub(crate) fn context(self) -> PointerContext {
        match self {
            Self::Char(_) => PointerContext::Text,
            Self::ElementStart(_) => PointerContext::ElementStart,
            Self::ElementEnd(_) => PointerContext::ElementEnd,
            Self::Object(_) => PointerContext::EmbeddedObject,
        }
    }

    pub(crate) fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}
