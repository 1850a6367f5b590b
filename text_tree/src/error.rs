// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Rich error type for text tree operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the offending offset, when one
/// exists, and the symbol count of the tree at the time of failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The offset the caller asked for, when the failure concerns one.
    offset: Option<isize>,

    /// The number of symbols in the tree at the time of failure.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports tree length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The offset requested by the caller, if the error concerns one.
    ///
    /// For [`ErrorKind::OutOfRange`] this is the offset, relative to the
    /// start of the tree, that navigation would have reached.
    pub fn offset(&self) -> Option<isize> {
        self.offset
    }

    /// The number of symbols in the tree at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    fn new(kind: ErrorKind, len: usize) -> Self {
        Self {
            kind,
            offset: None,
            len,
        }
    }

    pub(crate) fn out_of_range(offset: isize, len: usize) -> Self {
        Self {
            kind: ErrorKind::OutOfRange,
            offset: Some(offset),
            len,
        }
    }

    pub(crate) fn invalid_range(start: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            offset: isize::try_from(start).ok(),
            len,
        }
    }

    pub(crate) fn invalid_position(len: usize) -> Self {
        Self::new(ErrorKind::InvalidPosition, len)
    }

    pub(crate) fn invalid_position_at(offset: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidPosition,
            offset: isize::try_from(offset).ok(),
            len,
        }
    }

    pub(crate) fn cross_container(len: usize) -> Self {
        Self::new(ErrorKind::CrossContainer, len)
    }

    pub(crate) fn cross_tree_comparison(len: usize) -> Self {
        Self::new(ErrorKind::CrossTreeComparison, len)
    }

    pub(crate) fn scope_violation(offset: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::ScopeViolation,
            offset: isize::try_from(offset).ok(),
            len,
        }
    }

    pub(crate) fn not_an_embedded_object(offset: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::NotAnEmbeddedObject,
            offset: isize::try_from(offset).ok(),
            len,
        }
    }

    pub(crate) fn unknown_element(len: usize) -> Self {
        Self::new(ErrorKind::UnknownElement, len)
    }

    pub(crate) fn stale_iterator(len: usize) -> Self {
        Self::new(ErrorKind::StaleIterator, len)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.kind, self.offset) {
            (ErrorKind::OutOfRange, Some(offset)) => write!(
                f,
                "offset {offset} out of bounds for tree of {} symbols",
                self.len
            ),
            (ErrorKind::OutOfRange, None) => write!(f, "navigation left the tree"),
            (ErrorKind::InvalidRange, Some(start)) => {
                write!(f, "range starting at {start} ends before it starts")
            }
            (ErrorKind::InvalidRange, None) => write!(f, "range ends before it starts"),
            (ErrorKind::InvalidPosition, Some(offset)) => {
                write!(f, "position at {offset} is not valid for this operation")
            }
            (ErrorKind::InvalidPosition, None) => {
                write!(f, "position was discarded or belongs to another tree")
            }
            (ErrorKind::CrossContainer, _) => {
                write!(f, "positions belong to different trees")
            }
            (ErrorKind::CrossTreeComparison, _) => {
                write!(f, "cannot compare positions from different trees")
            }
            (ErrorKind::ScopeViolation, Some(offset)) => write!(
                f,
                "operation at {offset} would break element nesting"
            ),
            (ErrorKind::ScopeViolation, None) => {
                write!(f, "operation would break element nesting")
            }
            (ErrorKind::NotAnEmbeddedObject, Some(offset)) => {
                write!(f, "no embedded object adjacent to offset {offset}")
            }
            (ErrorKind::NotAnEmbeddedObject, None) => write!(f, "not an embedded object"),
            (ErrorKind::UnknownElement, _) => {
                write!(f, "element was removed or belongs to another tree")
            }
            (ErrorKind::StaleIterator, _) => {
                write!(f, "tree changed since the iterator was created")
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Two operands that must share a tree (for example the ends of a
    /// [`TextRange`](crate::TextRange)) belong to different trees.
    CrossContainer,

    /// A distance or ordering was requested between positions of different trees.
    CrossTreeComparison,

    /// Navigation would move before the start or past the end of the tree.
    OutOfRange,

    /// The position was discarded, belongs to another tree, or does not
    /// satisfy the requirements of the operation.
    InvalidPosition,

    /// A start position lies after its end position.
    InvalidRange,

    /// The structural operation would produce badly nested elements.
    ScopeViolation,

    /// The adjacent symbol is not an embedded object.
    NotAnEmbeddedObject,

    /// The element was extracted, deleted, or belongs to another tree.
    UnknownElement,

    /// The tree was mutated after the iterator captured its revision.
    StaleIterator,
}
