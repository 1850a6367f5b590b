// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Tree is a mutable document model with stable positions.
//!
//! A [`TextTree`] holds a flat stream of symbols: characters, the start and
//! end boundaries of nested [elements](TextElement), and atomic
//! [embedded objects](EmbeddedObject). Client code addresses the stream
//! through [`Position`]s, handles to the gaps between symbols. Positions are
//! never invalidated by edits. The tree relocates them instead, using each
//! position's gravity to decide on which side of content inserted exactly at
//! its gap it ends up.
//!
//! - [`TextTree`] stores content, relocates positions and applies mutations,
//!   firing one [`TextChange`] per call.
//! - [`TextRange`] is a pair of positions with text access and its own
//!   change notification.
//! - [`Property`] values attach to elements and resolve through the element
//!   chain.
//!
//! ## Offsets
//!
//! Offsets count symbols, not bytes. Each character is one Unicode scalar
//! value; an element contributes two symbols and an embedded object one.
//!
//! ## Example
//!
//! ```
//! use text_tree::{LogicalDirection, TextTree};
//!
//! let mut tree = TextTree::new();
//! let start = tree.start();
//! tree.insert_text(start, "12").unwrap();
//!
//! // Two positions at the same gap, with opposite gravity.
//! let backward = tree.position_at_offset(1, LogicalDirection::Backward).unwrap();
//! let forward = tree.position_at_offset(1, LogicalDirection::Forward).unwrap();
//! tree.insert_text(backward, "-").unwrap();
//!
//! assert_eq!(tree.text(), "1-2");
//! assert_eq!(tree.offset_to_position(backward, forward).unwrap(), 1);
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables the `std` feature of `log`.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod arena;
mod children;
mod cluster;
mod config;
mod dump;
mod edit;
mod element;
mod error;
mod event;
mod fragment;
mod navigation;
mod position;
mod property;
mod range;
mod storage;
mod symbol;
mod tree;

pub use crate::children::{Children, ElementCursor};
pub use crate::config::{DEFAULT_BLOCK_CAPACITY, TextTreeConfig};
pub use crate::dump::{StorageStats, TreeDump};
pub use crate::element::{ElementId, EmbeddedObject, ObjectId, TextElement, TreeId};
pub use crate::error::{Error, ErrorKind};
pub use crate::event::{ChangeKind, ListenerId, TextChange};
pub use crate::fragment::Fragment;
pub use crate::position::Position;
pub use crate::property::{Property, PropertyValue};
pub use crate::range::{RangeChange, TextRange};
pub use crate::symbol::{ElementEdge, LogicalDirection, PointerContext};
pub use crate::tree::TextTree;
