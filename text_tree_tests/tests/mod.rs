// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `text_tree`.
//!
//! - The `util` module contains shared helpers for building trees.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the helpers can be shared.
//! - Put new tests into the module matching their topic (pointers, editing, ranges, ...).
//!   Name tests with the topic first, e.g. `range_set_text_notifies_once`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod children;
mod editing;
mod threads;
mod undo;
mod util;
