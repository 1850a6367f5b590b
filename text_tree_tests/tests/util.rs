// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::{Arc, Mutex};

use text_tree::{LogicalDirection, Position, TextChange, TextTree};

/// A tree holding `text` at root scope.
pub(crate) fn tree_with(text: &str) -> TextTree {
    let mut tree = TextTree::new();
    let start = tree.start();
    tree.insert_text(start, text).unwrap();
    tree
}

pub(crate) fn at(tree: &mut TextTree, offset: usize, gravity: LogicalDirection) -> Position {
    tree.position_at_offset(offset, gravity).unwrap()
}

/// Records every change notification of `tree`.
pub(crate) fn record(tree: &mut TextTree) -> Arc<Mutex<Vec<TextChange>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    tree.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    log
}
