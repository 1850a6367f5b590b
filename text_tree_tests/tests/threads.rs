// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing trees between threads.

use std::sync::{Arc, RwLock};
use std::thread;

use text_tree::LogicalDirection::{Backward, Forward};
use text_tree::{Error, Fragment, Property, PropertyValue, TextElement, TextRange, TextTree};

use crate::util::at;

const WEIGHT: Property = Property::inherited("Weight");

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn threads_tree_is_send_and_sync() {
    assert_send_sync::<TextTree>();
    assert_send_sync::<TextRange>();
    assert_send_sync::<Fragment>();
    assert_send_sync::<Error>();
}

#[test]
fn threads_concurrent_reads() {
    let mut tree = TextTree::new();
    let mut positions = Vec::new();
    for i in 0..8_i64 {
        let run = tree.append_child(None, TextElement::inline("Run")).unwrap();
        tree.append_text(Some(run), &format!("run {i}")).unwrap();
        tree.set_element_value(run, WEIGHT, i.into()).unwrap();
        let offset = tree.offset_of(tree.end()).unwrap() - 1;
        positions.push(at(&mut tree, offset, Backward));
    }

    let tree = &tree;
    thread::scope(|scope| {
        for (i, p) in positions.iter().enumerate() {
            scope.spawn(move || {
                for _ in 0..100 {
                    let text = tree.text_in_run(*p, Backward).unwrap();
                    assert_eq!(text, format!("run {i}"));
                    let weight = tree.get_value(*p, WEIGHT).unwrap();
                    let expected = PropertyValue::Integer(i64::try_from(i).unwrap());
                    assert_eq!(weight, Some(&expected));
                }
            });
        }
    });
}

#[test]
fn threads_writer_behind_lock() {
    let tree = Arc::new(RwLock::new(TextTree::new()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = tree.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    let mut tree = tree.write().unwrap();
                    let end = tree.end();
                    tree.insert_text(end, "ab").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut tree = tree.write().unwrap();
    assert_eq!(tree.symbol_count(), 200);
    assert_eq!(tree.revision(), 100);
    let p = at(&mut tree, 0, Forward);
    assert_eq!(tree.text_run_length(p, Forward).unwrap(), 200);
}
