// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural mutations and their notifications.

use text_tree::LogicalDirection::{Backward, Forward};
use text_tree::{
    ChangeKind, EmbeddedObject, ErrorKind, PointerContext, TextElement, TextTree, TextTreeConfig,
};

use crate::util::{at, record, tree_with};

#[test]
fn editing_empty_element_distance() {
    let mut tree = tree_with("ab");
    let before = at(&mut tree, 1, Backward);
    let after = at(&mut tree, 1, Forward);
    assert_eq!(tree.offset_to_position(before, after).unwrap(), 0);

    let element = tree.insert_element(before, after, TextElement::inline("Span")).unwrap();
    assert_eq!(tree.offset_to_position(before, after).unwrap(), 2);
    assert_eq!(tree.adjacent_element(before, Forward).unwrap(), Some(element));
    assert_eq!(tree.adjacent_element(after, Backward).unwrap(), Some(element));

    tree.extract_element(element).unwrap();
    assert_eq!(tree.offset_to_position(before, after).unwrap(), 0);
    assert!(!tree.contains_element(element));
    assert_eq!(tree.text(), "ab");
}

#[test]
fn editing_wraps_existing_text() {
    let mut tree = tree_with("hello world");
    let lo = at(&mut tree, 6, Forward);
    let hi = at(&mut tree, 11, Backward);
    let element = tree.insert_element(lo, hi, TextElement::inline("Bold")).unwrap();

    assert_eq!(tree.symbol_count(), 13);
    assert_eq!(tree.element_text(element).unwrap(), "world");
    // Gravity keeps both positions inside the new element.
    assert_eq!(tree.scope_of(lo).unwrap(), Some(element));
    assert_eq!(tree.scope_of(hi).unwrap(), Some(element));
    assert_eq!(tree.text_in_run(lo, Forward).unwrap(), "world");
    assert_eq!(tree.pointer_context(hi, Forward).unwrap(), PointerContext::ElementEnd);
}

#[test]
fn editing_element_must_nest() {
    let mut tree = TextTree::new();
    let paragraph = tree.append_child(None, TextElement::block("Paragraph")).unwrap();
    tree.append_text(Some(paragraph), "abc").unwrap();
    tree.append_text(None, "def").unwrap();
    let revision = tree.revision();

    let inside = at(&mut tree, 2, Forward);
    let outside = at(&mut tree, 7, Forward);
    let err = tree
        .insert_element(inside, outside, TextElement::inline("Span"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScopeViolation);

    let err = tree
        .insert_element(outside, inside, TextElement::inline("Span"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
    assert_eq!(tree.revision(), revision);
    assert_eq!(tree.text(), "abc\r\ndef");
}

#[test]
fn editing_partial_delete_is_refused() {
    let mut tree = tree_with("ad");
    let lo = at(&mut tree, 1, Backward);
    let hi = at(&mut tree, 1, Forward);
    let element = tree.insert_element(lo, hi, TextElement::inline("P")).unwrap();
    tree.append_text(Some(element), "bc").unwrap();
    assert_eq!(tree.text(), "abcd");

    let start = tree.start();
    let middle = at(&mut tree, 3, Forward);
    let err = tree.delete_content(start, middle).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScopeViolation);
    assert_eq!(tree.symbol_count(), 6);

    let end = tree.end();
    let fragment = tree.delete_content(start, end).unwrap();
    assert_eq!(fragment.symbol_count(), 6);
    assert_eq!(fragment.chars(), "abcd");
    assert!(tree.is_empty());
    assert!(!tree.contains_element(element));
}

#[test]
fn editing_delete_collapses_positions() {
    let mut tree = tree_with("0123456789");
    let lo = at(&mut tree, 2, Forward);
    let inside = at(&mut tree, 5, Backward);
    let hi = at(&mut tree, 8, Backward);
    let after = at(&mut tree, 9, Forward);
    tree.delete_content(lo, hi).unwrap();

    assert_eq!(tree.text(), "0189");
    assert_eq!(tree.offset_of(inside).unwrap(), 2);
    assert_eq!(tree.offset_of(hi).unwrap(), 2);
    assert_eq!(tree.offset_of(after).unwrap(), 3);
}

#[test]
fn editing_embedded_objects() {
    let mut tree = tree_with("ab");
    let p = at(&mut tree, 1, Forward);
    let object = tree.insert_embedded_object(p, EmbeddedObject::new("Image")).unwrap();
    assert_eq!(tree.symbol_count(), 3);
    assert_eq!(tree.adjacent_object(p, Backward).unwrap(), Some(object));
    assert_eq!(tree.pointer_context(p, Backward).unwrap(), PointerContext::EmbeddedObject);

    let err = tree.delete_embedded_object(p, Forward).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotAnEmbeddedObject);

    let removed = tree.delete_embedded_object(p, Backward).unwrap();
    assert_eq!(removed.name(), "Image");
    assert_eq!(tree.text(), "ab");
    assert_eq!(tree.offset_of(p).unwrap(), 1);
}

#[test]
fn editing_object_replacement_in_text() {
    let config = TextTreeConfig::default().with_object_replacement(Some('\u{FFFC}'));
    let mut tree = TextTree::with_config(config);
    let end = tree.end();
    tree.insert_text(end, "a").unwrap();
    tree.insert_embedded_object(end, EmbeddedObject::new("Button")).unwrap();
    tree.insert_text(end, "b").unwrap();
    assert_eq!(tree.text(), "a\u{FFFC}b");
}

#[test]
fn editing_delete_text_in_run() {
    let mut tree = TextTree::new();
    let run = tree.append_child(None, TextElement::inline("Run")).unwrap();
    tree.append_text(Some(run), "abcdef").unwrap();
    let p = at(&mut tree, 3, Forward);

    assert_eq!(tree.delete_text_in_run(p, 100).unwrap(), 4);
    assert_eq!(tree.element_text(run).unwrap(), "ab");
    assert_eq!(tree.delete_text_in_run(p, -1).unwrap(), 1);
    assert_eq!(tree.element_text(run).unwrap(), "a");
    assert_eq!(tree.delete_text_in_run(p, 1).unwrap(), 0);
}

#[test]
fn editing_delete_text_in_run_needs_cluster_boundary() {
    let mut tree = tree_with("e\u{301}x");
    let p = at(&mut tree, 1, Forward);
    let err = tree.delete_text_in_run(p, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPosition);
    assert_eq!(tree.symbol_count(), 3);
}

#[test]
fn editing_one_notification_per_call() {
    let mut tree = TextTree::new();
    let changes = record(&mut tree);

    let end = tree.end();
    tree.insert_text(end, "abc").unwrap();
    tree.insert_text(end, "").unwrap();
    let start = tree.start();
    let element = tree.insert_element(start, end, TextElement::block("P")).unwrap();
    let p = at(&mut tree, 1, Forward);
    tree.insert_embedded_object(p, EmbeddedObject::new("Image")).unwrap();
    let q = at(&mut tree, 3, Forward);
    tree.delete_content(q, q).unwrap();
    tree.replace_content(p, q, "xy").unwrap();
    tree.extract_element(element).unwrap();

    let changes = changes.lock().unwrap();
    let kinds: Vec<_> = changes.iter().map(|c| c.kind.clone()).collect();
    assert!(matches!(
        kinds.as_slice(),
        [
            ChangeKind::TextInserted,
            ChangeKind::ElementInserted(_),
            ChangeKind::ObjectInserted(_),
            ChangeKind::ContentReplaced,
            ChangeKind::ElementExtracted(_),
        ]
    ));
    let revisions: Vec<_> = changes.iter().map(|c| c.revision).collect();
    assert_eq!(revisions, [1, 2, 3, 4, 5]);
    assert_eq!(tree.revision(), 5);

    let replaced = &changes[3];
    assert_eq!((replaced.offset, replaced.removed, replaced.added), (2, 1, 2));
    assert_eq!(tree.text(), "xybc");
}

#[test]
fn editing_unsubscribe_stops_notifications() {
    let mut tree = TextTree::new();
    let changes = record(&mut tree);
    let id = tree.subscribe(|_| {});
    assert!(tree.unsubscribe(id));
    assert!(!tree.unsubscribe(id));
    let end = tree.end();
    tree.insert_text(end, "a").unwrap();
    assert_eq!(changes.lock().unwrap().len(), 1);
}

#[test]
fn editing_large_insert_at_start() {
    let mut tree = TextTree::new();
    let start = tree.start();
    let end = tree.end();
    let tail = at(&mut tree, 0, Forward);
    for _ in 0..4096 {
        tree.insert_text(start, "abc").unwrap();
    }
    assert_eq!(tree.symbol_count(), 3 * 4096);
    assert_eq!(tree.offset_of(end).unwrap(), 3 * 4096);
    assert_eq!(tree.offset_of(tail).unwrap(), 3 * 4096);

    let stats = tree.storage_stats();
    assert!(stats.blocks > 1);
    assert!(stats.largest_block <= stats.block_capacity);

    let probe = at(&mut tree, 4096, Forward);
    assert_eq!(tree.text_run_length(probe, Forward).unwrap(), 2 * 4096);
    assert_eq!(tree.text().len(), 3 * 4096);
    assert!(tree.text().starts_with("abcabc"));
}

#[test]
fn editing_small_blocks_keep_content() {
    let config = TextTreeConfig::default().with_block_capacity(4);
    let mut tree = TextTree::with_config(config);
    let end = tree.end();
    tree.insert_text(end, "the quick brown fox").unwrap();
    let lo = at(&mut tree, 4, Forward);
    let hi = at(&mut tree, 10, Forward);
    tree.delete_content(lo, hi).unwrap();
    assert_eq!(tree.text(), "the brown fox");
    let stats = tree.storage_stats();
    assert!(stats.largest_block <= 4);
    assert_eq!(stats.symbols, 13);
}
