// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replaying inverse operations restores the tree.

use text_tree::LogicalDirection::{Backward, Forward};
use text_tree::{
    ChangeKind, ElementEdge, ElementId, EmbeddedObject, Fragment, Position, TextElement, TextTree,
};

use crate::util::{at, record};

/// How to revert one recorded edit.
enum Undo {
    Inserted { offset: usize, count: usize },
    Deleted { offset: usize, fragment: Fragment },
    Wrapped(ElementId),
    Unwrapped { offset: usize, len: usize, element: TextElement },
}

impl Undo {
    fn apply(self, tree: &mut TextTree) {
        match self {
            Self::Inserted { offset, count } => {
                let lo = at(tree, offset, Backward);
                let hi = at(tree, offset + count, Forward);
                tree.delete_content(lo, hi).unwrap();
                discard(tree, [lo, hi]);
            }
            Self::Deleted { offset, fragment } => {
                let p = at(tree, offset, Backward);
                tree.insert_fragment(p, &fragment).unwrap();
                discard(tree, [p]);
            }
            Self::Wrapped(element) => {
                tree.extract_element(element).unwrap();
            }
            Self::Unwrapped { offset, len, element } => {
                let lo = at(tree, offset, Forward);
                let hi = at(tree, offset + len, Backward);
                tree.insert_element(lo, hi, element).unwrap();
                discard(tree, [lo, hi]);
            }
        }
    }
}

fn discard<const N: usize>(tree: &mut TextTree, positions: [Position; N]) {
    for p in positions {
        tree.discard_position(p).unwrap();
    }
}

/// Element names with their text, depth first, ids left out.
fn outline(tree: &TextTree, parent: Option<ElementId>, out: &mut Vec<String>) {
    for child in tree.children(parent).unwrap() {
        let name = tree.element(child).unwrap().name();
        out.push(format!("{name}: {:?}", tree.element_text(child).unwrap()));
        outline(tree, Some(child), out);
    }
}

fn snapshot(tree: &TextTree) -> (String, Vec<String>) {
    let mut elements = Vec::new();
    outline(tree, None, &mut elements);
    (tree.text(), elements)
}

fn document() -> TextTree {
    let mut tree = TextTree::new();
    for words in ["the quick", "brown fox"] {
        let paragraph = tree.append_child(None, TextElement::block("Paragraph")).unwrap();
        let run = tree.append_child(Some(paragraph), TextElement::inline("Run")).unwrap();
        tree.append_text(Some(run), words).unwrap();
    }
    tree
}

#[test]
fn undo_restores_every_step() {
    let mut tree = document();
    let changes = record(&mut tree);
    let len = tree.symbol_count();
    let anchor = at(&mut tree, len - 2, Forward);
    let anchor_offset = tree.offset_of(anchor).unwrap();

    let mut history: Vec<(Undo, (String, Vec<String>))> = Vec::new();

    // Text into the first run.
    let before = snapshot(&tree);
    let p = at(&mut tree, 5, Forward);
    tree.insert_text(p, " very").unwrap();
    let change = changes.lock().unwrap().last().cloned().unwrap();
    assert_eq!(change.kind, ChangeKind::TextInserted);
    history.push((
        Undo::Inserted {
            offset: change.offset,
            count: change.added,
        },
        before,
    ));

    // The whole first paragraph.
    let before = snapshot(&tree);
    let first = tree.first_child(None).unwrap().unwrap();
    let lo = tree
        .element_position(first, ElementEdge::BeforeStart, Backward)
        .unwrap();
    let hi = tree
        .element_position(first, ElementEdge::AfterEnd, Forward)
        .unwrap();
    let offset = tree.offset_of(lo).unwrap();
    let fragment = tree.delete_content(lo, hi).unwrap();
    assert_eq!(fragment.elements().count(), 2);
    history.push((Undo::Deleted { offset, fragment }, before));

    // A span around "fox".
    let before = snapshot(&tree);
    let lo = at(&mut tree, 8, Forward);
    let hi = at(&mut tree, 11, Backward);
    let span = tree.insert_element(lo, hi, TextElement::inline("Bold")).unwrap();
    assert_eq!(tree.element_text(span).unwrap(), "fox");
    history.push((Undo::Wrapped(span), before));

    // Unwrap the remaining paragraph.
    let before = snapshot(&tree);
    let paragraph = tree.first_child(None).unwrap().unwrap();
    let edge = tree
        .element_position(paragraph, ElementEdge::BeforeStart, Forward)
        .unwrap();
    let offset = tree.offset_of(edge).unwrap();
    let len = tree.element_symbol_count(paragraph).unwrap() - 2;
    let element = tree.extract_element(paragraph).unwrap();
    history.push((Undo::Unwrapped { offset, len, element }, before));

    assert_eq!(tree.text(), "brown fox");
    assert_eq!(changes.lock().unwrap().len(), 4);

    while let Some((undo, expected)) = history.pop() {
        undo.apply(&mut tree);
        assert_eq!(snapshot(&tree), expected);
    }
    assert_eq!(tree.text(), "the quick\r\nbrown fox\r\n");
    assert_eq!(tree.offset_of(anchor).unwrap(), anchor_offset);
    assert_eq!(changes.lock().unwrap().len(), 8);
}

#[test]
fn undo_fragment_keeps_objects() {
    let mut tree = TextTree::new();
    let end = tree.end();
    tree.insert_text(end, "a").unwrap();
    tree.insert_embedded_object(end, EmbeddedObject::new("Image")).unwrap();
    tree.insert_text(end, "b").unwrap();

    let start = tree.start();
    let fragment = tree.delete_content(start, end).unwrap();
    assert_eq!(fragment.objects().map(|o| o.name()).collect::<Vec<_>>(), ["Image"]);
    tree.insert_fragment(start, &fragment).unwrap();

    let p = at(&mut tree, 1, Forward);
    let object = tree.adjacent_object(p, Forward).unwrap();
    assert!(object.is_some());
    assert_eq!(tree.symbol_count(), 3);
    assert_eq!(tree.offset_of(end).unwrap(), 3);
}
