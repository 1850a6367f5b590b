// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element collection API.

use text_tree::{ElementId, ErrorKind, TextElement, TextTree};

/// A section holding three paragraphs with one word each.
fn document() -> (TextTree, ElementId, Vec<ElementId>) {
    let mut tree = TextTree::new();
    let section = tree.append_child(None, TextElement::block("Section")).unwrap();
    let paragraphs = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(|word| {
            let paragraph = tree
                .append_child(Some(section), TextElement::block("Paragraph"))
                .unwrap();
            tree.append_text(Some(paragraph), word).unwrap();
            paragraph
        })
        .collect();
    (tree, section, paragraphs)
}

#[test]
fn children_in_document_order() {
    let (tree, section, paragraphs) = document();
    assert_eq!(tree.children(Some(section)).unwrap().collect::<Vec<_>>(), paragraphs);
    assert_eq!(tree.children(None).unwrap().collect::<Vec<_>>(), [section]);
    assert_eq!(tree.child_count(Some(section)).unwrap(), 3);
    assert_eq!(tree.first_child(Some(section)).unwrap(), Some(paragraphs[0]));
    assert_eq!(tree.last_child(Some(section)).unwrap(), Some(paragraphs[2]));
    assert_eq!(tree.children(Some(section)).unwrap().rev().next(), Some(paragraphs[2]));
    for paragraph in &paragraphs {
        assert_eq!(tree.parent(*paragraph).unwrap(), Some(section));
        assert!(tree.contains_child(Some(section), *paragraph).unwrap());
        assert!(!tree.contains_child(None, *paragraph).unwrap());
    }
    assert_eq!(tree.parent(section).unwrap(), None);
    assert_eq!(tree.element_text(paragraphs[1]).unwrap(), "beta");
    assert_eq!(tree.element_text(section).unwrap(), "alpha\r\nbeta\r\ngamma\r\n");
}

#[test]
fn children_insert_around_sibling() {
    let (mut tree, section, paragraphs) = document();
    let before = tree
        .insert_child_before(paragraphs[1], TextElement::block("Heading"))
        .unwrap();
    let after = tree
        .insert_child_after(paragraphs[1], TextElement::block("Note"))
        .unwrap();
    let names: Vec<_> = tree
        .children(Some(section))
        .unwrap()
        .map(|child| tree.element(child).unwrap().name().to_owned())
        .collect();
    assert_eq!(names, ["Paragraph", "Heading", "Paragraph", "Note", "Paragraph"]);
    assert_eq!(tree.parent(before).unwrap(), Some(section));
    assert_eq!(tree.parent(after).unwrap(), Some(section));
    assert_eq!(tree.element_symbol_count(before).unwrap(), 2);
}

#[test]
fn children_remove_and_clear() {
    let (mut tree, section, paragraphs) = document();
    assert!(!tree.remove_child(None, paragraphs[0]).unwrap());
    assert!(tree.remove_child(Some(section), paragraphs[0]).unwrap());
    assert!(!tree.contains_element(paragraphs[0]));
    assert_eq!(tree.child_count(Some(section)).unwrap(), 2);
    assert_eq!(tree.element_text(section).unwrap(), "beta\r\ngamma\r\n");

    let err = tree.parent(paragraphs[0]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownElement);
    let err = tree
        .insert_child_before(paragraphs[0], TextElement::block("Paragraph"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownElement);

    tree.clear_children(Some(section)).unwrap();
    assert_eq!(tree.child_count(Some(section)).unwrap(), 0);
    assert_eq!(tree.element_symbol_count(section).unwrap(), 2);
    assert!(!tree.contains_element(paragraphs[2]));
}

#[test]
fn children_extracted_element_promotes_children() {
    let (mut tree, section, paragraphs) = document();
    let removed = tree.extract_element(section).unwrap();
    assert_eq!(removed.name(), "Section");
    assert!(removed.is_block());
    assert_eq!(tree.children(None).unwrap().collect::<Vec<_>>(), paragraphs);
    assert_eq!(tree.parent(paragraphs[0]).unwrap(), None);
}

#[test]
fn children_handles_do_not_cross_trees() {
    let (tree, section, _) = document();
    let (other, _, _) = document();
    assert!(!other.contains_element(section));
    assert!(tree.contains_element(section));
    let err = other.children(Some(section)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownElement);
}

#[test]
fn children_cursor_detects_changes() {
    let (mut tree, section, paragraphs) = document();
    let mut cursor = tree.element_cursor(Some(section)).unwrap();
    assert_eq!(cursor.current(&tree).unwrap(), None);
    let mut seen = Vec::new();
    while cursor.move_next(&tree).unwrap() {
        seen.push(cursor.current(&tree).unwrap().unwrap());
    }
    assert_eq!(seen, paragraphs);
    assert_eq!(cursor.current(&tree).unwrap(), None);

    cursor.reset(&tree).unwrap();
    assert!(cursor.move_next(&tree).unwrap());
    assert_eq!(cursor.current(&tree).unwrap(), Some(paragraphs[0]));

    tree.append_text(Some(paragraphs[0]), "!").unwrap();
    assert_eq!(cursor.current(&tree).unwrap_err().kind(), ErrorKind::StaleIterator);
    assert_eq!(cursor.move_next(&tree).unwrap_err().kind(), ErrorKind::StaleIterator);
    assert_eq!(cursor.reset(&tree).unwrap_err().kind(), ErrorKind::StaleIterator);
}
