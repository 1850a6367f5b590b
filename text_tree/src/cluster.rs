// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grapheme cluster boundaries within a text run.

use alloc::string::String;
use alloc::vec::Vec;

use icu_segmenter::GraphemeClusterSegmenter;

/// Character indices of the extended grapheme cluster boundaries of `run`.
///
/// Always contains `0` and `run.len()`.
pub(crate) fn boundaries(run: &[char]) -> Vec<usize> {
    let mut result = Vec::new();
    result.push(0);
    if run.is_empty() {
        return result;
    }
    let text: String = run.iter().collect();
    let mut chars = text.char_indices().map(|(byte, _)| byte).enumerate().peekable();
    for byte in GraphemeClusterSegmenter::new().segment_str(&text) {
        if byte == 0 {
            continue;
        }
        if byte >= text.len() {
            break;
        }
        while let Some((index, start)) = chars.peek().copied() {
            if start >= byte {
                if start == byte {
                    result.push(index);
                }
                break;
            }
            chars.next();
        }
    }
    result.push(run.len());
    result
}

/// Whether a cluster boundary between `prev` and `next` holds regardless of
/// the surrounding text.
///
/// `next` must be a character that never joins what precedes it (ASCII
/// other than a `\n` after `\r`, or a CJK ideograph) and `prev` must not be
/// a prepended concatenation mark. Segmenting from such a boundary gives the
/// same result as segmenting the whole run, which bounds the work done per
/// navigation step.
pub(crate) fn is_safe_break(prev: char, next: char) -> bool {
    let stands_alone = (next.is_ascii() && !(prev == '\r' && next == '\n'))
        || matches!(next, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}');
    stands_alone && !may_prepend(prev)
}

/// Conservative superset of `Grapheme_Cluster_Break=Prepend`.
fn may_prepend(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{0605}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{0890}'..='\u{0891}'
            | '\u{08E2}'
            | '\u{0D4E}'
            | '\u{110BD}'..
    )
}

/// The boundary at or before `index`.
pub(crate) fn floor(bounds: &[usize], index: usize) -> usize {
    bounds
        .iter()
        .rev()
        .copied()
        .find(|b| *b <= index)
        .unwrap_or(0)
}

/// The boundary at or after `index`.
pub(crate) fn ceil(bounds: &[usize], index: usize) -> usize {
    bounds
        .iter()
        .copied()
        .find(|b| *b >= index)
        .unwrap_or(index)
}

/// The boundary strictly after `index`.
pub(crate) fn after(bounds: &[usize], index: usize) -> Option<usize> {
    bounds.iter().copied().find(|b| *b > index)
}

/// The boundary strictly before `index`.
pub(crate) fn before(bounds: &[usize], index: usize) -> Option<usize> {
    bounds.iter().rev().copied().find(|b| *b < index)
}
