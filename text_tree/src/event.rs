// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notification.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::element::{ElementId, ObjectId};
use crate::property::Property;

/// What a mutation did.
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeKind {
    /// Characters were inserted.
    TextInserted,
    /// A span of symbols was removed.
    ContentDeleted,
    /// A span of symbols was replaced by text.
    ContentReplaced,
    /// An element was wrapped around existing content.
    ElementInserted(ElementId),
    /// An element's boundaries were removed, keeping its content.
    ElementExtracted(ElementId),
    /// An embedded object was inserted.
    ObjectInserted(ObjectId),
    /// An embedded object was deleted.
    ObjectDeleted(ObjectId),
    /// Previously removed content was inserted again.
    FragmentInserted,
    /// A property value was set or cleared on an element, or on the root when `None`.
    PropertyChanged(Option<ElementId>, Property),
}

/// A single change notification.
///
/// Every mutating call that changes the tree produces exactly one.
#[derive(Clone, Debug, PartialEq)]
pub struct TextChange {
    /// The tree revision after the change.
    pub revision: u64,
    /// What happened.
    pub kind: ChangeKind,
    /// Offset of the first affected gap.
    pub offset: usize,
    /// Symbols removed at `offset`.
    pub removed: usize,
    /// Symbols added at `offset`.
    pub added: usize,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E) + Send + Sync>;

/// Subscribers to one kind of event.
pub(crate) struct Listeners<E> {
    next: u64,
    entries: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> core::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("next", &self.next)
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub(crate) fn subscribe(&mut self, callback: impl FnMut(&E) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}
