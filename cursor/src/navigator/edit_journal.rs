// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structural edits made to a shared backing, kept for the tracking navigators that
//! have not seen them yet.
//!
//! ```text
//!  revision:   3    4    5    6        (base_revision = 3, edits.len() = 4)
//!            ┌────┬────┬────┬────┐
//!  edits:    │ e3 │ e4 │ e5 │ e6 │
//!            └────┴────┴────┴────┘
//!              ↑              ↑
//!          sub A seen=3   sub B seen=6
//!
//!  sub A drains e3..=e6 and moves to seen=7. Now every subscriber has seen
//!  e3..=e5 and sub B has seen e6 too, so all four are trimmed.
//! ```
//!
//! Nothing is kept while nobody subscribes, so an untracked backing only pays for a
//! counter increment per edit.

use super::DEBUG_NAVIGATOR_MOD;
use crate::NodeId;
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// One structural change to a shared backing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEdit {
    /// `count` items were inserted so that the first of them is at `index`.
    Inserted { index: usize, count: usize },

    /// The item at `index` was removed, leaving `len_after` items.
    Removed { index: usize, len_after: usize },

    /// `node` was spliced in right before `anchor`.
    LinkedInsertedBefore { anchor: NodeId, node: NodeId },

    /// `node` was spliced in right after `anchor`.
    LinkedInsertedAfter { anchor: NodeId, node: NodeId },

    /// `node` was unlinked. `successor` is where a point on it should snap to: the next
    /// node, or the previous one if `node` was the tail.
    LinkedRemoved {
        node: NodeId,
        successor: Option<NodeId>,
    },
}

#[derive(Debug, Default)]
struct JournalState {
    /// Revision of `edits[0]`.
    base_revision: u64,
    edits: VecDeque<StructuralEdit>,
    /// `(id, first revision not yet seen)` per live subscription.
    subscribers: Vec<(u64, u64)>,
    next_subscriber_id: u64,
}

impl JournalState {
    fn revision(&self) -> u64 { self.base_revision + self.edits.len() as u64 }

    /// Drop the edits every subscriber has already seen.
    fn trim(&mut self) {
        let oldest_unseen = self
            .subscribers
            .iter()
            .map(|&(_, seen)| seen)
            .min()
            .unwrap_or_else(|| self.revision());
        let mut trimmed = 0;
        while self.base_revision < oldest_unseen && self.edits.pop_front().is_some() {
            self.base_revision += 1;
            trimmed += 1;
        }
        if DEBUG_NAVIGATOR_MOD && trimmed > 0 {
            tracing::trace!(
                message = "EditJournal -> trim",
                trimmed = trimmed,
                retained = self.edits.len()
            );
        }
    }
}

/// Shared handle to the edit log of one backing. Cloning it clones the handle.
///
/// Edits are kept until the slowest subscriber drains them. A tracking navigator or a
/// [`Values`] / [`Nodes`] walk drains on every operation, but one that is kept alive
/// and never used again holds every later edit, so the log grows by one entry per
/// edit until it is dropped. [`EditJournal::retained`] shows the backlog.
///
/// [`Values`]: crate::Values
/// [`Nodes`]: crate::Nodes
#[derive(Debug, Clone, Default)]
pub struct EditJournal {
    state: Rc<RefCell<JournalState>>,
}

impl EditJournal {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of edits ever recorded.
    #[must_use]
    pub fn revision(&self) -> u64 { self.state.borrow().revision() }

    /// Number of edits currently retained for subscribers.
    #[must_use]
    pub fn retained(&self) -> usize { self.state.borrow().edits.len() }

    #[must_use]
    pub fn subscriber_count(&self) -> usize { self.state.borrow().subscribers.len() }

    pub fn record(&self, edit: StructuralEdit) {
        let mut state = self.state.borrow_mut();
        if state.subscribers.is_empty() {
            state.base_revision += 1;
            return;
        }
        state.edits.push_back(edit);
    }

    /// Start receiving the edits recorded from now on.
    #[must_use]
    pub fn subscribe(&self) -> JournalSubscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_subscriber_id;
        state.next_subscriber_id += 1;
        let seen = state.revision();
        state.subscribers.push((id, seen));
        JournalSubscription {
            journal: self.clone(),
            id,
        }
    }
}

/// A place in an [`EditJournal`]. Dropping it unsubscribes.
#[derive(Debug)]
pub struct JournalSubscription {
    journal: EditJournal,
    id: u64,
}

impl JournalSubscription {
    /// Take every edit recorded since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<StructuralEdit> {
        let mut state = self.journal.state.borrow_mut();
        let revision = state.revision();
        let base_revision = state.base_revision;
        let Some(seen) = state
            .subscribers
            .iter_mut()
            .find(|(id, _)| *id == self.id)
            .map(|(_, seen)| std::mem::replace(seen, revision))
        else {
            return Vec::new();
        };
        let skip = usize::try_from(seen.saturating_sub(base_revision)).unwrap_or(usize::MAX);
        let edits = state.edits.iter().skip(skip).copied().collect::<Vec<_>>();
        state.trim();
        edits
    }

    #[must_use]
    pub fn journal(&self) -> &EditJournal { &self.journal }
}

impl Drop for JournalSubscription {
    fn drop(&mut self) {
        let mut state = self.journal.state.borrow_mut();
        state.subscribers.retain(|(id, _)| *id != self.id);
        state.trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn inserted(index: usize) -> StructuralEdit { StructuralEdit::Inserted { index, count: 1 } }

    #[test]
    fn test_nothing_is_kept_without_subscribers() {
        let journal = EditJournal::new();
        journal.record(inserted(0));
        journal.record(inserted(1));
        assert_eq2!(journal.revision(), 2);
        assert_eq2!(journal.retained(), 0);
    }

    #[test]
    fn test_subscriber_sees_only_later_edits() {
        let journal = EditJournal::new();
        journal.record(inserted(0));
        let mut subscription = journal.subscribe();
        journal.record(inserted(1));
        journal.record(inserted(2));
        assert_eq2!(subscription.drain(), vec![inserted(1), inserted(2)]);
        assert_eq2!(subscription.drain(), vec![]);
        assert_eq2!(journal.retained(), 0);
    }

    #[test]
    fn test_edits_are_kept_until_every_subscriber_drains() {
        let journal = EditJournal::new();
        let mut fast = journal.subscribe();
        let mut slow = journal.subscribe();
        journal.record(inserted(0));
        assert_eq2!(fast.drain(), vec![inserted(0)]);
        journal.record(inserted(1));
        assert_eq2!(journal.retained(), 2);
        assert_eq2!(slow.drain(), vec![inserted(0), inserted(1)]);
        assert_eq2!(journal.retained(), 1);
        assert_eq2!(fast.drain(), vec![inserted(1)]);
        assert_eq2!(journal.retained(), 0);
    }

    #[test]
    fn test_drop_unsubscribes_and_trims() {
        let journal = EditJournal::new();
        let subscription = journal.subscribe();
        journal.record(inserted(0));
        assert_eq2!((journal.subscriber_count(), journal.retained()), (1, 1));
        drop(subscription);
        assert_eq2!((journal.subscriber_count(), journal.retained()), (0, 0));
        assert_eq2!(journal.revision(), 1);
    }

    #[test]
    fn test_idle_tracker_holds_the_backlog_until_used_or_dropped() {
        use crate::{Navigator, SharedList, TrackingMode};

        let list = SharedList::from(vec![1, 2, 3]);
        let tracker = list
            .navigator(0)
            .unwrap()
            .into_tracking(TrackingMode::Negative);
        for it in 4..8 {
            list.push(it).unwrap();
        }
        assert_eq2!(list.journal().retained(), 4);
        assert_eq2!(tracker.current(), Ok(1));
        assert_eq2!(list.journal().retained(), 0);
        list.push(8).unwrap();
        assert_eq2!(list.journal().retained(), 1);
        drop(tracker);
        assert_eq2!(list.journal().retained(), 0);
    }
}
