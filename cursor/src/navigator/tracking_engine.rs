// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A decorator that keeps an engine's point coherent while other navigators (or the
//! backing's own handle) change the structure of the same backing.
//!
//! ```text
//! SharedList [a, b, c], tracked navigator on b (index 1)
//!
//! someone else inserts x at index 1:
//!
//!   Negative: [a, x, b, c]     Positive: [a, x, b, c]
//!                ↑                             ↑
//!           index 1 (on x)                index 2 (still on b)
//!
//! someone else inserts x at index 0: both modes move to index 2 (on b).
//! ```
//!
//! Edits the tracked navigator makes itself are handled by its inner engine exactly as
//! if it were untracked; only edits made elsewhere are replayed through
//! [`NavigatorEngine::apply_edit`].

use super::{Capability, DEBUG_NAVIGATOR_MOD, EditJournal, JournalSubscription,
            NavigatorEngine, PositionKey, StructuralEdit};
use crate::{CursorResult, TrackingMode};
use std::{cell::RefCell,
          fmt::{Debug, Formatter}};

pub struct TrackingEngine<T> {
    inner: RefCell<Box<dyn NavigatorEngine<T>>>,
    mode: TrackingMode,
    subscription: RefCell<JournalSubscription>,
}

impl<T> Debug for TrackingEngine<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingEngine")
            .field("mode", &self.mode)
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> TrackingEngine<T> {
    /// Wrap `inner` so it follows edits made elsewhere. Returns `inner` unchanged when it
    /// already tracks (keeping its original mode), or when its backing has no journal
    /// because its structure can't change.
    #[must_use]
    pub fn wrap(
        inner: Box<dyn NavigatorEngine<T>>,
        mode: TrackingMode,
    ) -> Box<dyn NavigatorEngine<T>> {
        if inner.tracking_mode().is_some() {
            return inner;
        }
        let Some(journal) = inner.edit_journal() else {
            return inner;
        };
        DEBUG_NAVIGATOR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "TrackingEngine -> wrap", mode = %mode);
        });
        Box::new(Self {
            subscription: RefCell::new(journal.subscribe()),
            inner: RefCell::new(inner),
            mode,
        })
    }

    /// Replay the edits made elsewhere since the last sync. Skipped when re-entered
    /// from a callback this engine is running.
    fn sync(&self) {
        let (Ok(mut inner), Ok(mut subscription)) =
            (self.inner.try_borrow_mut(), self.subscription.try_borrow_mut())
        else {
            return;
        };
        for edit in subscription.drain() {
            inner.apply_edit(&edit, self.mode);
        }
    }

    fn sync_mut(&mut self) {
        let inner = self.inner.get_mut();
        for edit in self.subscription.get_mut().drain() {
            inner.apply_edit(&edit, self.mode);
        }
    }

    /// Run one of this engine's own edits. The inner engine already moved its point
    /// for it, so the edits it recorded are skipped instead of replayed.
    fn own_edit<R>(
        &mut self,
        edit: impl FnOnce(&mut dyn NavigatorEngine<T>) -> CursorResult<R>,
    ) -> CursorResult<R> {
        self.sync_mut();
        let result = edit(self.inner.get_mut().as_mut());
        let skipped = self.subscription.get_mut().drain();
        if DEBUG_NAVIGATOR_MOD && !skipped.is_empty() {
            tracing::trace!(message = "TrackingEngine -> own edit", skipped = ?skipped);
        }
        result
    }

    fn read<R>(&self, f: impl FnOnce(&dyn NavigatorEngine<T>) -> R) -> R {
        self.sync();
        f(self.inner.borrow().as_ref())
    }

    fn navigate<R>(&mut self, f: impl FnOnce(&mut dyn NavigatorEngine<T>) -> R) -> R {
        self.sync_mut();
        let result = f(self.inner.get_mut().as_mut());
        self.sync_mut();
        result
    }
}

impl<T: 'static> NavigatorEngine<T> for TrackingEngine<T> {
    fn capability(&self) -> Capability { self.inner.borrow().capability() }

    fn len(&self) -> usize { self.inner.borrow().len() }

    fn current_index(&self) -> CursorResult<usize> { self.read(|it| it.current_index()) }

    fn set_current_index(&mut self, index: usize) -> CursorResult<()> {
        self.navigate(|it| it.set_current_index(index))
    }

    fn can_move_by(&self, delta: isize) -> bool { self.read(|it| it.can_move_by(delta)) }

    fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.navigate(|it| it.move_by(delta))
    }

    fn visit(&self, delta: isize, visitor: &mut dyn FnMut(&T)) -> CursorResult<()> {
        self.read(|it| it.visit(delta, visitor))
    }

    /// The sibling is untracked.
    fn offset(&self, delta: isize) -> CursorResult<Box<dyn NavigatorEngine<T>>> {
        self.read(|it| it.offset(delta))
    }

    fn position_key(&self) -> PositionKey { self.read(|it| it.position_key()) }

    fn replace(&mut self, value: T) -> CursorResult<T> { self.own_edit(|it| it.replace(value)) }

    fn insert_before(&mut self, value: T) -> CursorResult<()> {
        self.own_edit(|it| it.insert_before(value))
    }

    fn insert_after(&mut self, value: T) -> CursorResult<()> {
        self.own_edit(|it| it.insert_after(value))
    }

    fn remove(&mut self) -> CursorResult<T> { self.own_edit(|it| it.remove()) }

    fn edit_journal(&self) -> Option<EditJournal> { self.inner.borrow().edit_journal() }

    fn apply_edit(&mut self, edit: &StructuralEdit, mode: TrackingMode) {
        self.inner.get_mut().apply_edit(edit, mode);
    }

    fn tracking_mode(&self) -> Option<TrackingMode> { Some(self.mode) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CursorError, IndexedEngine, LinkedEngine, SharedArray, SharedLinkedSeq,
                SharedList, assert_eq2};
    use test_case::test_case;

    fn tracked_list(
        items: Vec<char>,
        index: usize,
        mode: TrackingMode,
    ) -> (SharedList<char>, Box<dyn NavigatorEngine<char>>) {
        let list = SharedList::from(items);
        let engine = IndexedEngine::new(list.clone(), index).unwrap();
        (list, TrackingEngine::wrap(Box::new(engine), mode))
    }

    fn current(engine: &dyn NavigatorEngine<char>) -> char {
        let mut acc = None;
        engine.visit(0, &mut |it| acc = Some(*it)).unwrap();
        acc.unwrap()
    }

    #[test_case(TrackingMode::Negative, 1, 'x' ; "negative stays on index")]
    #[test_case(TrackingMode::Positive, 2, 'b' ; "positive stays on content")]
    fn test_insert_at_point_elsewhere(mode: TrackingMode, index: usize, on: char) {
        let (list, engine) = tracked_list(vec!['a', 'b', 'c'], 1, mode);
        list.insert(1, 'x').unwrap();
        assert_eq2!(engine.current_index(), Ok(index));
        assert_eq2!(current(engine.as_ref()), on);
    }

    #[test_case(TrackingMode::Negative ; "negative")]
    #[test_case(TrackingMode::Positive ; "positive")]
    fn test_insert_and_remove_before_point(mode: TrackingMode) {
        let (list, engine) = tracked_list(vec!['a', 'b', 'c'], 1, mode);
        list.insert(0, 'x').unwrap();
        assert_eq2!(current(engine.as_ref()), 'b');
        list.remove(0).unwrap();
        list.remove(0).unwrap();
        assert_eq2!(engine.current_index(), Ok(0));
        assert_eq2!(current(engine.as_ref()), 'b');
    }

    #[test]
    fn test_removal_at_tail_clamps() {
        let (list, engine) = tracked_list(vec!['a', 'b', 'c'], 2, TrackingMode::Negative);
        list.remove(2).unwrap();
        assert_eq2!(current(engine.as_ref()), 'b');
    }

    #[test]
    fn test_own_edits_are_not_replayed() {
        let (list, mut engine) = tracked_list(vec!['a', 'b'], 1, TrackingMode::Positive);
        engine.insert_before('x').unwrap();
        assert_eq2!(engine.current_index(), Ok(1));
        assert_eq2!(engine.remove(), Ok('x'));
        assert_eq2!(current(engine.as_ref()), 'b');
        assert_eq2!(list.to_vec(), vec!['a', 'b']);
        assert_eq2!(list.journal().retained(), 0);
    }

    #[test]
    fn test_wrap_is_idempotent_and_skips_fixed_backings() {
        let (_list, engine) = tracked_list(vec!['a'], 0, TrackingMode::Positive);
        let engine = TrackingEngine::wrap(engine, TrackingMode::Negative);
        assert_eq2!(engine.tracking_mode(), Some(TrackingMode::Positive));

        let array = SharedArray::from(['a']);
        let engine = TrackingEngine::<char>::wrap(
            Box::new(IndexedEngine::new(array, 0).unwrap()),
            TrackingMode::Negative,
        );
        assert_eq2!(engine.tracking_mode(), None);
    }

    #[test]
    fn test_linked_removal_elsewhere_snaps_to_successor() {
        let seq = "abc".chars().collect::<SharedLinkedSeq<_>>();
        let b = seq.with_seq(|it| it.node_at(1)).unwrap().unwrap();
        let engine = TrackingEngine::<char>::wrap(
            Box::new(LinkedEngine::new(seq.clone(), b).unwrap()),
            TrackingMode::Negative,
        );
        seq.remove(b).unwrap();
        assert_eq2!(current(engine.as_ref()), 'c');
        let c = seq.last().unwrap();
        seq.remove(c).unwrap();
        assert_eq2!(current(engine.as_ref()), 'a');
        assert_eq2!(
            engine.offset(1).map(|_| ()),
            Err(CursorError::OutOfRange {
                name: "delta",
                value: 1,
                length: 1
            })
        );
    }
}
