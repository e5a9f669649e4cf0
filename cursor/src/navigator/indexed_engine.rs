// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, DEBUG_NAVIGATOR_MOD, EditJournal, IndexedStore, NavigatorEngine,
            PositionKey, StructuralEdit};
use crate::{CursorError, CursorResult, TrackingMode, offset_index, track_remove,
            try_offset_index, validate_cursor_start, validate_index};
use std::fmt::{Debug, Formatter};

/// Engine over any [`IndexedStore`]: an index into a shared store, checked against the
/// store's live length on every call.
pub struct IndexedEngine<S> {
    store: S,
    index: usize,
}

impl<S: IndexedStore> IndexedEngine<S> {
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn new(store: S, index: usize) -> CursorResult<Self> {
        let index = validate_cursor_start(index, store.store_len())?;
        Ok(Self { store, index })
    }

    #[must_use]
    pub fn store(&self) -> &S { &self.store }

    /// The point, revalidated against the live length.
    fn live_index(&self) -> CursorResult<usize> {
        validate_index(self.index, self.store.store_len())
    }
}

impl<S> Debug for IndexedEngine<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexedEngine")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<S: IndexedStore> NavigatorEngine<S::Item> for IndexedEngine<S> {
    fn capability(&self) -> Capability { S::CAPABILITY }

    fn len(&self) -> usize { self.store.store_len() }

    fn current_index(&self) -> CursorResult<usize> { self.live_index() }

    fn set_current_index(&mut self, index: usize) -> CursorResult<()> {
        self.index = validate_index(index, self.len())?;
        Ok(())
    }

    fn can_move_by(&self, delta: isize) -> bool {
        try_offset_index(self.index, delta, self.len()).is_some()
    }

    fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.index = offset_index(self.index, delta, self.len())?;
        Ok(())
    }

    fn visit(&self, delta: isize, visitor: &mut dyn FnMut(&S::Item)) -> CursorResult<()> {
        let index = offset_index(self.live_index()?, delta, self.len())?;
        self.store.visit_item(index, visitor)
    }

    fn offset(&self, delta: isize) -> CursorResult<Box<dyn NavigatorEngine<S::Item>>> {
        let index = offset_index(self.index, delta, self.len())?;
        Ok(Box::new(Self {
            store: self.store.clone(),
            index,
        }))
    }

    fn position_key(&self) -> PositionKey {
        PositionKey::Index {
            backing: self.store.store_address(),
            index: self.index,
        }
    }

    fn replace(&mut self, value: S::Item) -> CursorResult<S::Item> {
        let index = self.live_index()?;
        self.store.replace_item(index, value)
    }

    /// The point keeps its numeric index, so it ends up on the inserted item.
    fn insert_before(&mut self, value: S::Item) -> CursorResult<()> {
        let index = self.live_index()?;
        self.store.insert_item(index, value)?;
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(message = "IndexedEngine -> insert_before", index = index);
        });
        Ok(())
    }

    fn insert_after(&mut self, value: S::Item) -> CursorResult<()> {
        let index = self.live_index()?;
        self.store.insert_item(index + 1, value)?;
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(message = "IndexedEngine -> insert_after", index = index);
        });
        Ok(())
    }

    /// Remove the item under the point. The point stays on the same index, clamped to
    /// the new last item.
    fn remove(&mut self) -> CursorResult<S::Item> {
        let index = self.live_index()?;
        if self.len() <= 1 {
            return Err(match self.capability() {
                Capability::Writable => CursorError::RemoveLastElement,
                capability => super::unsupported("remove", capability),
            });
        }
        let removed = self.store.remove_item(index)?;
        self.index = track_remove(self.index, index, self.len());
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(
                message = "IndexedEngine -> remove",
                removed_at = index,
                index = self.index
            );
        });
        Ok(removed)
    }

    fn edit_journal(&self) -> Option<EditJournal> { self.store.store_journal() }

    fn apply_edit(&mut self, edit: &StructuralEdit, mode: TrackingMode) {
        let before = self.index;
        match *edit {
            StructuralEdit::Inserted { index, count } => {
                self.index = mode.track_insert(self.index, index, count);
            }
            StructuralEdit::Removed { index, len_after } => {
                self.index = track_remove(self.index, index, len_after);
            }
            StructuralEdit::LinkedInsertedBefore { .. }
            | StructuralEdit::LinkedInsertedAfter { .. }
            | StructuralEdit::LinkedRemoved { .. } => {}
        }
        if DEBUG_NAVIGATOR_MOD && before != self.index {
            tracing::trace!(
                message = "IndexedEngine -> apply_edit",
                edit = ?edit,
                from = before,
                to = self.index
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SharedArray, SharedList, assert_eq2};
    use std::rc::Rc;

    fn peek_all<T: Clone + 'static>(engine: &dyn NavigatorEngine<T>) -> Vec<T> {
        let mut acc = vec![];
        let start = -crate::as_signed(engine.current_index().unwrap());
        let end = crate::as_signed(engine.len());
        for delta in start..end + start {
            engine.visit(delta, &mut |it| acc.push(it.clone())).unwrap();
        }
        acc
    }

    #[test]
    fn test_moves_are_bounded() {
        let store: Rc<[i32]> = Rc::from(vec![10, 20, 30, 40]);
        let mut engine = IndexedEngine::new(store, 1).unwrap();
        assert!(engine.can_move_by(2));
        assert!(!engine.can_move_by(3));
        assert_eq2!(
            engine.move_by(-5),
            Err(CursorError::OutOfRange {
                name: "delta",
                value: -5,
                length: 4
            })
        );
        assert_eq2!(engine.current_index(), Ok(1));
        assert_eq2!(peek_all(&engine), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_read_only_store_refuses_edits() {
        let store: Rc<[i32]> = Rc::from(vec![1, 2]);
        let mut engine = IndexedEngine::new(store, 0).unwrap();
        assert_eq2!(
            engine.replace(0),
            Err(CursorError::Unsupported {
                operation: "replace",
                capability: Capability::ReadOnly
            })
        );
        assert!(matches!(
            engine.remove(),
            Err(CursorError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_untracked_engine_sees_shrunk_store() {
        let list = SharedList::from(vec![1, 2, 3]);
        let engine = IndexedEngine::new(list.clone(), 2).unwrap();
        list.remove(0).unwrap();
        assert_eq2!(
            engine.current_index(),
            Err(CursorError::OutOfRange {
                name: "index",
                value: 2,
                length: 2
            })
        );
    }

    #[test]
    fn test_remove_clamps_and_guards_last() {
        let list = SharedList::from(vec!['a', 'b']);
        let mut engine = IndexedEngine::new(list.clone(), 1).unwrap();
        assert_eq2!(engine.remove(), Ok('b'));
        assert_eq2!(engine.current_index(), Ok(0));
        assert_eq2!(engine.remove(), Err(CursorError::RemoveLastElement));
        assert_eq2!(list.to_vec(), vec!['a']);
    }

    #[test]
    fn test_array_replace() {
        let array = SharedArray::from([1, 2, 3]);
        let mut engine = IndexedEngine::new(array.clone(), 1).unwrap();
        assert_eq2!(engine.replace(20), Ok(2));
        assert_eq2!(array.to_vec(), vec![1, 20, 3]);
        assert_eq2!(engine.edit_journal().is_none(), true);
    }
}
