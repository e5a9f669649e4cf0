// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, DEBUG_NAVIGATOR_MOD, EditJournal, IndexedEngine, IndexedStore,
            Navigator, StructuralEdit, WriteNavigator, out_of_range_for_insert};
use crate::{CursorError, CursorResult, validate_index};
use std::{cell::RefCell,
          fmt::{Debug, Formatter},
          rc::Rc};

/// A resizable list shared by any number of navigators (and by its own handles).
///
/// Every structural change, whether made through a navigator or through this handle,
/// is recorded in the list's [`EditJournal`], which is how tracking navigators follow
/// edits they didn't make.
///
/// ```
/// use r3bl_cursor::{Navigator, SharedList, TrackingMode};
///
/// let list = SharedList::from(vec![10, 20, 30]);
/// let tracked = list.navigator(1).unwrap().into_tracking(TrackingMode::Negative);
///
/// list.insert(0, 5).unwrap();
/// assert_eq!(tracked.current(), Ok(20));
/// assert_eq!(tracked.current_index(), Ok(2));
/// ```
pub struct SharedList<T> {
    items: Rc<RefCell<Vec<T>>>,
    journal: EditJournal,
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            journal: self.journal.clone(),
        }
    }
}

impl<T> Debug for SharedList<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedList")
            .field("len", &self.len())
            .field("revision", &self.journal.revision())
            .finish_non_exhaustive()
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self { Self::from(Vec::new()) }
}

impl<T> From<Vec<T>> for SharedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            journal: EditJournal::new(),
        }
    }
}

impl<T> FromIterator<T> for SharedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> SharedList<T> {
    #[must_use]
    pub fn len(&self) -> usize { self.items.borrow().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[must_use]
    pub fn journal(&self) -> &EditJournal { &self.journal }

    /// Insert `value` at `index` (which may equal `len()`).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] when `index > len()`, or
    /// [`CursorError::BackingBorrowed`].
    pub fn insert(&self, index: usize, value: T) -> CursorResult<()> {
        let mut items = self.borrow_items_mut()?;
        if index > items.len() {
            return Err(out_of_range_for_insert(index, items.len()));
        }
        items.insert(index, value);
        drop(items);
        self.journal.record(StructuralEdit::Inserted { index, count: 1 });
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(message = "SharedList -> insert", index = index);
        });
        Ok(())
    }

    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`].
    pub fn push(&self, value: T) -> CursorResult<()> { self.insert(self.len(), value) }

    /// Remove and return the item at `index`. Unlike a navigator, the list itself may
    /// be emptied.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::BackingBorrowed`].
    pub fn remove(&self, index: usize) -> CursorResult<T> {
        let mut items = self.borrow_items_mut()?;
        let index = validate_index(index, items.len())?;
        let removed = items.remove(index);
        let len_after = items.len();
        drop(items);
        self.journal.record(StructuralEdit::Removed { index, len_after });
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(
                message = "SharedList -> remove",
                index = index,
                len_after = len_after
            );
        });
        Ok(removed)
    }

    /// Replace the item at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::BackingBorrowed`].
    pub fn set(&self, index: usize, value: T) -> CursorResult<T> {
        let mut items = self.borrow_items_mut()?;
        let index = validate_index(index, items.len())?;
        Ok(std::mem::replace(&mut items[index], value))
    }

    fn borrow_items_mut(&self) -> CursorResult<std::cell::RefMut<'_, Vec<T>>> {
        self.items
            .try_borrow_mut()
            .map_err(|_| CursorError::BackingBorrowed)
    }
}

impl<T: Clone> SharedList<T> {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> { self.items.borrow().get(index).cloned() }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T> { self.items.borrow().clone() }
}

impl<T: Clone + 'static> SharedList<T> {
    /// A writable navigator at `index`.
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn navigator(&self, index: usize) -> CursorResult<WriteNavigator<T>> {
        let engine = IndexedEngine::new(self.clone(), index)?;
        Ok(WriteNavigator::from_engine(Box::new(engine)))
    }
}

impl<T: 'static> IndexedStore for SharedList<T> {
    type Item = T;

    const CAPABILITY: Capability = Capability::Writable;

    fn store_len(&self) -> usize { self.len() }

    fn store_address(&self) -> usize { Rc::as_ptr(&self.items).cast::<()>().addr() }

    fn visit_item(&self, index: usize, visitor: &mut dyn FnMut(&T)) -> CursorResult<()> {
        let items = self
            .items
            .try_borrow()
            .map_err(|_| CursorError::BackingBorrowed)?;
        let index = validate_index(index, items.len())?;
        visitor(&items[index]);
        Ok(())
    }

    fn store_journal(&self) -> Option<EditJournal> { Some(self.journal.clone()) }

    fn replace_item(&self, index: usize, value: T) -> CursorResult<T> { self.set(index, value) }

    fn insert_item(&self, index: usize, value: T) -> CursorResult<()> {
        self.insert(index, value)
    }

    fn remove_item(&self, index: usize) -> CursorResult<T> { self.remove(index) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_list_edits_are_journaled() {
        let list = SharedList::from(vec!['a', 'c']);
        let mut subscription = list.journal().subscribe();
        list.insert(1, 'b').unwrap();
        list.push('d').unwrap();
        assert_eq2!(list.remove(0), Ok('a'));
        assert_eq2!(list.set(0, 'B'), Ok('b'));
        assert_eq2!(list.to_vec(), vec!['B', 'c', 'd']);
        assert_eq2!(
            subscription.drain(),
            vec![
                StructuralEdit::Inserted { index: 1, count: 1 },
                StructuralEdit::Inserted { index: 3, count: 1 },
                StructuralEdit::Removed {
                    index: 0,
                    len_after: 3
                },
            ]
        );
    }

    #[test]
    fn test_list_rejects_bad_indices() {
        let list = SharedList::<i32>::default();
        assert!(matches!(
            list.insert(1, 0),
            Err(CursorError::OutOfRange { name: "index", value: 1, length: 0 })
        ));
        assert!(list.remove(0).is_err());
        assert!(matches!(list.navigator(0), Err(CursorError::EmptyBacking)));
    }

    #[test]
    fn test_write_during_read_is_reported() {
        let list = SharedList::from(vec![1, 2]);
        let mut nested = None;
        list.visit_item(0, &mut |_| nested = Some(list.push(3)))
            .unwrap();
        assert_eq2!(nested, Some(Err(CursorError::BackingBorrowed)));
        assert_eq2!(list.len(), 2);
    }
}
