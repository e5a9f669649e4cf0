// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, EditJournal, ReadNavigator, unsupported};
use crate::{CursorError, CursorResult, IndexedEngine, Navigator, validate_index};
use std::rc::Rc;

/// A shared, index addressable backing an [`IndexedEngine`] can drive. Handles are
/// cheap to clone and every clone sees the same items.
///
/// Methods take `&self`: the store owns its interior mutability. Writes fail with
/// [`CursorError::BackingBorrowed`] rather than panicking when they race a read that
/// is running a caller's callback.
pub trait IndexedStore: Clone + 'static {
    type Item: 'static;

    const CAPABILITY: Capability;

    fn store_len(&self) -> usize;

    /// Address of the shared allocation, for identity checks.
    fn store_address(&self) -> usize;

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`.
    fn visit_item(&self, index: usize, visitor: &mut dyn FnMut(&Self::Item)) -> CursorResult<()>;

    fn store_journal(&self) -> Option<EditJournal> { None }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] for stores that can't be edited.
    fn replace_item(&self, _index: usize, _value: Self::Item) -> CursorResult<Self::Item> {
        Err(unsupported("replace", Self::CAPABILITY))
    }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] for stores that can't be resized.
    fn insert_item(&self, _index: usize, _value: Self::Item) -> CursorResult<()> {
        Err(unsupported("insert", Self::CAPABILITY))
    }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] for stores that can't be resized.
    fn remove_item(&self, _index: usize) -> CursorResult<Self::Item> {
        Err(unsupported("remove", Self::CAPABILITY))
    }
}

/// Read-only backing: any `Rc<[T]>`.
impl<T: 'static> IndexedStore for Rc<[T]> {
    type Item = T;

    const CAPABILITY: Capability = Capability::ReadOnly;

    fn store_len(&self) -> usize { self.len() }

    fn store_address(&self) -> usize { Rc::as_ptr(self).cast::<()>().addr() }

    fn visit_item(&self, index: usize, visitor: &mut dyn FnMut(&T)) -> CursorResult<()> {
        let index = validate_index(index, self.len())?;
        visitor(&self[index]);
        Ok(())
    }
}

/// Create a read-only navigator over `items`.
///
/// ```
/// use r3bl_cursor::{Navigator, ScanCursor, read_navigator};
///
/// let mut nav = read_navigator(vec![3, 1, 4, 1, 5], 0).unwrap();
/// assert_eq!(nav.scan_forward_to(&5), 4);
/// assert_eq!(nav.try_peek(1), None);
/// ```
///
/// # Errors
///
/// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
pub fn read_navigator<T: Clone + 'static>(
    items: impl Into<Rc<[T]>>,
    index: usize,
) -> CursorResult<ReadNavigator<T>> {
    let engine = IndexedEngine::new(items.into(), index)?;
    Ok(ReadNavigator::from_engine(Box::new(engine)))
}

pub(crate) fn out_of_range_for_insert(index: usize, length: usize) -> CursorError {
    CursorError::OutOfRange {
        name: "index",
        value: crate::as_signed(index),
        length,
    }
}
