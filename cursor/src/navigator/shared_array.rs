// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, EditNavigator, IndexedEngine, IndexedStore, Navigator};
use crate::{CursorError, CursorResult, validate_index};
use std::{cell::RefCell,
          fmt::{Debug, Formatter},
          rc::Rc};

/// A fixed length array shared by any number of navigators. Items can be replaced but
/// never inserted or removed, so there is nothing for a tracking navigator to follow.
pub struct SharedArray<T> {
    items: Rc<RefCell<Box<[T]>>>,
}

impl<T> Clone for SharedArray<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
        }
    }
}

impl<T> Debug for SharedArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedArray")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> From<Vec<T>> for SharedArray<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items.into_boxed_slice())),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SharedArray<T> {
    fn from(items: [T; N]) -> Self { Self::from(Vec::from(items)) }
}

impl<T> SharedArray<T> {
    #[must_use]
    pub fn len(&self) -> usize { self.items.borrow().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Replace the item at `index`, returning the old one.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::BackingBorrowed`].
    pub fn set(&self, index: usize, value: T) -> CursorResult<T> {
        let mut items = self
            .items
            .try_borrow_mut()
            .map_err(|_| CursorError::BackingBorrowed)?;
        let index = validate_index(index, items.len())?;
        Ok(std::mem::replace(&mut items[index], value))
    }
}

impl<T: Clone> SharedArray<T> {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> { self.items.borrow().get(index).cloned() }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T> { self.items.borrow().to_vec() }
}

impl<T: Clone + 'static> SharedArray<T> {
    /// An editable navigator at `index`.
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn navigator(&self, index: usize) -> CursorResult<EditNavigator<T>> {
        let engine = IndexedEngine::new(self.clone(), index)?;
        Ok(EditNavigator::from_engine(Box::new(engine)))
    }
}

impl<T: 'static> IndexedStore for SharedArray<T> {
    type Item = T;

    const CAPABILITY: Capability = Capability::Editable;

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

    fn replace_item(&self, index: usize, value: T) -> CursorResult<T> { self.set(index, value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_array_is_editable_but_fixed() {
        let array = SharedArray::from([1, 2, 3]);
        assert_eq2!(array.set(2, 30), Ok(3));
        assert_eq2!(array.to_vec(), vec![1, 2, 30]);
        assert_eq2!(
            IndexedStore::insert_item(&array, 0, 0),
            Err(CursorError::Unsupported {
                operation: "insert",
                capability: Capability::Editable
            })
        );
    }
}
