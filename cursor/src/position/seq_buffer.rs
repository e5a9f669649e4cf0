// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Capability traits for the backings a [`Position`] can borrow.
//!
//! Capabilities are additive. Which methods a position exposes is decided by the
//! traits its backing implements (and by whether the borrow is shared or exclusive):
//!
//! | Trait               | Unlocks                                          | `[T]` | `[T; N]` | `Vec` | `VecDeque` | `SmallVec` |
//! | :------------------ | :----------------------------------------------- | :---: | :------: | :---: | :--------: | :--------: |
//! | [`SeqBuffer`]       | read, move, peek, scan                           |   ✓   |    ✓     |   ✓   |     ✓      |     ✓      |
//! | [`ContiguousBuffer`]| `all_before`, `all_after`, `slice` as `&[T]`     |   ✓   |    ✓     |   ✓   |            |     ✓      |
//! | [`SeqBufferMut`]    | `write`, `write_and_advance`, `current_mut`      |   ✓   |    ✓     |   ✓   |     ✓      |     ✓      |
//! | [`SeqBufferResize`] | `insert_*`, `remove`                             |       |          |   ✓   |     ✓      |     ✓      |
//!
//! [`Position`]: crate::Position

use smallvec::{Array, SmallVec};
use std::collections::VecDeque;

/// An ordered, index addressable backing.
pub trait SeqBuffer {
    type Item;

    /// Live length. Positions read this on every bounds check.
    fn buffer_len(&self) -> usize;

    fn get_item(&self, index: usize) -> Option<&Self::Item>;

    /// # Panics
    ///
    /// If `index` is not in `[0, buffer_len())`. Positions only call this with an index
    /// they have already validated.
    fn item(&self, index: usize) -> &Self::Item;
}

pub trait SeqBufferMut: SeqBuffer {
    /// # Panics
    ///
    /// If `index` is not in `[0, buffer_len())`.
    fn item_mut(&mut self, index: usize) -> &mut Self::Item;
}

/// A backing whose length can change.
pub trait SeqBufferResize: SeqBufferMut {
    /// Insert so that `item` ends up at `index`, shifting the rest toward the end.
    /// `index` may equal `buffer_len()` (append).
    fn insert_item(&mut self, index: usize, item: Self::Item);

    fn remove_item(&mut self, index: usize) -> Option<Self::Item>;
}

/// A backing whose items are laid out in one slice, so ranges can be borrowed without
/// copying.
pub trait ContiguousBuffer: SeqBuffer {
    fn as_item_slice(&self) -> &[Self::Item];
}

// Slices.

impl<T> SeqBuffer for [T] {
    type Item = T;

    fn buffer_len(&self) -> usize { self.len() }

    fn get_item(&self, index: usize) -> Option<&T> { self.get(index) }

    fn item(&self, index: usize) -> &T { &self[index] }
}

impl<T> SeqBufferMut for [T] {
    fn item_mut(&mut self, index: usize) -> &mut T { &mut self[index] }
}

impl<T> ContiguousBuffer for [T] {
    fn as_item_slice(&self) -> &[T] { self }
}

// Arrays.

impl<T, const N: usize> SeqBuffer for [T; N] {
    type Item = T;

    fn buffer_len(&self) -> usize { N }

    fn get_item(&self, index: usize) -> Option<&T> { self.get(index) }

    fn item(&self, index: usize) -> &T { &self[index] }
}

impl<T, const N: usize> SeqBufferMut for [T; N] {
    fn item_mut(&mut self, index: usize) -> &mut T { &mut self[index] }
}

impl<T, const N: usize> ContiguousBuffer for [T; N] {
    fn as_item_slice(&self) -> &[T] { self }
}

// Vec.

impl<T> SeqBuffer for Vec<T> {
    type Item = T;

    fn buffer_len(&self) -> usize { self.len() }

    fn get_item(&self, index: usize) -> Option<&T> { self.get(index) }

    fn item(&self, index: usize) -> &T { &self[index] }
}

impl<T> SeqBufferMut for Vec<T> {
    fn item_mut(&mut self, index: usize) -> &mut T { &mut self[index] }
}

impl<T> SeqBufferResize for Vec<T> {
    fn insert_item(&mut self, index: usize, item: T) { self.insert(index, item); }

    fn remove_item(&mut self, index: usize) -> Option<T> {
        (index < self.len()).then(|| self.remove(index))
    }
}

impl<T> ContiguousBuffer for Vec<T> {
    fn as_item_slice(&self) -> &[T] { self }
}

// VecDeque.

impl<T> SeqBuffer for VecDeque<T> {
    type Item = T;

    fn buffer_len(&self) -> usize { self.len() }

    fn get_item(&self, index: usize) -> Option<&T> { self.get(index) }

    fn item(&self, index: usize) -> &T { &self[index] }
}

impl<T> SeqBufferMut for VecDeque<T> {
    fn item_mut(&mut self, index: usize) -> &mut T { &mut self[index] }
}

impl<T> SeqBufferResize for VecDeque<T> {
    fn insert_item(&mut self, index: usize, item: T) { self.insert(index, item); }

    fn remove_item(&mut self, index: usize) -> Option<T> { self.remove(index) }
}

// SmallVec.

impl<A: Array> SeqBuffer for SmallVec<A> {
    type Item = A::Item;

    fn buffer_len(&self) -> usize { self.len() }

    fn get_item(&self, index: usize) -> Option<&A::Item> { self.get(index) }

    fn item(&self, index: usize) -> &A::Item { &self[index] }
}

impl<A: Array> SeqBufferMut for SmallVec<A> {
    fn item_mut(&mut self, index: usize) -> &mut A::Item { &mut self[index] }
}

impl<A: Array> SeqBufferResize for SmallVec<A> {
    fn insert_item(&mut self, index: usize, item: A::Item) { self.insert(index, item); }

    fn remove_item(&mut self, index: usize) -> Option<A::Item> {
        (index < self.len()).then(|| self.remove(index))
    }
}

impl<A: Array> ContiguousBuffer for SmallVec<A> {
    fn as_item_slice(&self) -> &[A::Item] { self }
}
