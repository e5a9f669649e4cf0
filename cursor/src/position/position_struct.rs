// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ContiguousBuffer, DEBUG_CURSOR_MOD, SeqBuffer, SeqBufferMut, SeqBufferResize};
use crate::{CursorError, CursorPositionStatus, CursorResult, ScanCursor, SeqIndex,
            TrackingMode, as_signed, offset_index, track_remove, try_offset_index,
            validate_cursor_start, validate_index};
use std::ops::{Deref, DerefMut};

/// A point inside an index addressable backing, plus the borrow of that backing.
///
/// `R` is the reference type, and it decides what the position can do:
///
/// | `R`                           | Read + move | Write | Insert / remove |
/// | :---------------------------- | :---------: | :---: | :-------------: |
/// | `&[T]`, `&Vec<T>`, `&[T; N]`  |      ✓      |       |                 |
/// | `&mut [T]`, `&mut [T; N]`     |      ✓      |   ✓   |                 |
/// | `&mut Vec<T>`, `&mut VecDeque<T>`, `&mut SmallVec<A>` | ✓ | ✓ |  ✓    |
///
/// Construction fails over an empty backing, and the index always satisfies
/// `0 <= index < len()`. While the position exists its backing can only change
/// through it, so that invariant can't be broken from the outside.
///
/// ```
/// use r3bl_cursor::{GetPosition, TrackingMode};
///
/// let mut items = vec!['a', 'c'];
/// let mut pos = items.position_of_mut(1).unwrap();
/// pos.insert_before_tracking('b', TrackingMode::Positive);
/// assert_eq!((pos.index(), *pos.current()), (2, 'c'));
/// assert_eq!(items, ['a', 'b', 'c']);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Position<R> {
    buffer: R,
    index: usize,
}

impl<R> Position<R>
where
    R: Deref,
    R::Target: SeqBuffer,
{
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn new(buffer: R, index: usize) -> CursorResult<Self> {
        let index = validate_cursor_start(index, buffer.deref().buffer_len())?;
        Ok(Self { buffer, index })
    }

    /// Create a position at an index counted from either end.
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn at(buffer: R, at: impl Into<SeqIndex>) -> CursorResult<Self> {
        let index = at.into().resolve(buffer.deref().buffer_len())?;
        Ok(Self { buffer, index })
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    pub fn start(buffer: R) -> CursorResult<Self> { Self::new(buffer, 0) }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    pub fn end(buffer: R) -> CursorResult<Self> { Self::at(buffer, SeqIndex::FromEnd(1)) }

    #[must_use]
    pub fn buffer(&self) -> &R::Target { &self.buffer }

    /// Give the borrow back.
    pub fn into_buffer(self) -> R { self.buffer }

    /// Live length of the backing. Never 0.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.buffer().buffer_len() }

    #[must_use]
    pub fn index(&self) -> usize { self.index }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`. The position does not move.
    pub fn set_index(&mut self, index: usize) -> CursorResult<()> {
        self.index = validate_index(index, self.len())?;
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> CursorPositionStatus {
        CursorPositionStatus::locate(self.index, self.len())
    }

    #[must_use]
    pub fn is_start(&self) -> bool { self.index == 0 }

    #[must_use]
    pub fn is_end(&self) -> bool { self.index + 1 == self.len() }

    #[must_use]
    pub fn current(&self) -> &<R::Target as SeqBuffer>::Item {
        self.buffer().item(self.index)
    }

    /// Same as [`Self::current`].
    #[must_use]
    pub fn read(&self) -> &<R::Target as SeqBuffer>::Item { self.current() }

    #[must_use]
    pub fn can_move_next(&self) -> bool { self.index + 1 < self.len() }

    #[must_use]
    pub fn can_move_previous(&self) -> bool { self.index > 0 }

    #[must_use]
    pub fn can_move_by(&self, delta: isize) -> bool {
        try_offset_index(self.index, delta, self.len()).is_some()
    }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the last element.
    pub fn move_next(&mut self) -> CursorResult<()> { self.move_by(1) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the first element.
    pub fn move_previous(&mut self) -> CursorResult<()> { self.move_by(-1) }

    /// Move by `delta` (negative moves toward the start).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`. The position does not move.
    pub fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.index = offset_index(self.index, delta, self.len())?;
        Ok(())
    }

    pub fn move_to_start(&mut self) { self.index = 0; }

    pub fn move_to_end(&mut self) { self.index = self.len().saturating_sub(1); }

    /// A read-only sibling position `delta` away from this one.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn offset(&self, delta: isize) -> CursorResult<Position<&R::Target>> {
        let index = offset_index(self.index, delta, self.len())?;
        Ok(Position {
            buffer: self.buffer(),
            index,
        })
    }

    /// The element `delta` away, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn peek(&self, delta: isize) -> CursorResult<&<R::Target as SeqBuffer>::Item> {
        let index = offset_index(self.index, delta, self.len())?;
        Ok(self.buffer().item(index))
    }

    /// Soft form of [`Self::peek`]: `None` past either boundary.
    #[must_use]
    pub fn try_peek(&self, delta: isize) -> Option<&<R::Target as SeqBuffer>::Item> {
        try_offset_index(self.index, delta, self.len()).map(|it| self.buffer().item(it))
    }

    /// Elements before the point, nearest first. Lazy.
    pub fn before(&self) -> impl Iterator<Item = &<R::Target as SeqBuffer>::Item> + '_ {
        let buffer = self.buffer();
        (0..self.index).rev().map(move |it| buffer.item(it))
    }

    /// Elements after the point, nearest first. Lazy.
    pub fn after(&self) -> impl Iterator<Item = &<R::Target as SeqBuffer>::Item> + '_ {
        let buffer = self.buffer();
        (self.index + 1..buffer.buffer_len()).map(move |it| buffer.item(it))
    }

    /// Same backing (by address, not by value) and same index.
    #[must_use]
    pub fn is_same_position<R2>(&self, other: &Position<R2>) -> bool
    where
        R2: Deref<Target = R::Target>,
    {
        std::ptr::eq(self.buffer(), other.buffer.deref()) && self.index == other.index
    }
}

/// Borrowed ranges, for backings laid out in one slice.
impl<R> Position<R>
where
    R: Deref,
    R::Target: ContiguousBuffer,
{
    /// Everything before the point, in backing order.
    #[must_use]
    pub fn all_before(&self) -> &[<R::Target as SeqBuffer>::Item] {
        &self.buffer.as_item_slice()[..self.index]
    }

    /// Everything after the point, in backing order.
    #[must_use]
    pub fn all_after(&self) -> &[<R::Target as SeqBuffer>::Item] {
        &self.buffer.as_item_slice()[self.index + 1..]
    }

    /// `length` elements starting at the point (inclusive).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"length"` when the range runs past the end.
    pub fn slice(&self, length: usize) -> CursorResult<&[<R::Target as SeqBuffer>::Item]> {
        let items = self.buffer.as_item_slice();
        match self.index.checked_add(length) {
            Some(end) if end <= items.len() => Ok(&items[self.index..end]),
            _ => Err(CursorError::OutOfRange {
                name: "length",
                value: as_signed(length),
                length: items.len(),
            }),
        }
    }
}

impl<R> Position<R>
where
    R: DerefMut,
    R::Target: SeqBufferMut,
{
    pub fn current_mut(&mut self) -> &mut <R::Target as SeqBuffer>::Item {
        let index = self.index;
        self.buffer.item_mut(index)
    }

    /// Replace the element under the point.
    pub fn write(&mut self, value: <R::Target as SeqBuffer>::Item) {
        *self.current_mut() = value;
    }

    /// Replace the element under the point, then move forward. On the last element the
    /// write happens and the position stays put.
    pub fn write_and_advance(&mut self, value: <R::Target as SeqBuffer>::Item) {
        self.write(value);
        if self.can_move_next() {
            self.index += 1;
        }
    }
}

impl<R> Position<R>
where
    R: DerefMut,
    R::Target: SeqBufferResize,
{
    /// Insert at the point. The index does not change, so the point ends up on the new
    /// element. Same as [`TrackingMode::Negative`].
    pub fn insert_before(&mut self, value: <R::Target as SeqBuffer>::Item) {
        self.insert_before_tracking(value, TrackingMode::Negative);
    }

    /// Insert at the point, and let `mode` decide whether the point stays on the new
    /// element ([`TrackingMode::Negative`]) or on the element it was on
    /// ([`TrackingMode::Positive`]).
    pub fn insert_before_tracking(
        &mut self,
        value: <R::Target as SeqBuffer>::Item,
        mode: TrackingMode,
    ) {
        let at = self.index;
        self.buffer.insert_item(at, value);
        self.index = mode.track_insert(self.index, at, 1);
        DEBUG_CURSOR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Position -> insert_before",
                at = at,
                mode = %mode,
                index = self.index
            );
        });
    }

    /// Insert right after the point. The point does not move.
    pub fn insert_after(&mut self, value: <R::Target as SeqBuffer>::Item) {
        let at = self.index + 1;
        self.buffer.insert_item(at, value);
        DEBUG_CURSOR_MOD.then(|| {
            tracing::debug!(message = "Position -> insert_after", at = at);
        });
    }

    /// Insert at the point and stay on the element the point was on, which leaves the
    /// point just after the inserted one.
    pub fn insert_and_advance(&mut self, value: <R::Target as SeqBuffer>::Item) {
        self.insert_before_tracking(value, TrackingMode::Positive);
    }

    /// Remove the element under the point and return it. The point lands on the
    /// successor, or clamps back onto the new last element when the tail was removed.
    ///
    /// # Errors
    ///
    /// [`CursorError::RemoveLastElement`] when only one element is left. Nothing is
    /// removed in that case.
    pub fn remove(&mut self) -> CursorResult<<R::Target as SeqBuffer>::Item> {
        if self.len() <= 1 {
            return Err(CursorError::RemoveLastElement);
        }
        let at = self.index;
        let removed = self
            .buffer
            .remove_item(at)
            .ok_or(CursorError::OutOfRange {
                name: "index",
                value: as_signed(at),
                length: self.len(),
            })?;
        self.index = track_remove(self.index, at, self.len());
        DEBUG_CURSOR_MOD.then(|| {
            tracing::debug!(
                message = "Position -> remove",
                at = at,
                index = self.index,
                len = self.len()
            );
        });
        Ok(removed)
    }
}

impl<R> ScanCursor for Position<R>
where
    R: Deref,
    R::Target: SeqBuffer,
{
    type Item = <R::Target as SeqBuffer>::Item;

    fn current_satisfies(&self, predicate: &mut dyn FnMut(&Self::Item) -> bool) -> bool {
        predicate(self.current())
    }

    fn try_advance(&mut self) -> bool {
        if self.can_move_next() {
            self.index += 1;
            return true;
        }
        false
    }

    fn try_retreat(&mut self) -> bool {
        if self.can_move_previous() {
            self.index -= 1;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GetPosition, assert_eq2};
    use smallvec::{SmallVec, smallvec};
    use std::collections::VecDeque;
    use test_case::test_case;

    #[test]
    fn test_construction_validates() {
        let empty: [u8; 0] = [];
        assert_eq2!(
            Position::new(&empty[..], 0).map(|it| it.index()),
            Err(CursorError::EmptyBacking)
        );
        let items = [1, 2, 3];
        assert!(matches!(
            Position::new(&items[..], 3),
            Err(CursorError::OutOfRange { name: "index", value: 3, length: 3 })
        ));
        assert_eq2!(Position::end(&items[..]).unwrap().index(), 2);
        assert_eq2!(Position::at(&items[..], SeqIndex::FromEnd(3)).unwrap().index(), 0);
    }

    #[test]
    fn test_peek_hard_and_soft() {
        let items = [10, 20, 30, 40];
        let pos = items.position_of(1).unwrap();
        assert_eq2!(pos.peek(2), Ok(&40));
        assert_eq2!(
            pos.peek(-5),
            Err(CursorError::OutOfRange {
                name: "delta",
                value: -5,
                length: 4
            })
        );
        assert_eq2!(pos.try_peek(-5), None);
        assert_eq2!(pos.try_peek(-1), Some(&10));
        assert_eq2!(pos.try_peek(3), None);
    }

    #[test]
    fn test_failed_move_leaves_position_unchanged() {
        let items = [1, 2, 3];
        let mut pos = items.position_of_end().unwrap();
        assert!(pos.move_next().is_err());
        assert!(pos.move_by(-3).is_err());
        assert!(pos.set_index(7).is_err());
        assert_eq2!(pos.index(), 2);
        pos.move_by(-2).unwrap();
        assert!(pos.is_start());
        assert!(pos.move_previous().is_err());
    }

    #[test]
    fn test_before_and_after_are_nearest_first() {
        let items = [1, 2, 3, 4, 5];
        let pos = items.position_of(2).unwrap();
        assert_eq2!(pos.before().copied().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq2!(pos.after().copied().collect::<Vec<_>>(), vec![4, 5]);
        assert_eq2!(pos.all_before(), &[1, 2]);
        assert_eq2!(pos.all_after(), &[4, 5]);
        assert_eq2!(pos.slice(3), Ok(&[3, 4, 5][..]));
        assert!(pos.slice(4).is_err());
    }

    #[test]
    fn test_offset_is_a_sibling() {
        let items = vec![1, 2, 3];
        let pos = items.position_of(0).unwrap();
        let sibling = pos.offset(2).unwrap();
        assert_eq2!(*sibling.current(), 3);
        assert_eq2!(pos.index(), 0);
        assert!(!pos.is_same_position(&sibling));
        assert!(pos.is_same_position(&sibling.offset(-2).unwrap()));

        let copy = items.clone();
        let elsewhere = copy.position_of(0).unwrap();
        assert!(!pos.is_same_position(&elsewhere));
    }

    #[test]
    fn test_write_and_advance_stays_on_last() {
        let mut items = [0; 3];
        let mut pos = items.position_of_mut(0).unwrap();
        for value in 1..=4 {
            pos.write_and_advance(value);
        }
        assert_eq2!(pos.index(), 2);
        assert_eq2!(items, [1, 2, 4]);
    }

    #[test]
    fn test_insert_before_keeps_numeric_index() {
        let mut items = vec![1, 2, 3];
        let mut pos = items.position_of_mut(1).unwrap();
        pos.insert_before(9);
        assert_eq2!((pos.index(), *pos.current()), (1, 9));
        pos.insert_after(8);
        pos.insert_and_advance(7);
        assert_eq2!((pos.index(), *pos.current()), (2, 9));
        assert_eq2!(items, vec![1, 7, 9, 8, 2, 3]);
    }

    #[test_case(0, &[2, 3], 0 ; "head")]
    #[test_case(1, &[1, 3], 1 ; "middle lands on successor")]
    #[test_case(2, &[1, 2], 1 ; "tail clamps")]
    fn test_remove(start: usize, expected: &[i32], expected_index: usize) {
        let mut items: SmallVec<[i32; 4]> = smallvec![1, 2, 3];
        let mut pos = items.position_of_mut(start).unwrap();
        let removed = pos.remove().unwrap();
        assert_eq2!(removed, i32::try_from(start).unwrap() + 1);
        assert_eq2!(pos.index(), expected_index);
        assert_eq2!(items.as_slice(), expected);
    }

    #[test]
    fn test_remove_refuses_the_last_element() {
        let mut items = VecDeque::from([42]);
        let mut pos = items.position_of_mut(0).unwrap();
        assert_eq2!(pos.remove(), Err(CursorError::RemoveLastElement));
        assert_eq2!(items, VecDeque::from([42]));
    }

    #[test]
    fn test_status() {
        let items = [1, 2, 3];
        let mut pos = items.position_of(0).unwrap();
        assert_eq2!(pos.status(), CursorPositionStatus::AtStart);
        pos.move_to_end();
        assert_eq2!(pos.status(), CursorPositionStatus::AtEnd);
        let one = [1];
        assert_eq2!(one.position_of(0).unwrap().status(), CursorPositionStatus::Only);
    }
}
