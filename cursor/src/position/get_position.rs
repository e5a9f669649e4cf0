// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Position, SeqBuffer};
use crate::{CursorResult, SeqIndex};

/// Create a [`Position`] straight from a backing.
///
/// ```
/// use r3bl_cursor::GetPosition;
///
/// let mut items = vec![1, 2, 3];
/// assert_eq!(*items.position_of_end().unwrap().current(), 3);
///
/// let mut pos = items.position_of_mut(0).unwrap();
/// pos.write(10);
/// assert_eq!(items, [10, 2, 3]);
/// ```
pub trait GetPosition: SeqBuffer {
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    ///
    /// [`CursorError::EmptyBacking`]: crate::CursorError::EmptyBacking
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    fn position_of(&self, index: usize) -> CursorResult<Position<&Self>> {
        Position::new(self, index)
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    ///
    /// [`CursorError::EmptyBacking`]: crate::CursorError::EmptyBacking
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    fn position_of_mut(&mut self, index: usize) -> CursorResult<Position<&mut Self>> {
        Position::new(self, index)
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    ///
    /// [`CursorError::EmptyBacking`]: crate::CursorError::EmptyBacking
    fn position_of_start(&self) -> CursorResult<Position<&Self>> { Position::start(self) }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    ///
    /// [`CursorError::EmptyBacking`]: crate::CursorError::EmptyBacking
    fn position_of_end(&self) -> CursorResult<Position<&Self>> {
        Position::at(self, SeqIndex::FromEnd(1))
    }
}

impl<B: SeqBuffer + ?Sized> GetPosition for B {}
