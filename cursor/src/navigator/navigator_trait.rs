// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, NavigatorEngine, Nodes, Values};
use crate::{CursorError, CursorResult, as_signed};

/// Everything a navigator of any capability can do. The three facades
/// ([`ReadNavigator`], [`EditNavigator`], [`WriteNavigator`]) implement the required
/// methods and get the rest for free.
///
/// Operations that produce sibling navigators (`offset`, `next`, `nodes_after`, ...)
/// return the same facade type as `self`, so a [`WriteNavigator`] hands out
/// [`WriteNavigator`]s and a [`ReadNavigator`] hands out [`ReadNavigator`]s.
///
/// Values are returned by clone. Use [`Navigator::with_current`] to look at the
/// current element in place.
///
/// [`ReadNavigator`]: crate::ReadNavigator
/// [`EditNavigator`]: crate::EditNavigator
/// [`WriteNavigator`]: crate::WriteNavigator
pub trait Navigator<T: Clone + 'static>: Sized {
    fn from_engine(engine: Box<dyn NavigatorEngine<T>>) -> Self;

    fn engine(&self) -> &dyn NavigatorEngine<T>;

    fn engine_mut(&mut self) -> &mut dyn NavigatorEngine<T>;

    fn capability(&self) -> Capability { self.engine().capability() }

    /// Live length of the backing.
    fn len(&self) -> usize { self.engine().len() }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::DetachedNode`] when an untracked
    /// navigator's point was removed from under it.
    fn current_index(&self) -> CursorResult<usize> { self.engine().current_index() }

    /// # Errors
    ///
    /// See [`Navigator::peek`].
    fn current(&self) -> CursorResult<T> { self.peek(0) }

    /// Run `f` on the current element without cloning it.
    ///
    /// # Errors
    ///
    /// See [`Navigator::peek`].
    fn with_current<R>(&self, f: impl FnOnce(&T) -> R) -> CursorResult<R> {
        let mut f = Some(f);
        let mut result = None;
        self.engine().visit(0, &mut |it| {
            if let Some(f) = f.take() {
                result = Some(f(it));
            }
        })?;
        result.ok_or_else(|| self.delta_out_of_range(0))
    }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`. The point does not move.
    fn set_current_index(&mut self, index: usize) -> CursorResult<()> {
        self.engine_mut().set_current_index(index)
    }

    /// Same as [`Navigator::set_current_index`].
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`.
    fn move_to(&mut self, index: usize) -> CursorResult<()> { self.set_current_index(index) }

    fn can_move_by(&self, delta: isize) -> bool { self.engine().can_move_by(delta) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`. The point does not move.
    fn move_by(&mut self, delta: isize) -> CursorResult<()> { self.engine_mut().move_by(delta) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    fn move_forward(&mut self, count: usize) -> CursorResult<()> {
        self.move_by(as_signed(count))
    }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    fn move_backward(&mut self, count: usize) -> CursorResult<()> {
        self.move_by(-as_signed(count))
    }

    /// The element `delta` away from the point (`0` is the point), without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`, or [`CursorError::BackingBorrowed`]
    /// when called from a callback that is writing to the same backing.
    fn peek(&self, delta: isize) -> CursorResult<T> {
        let mut value = None;
        self.engine()
            .visit(delta, &mut |it| value = Some(it.clone()))?;
        value.ok_or_else(|| self.delta_out_of_range(delta))
    }

    /// Soft form of [`Navigator::peek`].
    fn try_peek(&self, delta: isize) -> Option<T> { self.peek(delta).ok() }

    /// An untracked sibling navigator `delta` away from the point.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    fn offset(&self, delta: isize) -> CursorResult<Self> {
        Ok(Self::from_engine(self.engine().offset(delta)?))
    }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the first element.
    fn previous(&self) -> CursorResult<Self> { self.offset(-1) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the last element.
    fn next(&self) -> CursorResult<Self> { self.offset(1) }

    /// Values before the point, nearest first.
    fn before(&self) -> Values<T> { Values::new(self.engine(), -1, -1) }

    /// Values after the point, nearest first.
    fn after(&self) -> Values<T> { Values::new(self.engine(), 1, 1) }

    fn before_and_self(&self) -> Values<T> { Values::new(self.engine(), 0, -1) }

    fn after_and_self(&self) -> Values<T> { Values::new(self.engine(), 0, 1) }

    /// Navigators on the elements before the point, nearest first. Removing the
    /// navigator just yielded does not disturb the walk.
    fn nodes_before(&self) -> Nodes<Self, T> { Nodes::new(self.engine(), -1, -1) }

    /// Navigators on the elements after the point, nearest first. Removing the
    /// navigator just yielded does not disturb the walk.
    fn nodes_after(&self) -> Nodes<Self, T> { Nodes::new(self.engine(), 1, 1) }

    fn nodes_before_and_self(&self) -> Nodes<Self, T> { Nodes::new(self.engine(), 0, -1) }

    fn nodes_after_and_self(&self) -> Nodes<Self, T> { Nodes::new(self.engine(), 0, 1) }

    /// Same backing and same element. O(1), compares identity and never values.
    fn is_same_position(&self, other: &impl Navigator<T>) -> bool {
        self.engine().position_key() == other.engine().position_key()
    }

    /// Fallible form of [`ScanCursor::scan_forward_while`]. The soft scans treat an
    /// unreadable point as a stop; this one reports it.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::DetachedNode`] when an untracked
    /// navigator's point was removed from under it, [`CursorError::BackingBorrowed`]
    /// when the backing is being written. The point stays where the error was hit.
    ///
    /// [`ScanCursor::scan_forward_while`]: crate::ScanCursor::scan_forward_while
    fn try_scan_forward_while(
        &mut self,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> CursorResult<usize> {
        self.try_scan_while(1, &mut predicate)
    }

    /// # Errors
    ///
    /// See [`Navigator::try_scan_forward_while`].
    fn try_scan_backward_while(
        &mut self,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> CursorResult<usize> {
        self.try_scan_while(-1, &mut predicate)
    }

    /// # Errors
    ///
    /// See [`Navigator::try_scan_forward_while`].
    fn try_scan_forward_to(&mut self, target: &T) -> CursorResult<usize>
    where
        T: PartialEq,
    {
        self.try_scan_forward_while(|it| it != target)
    }

    /// # Errors
    ///
    /// See [`Navigator::try_scan_forward_while`].
    fn try_scan_backward_to(&mut self, target: &T) -> CursorResult<usize>
    where
        T: PartialEq,
    {
        self.try_scan_backward_while(|it| it != target)
    }

    /// # Errors
    ///
    /// See [`Navigator::try_scan_forward_while`].
    fn try_scan_forward_to_any(&mut self, targets: &[T]) -> CursorResult<usize>
    where
        T: PartialEq,
    {
        self.try_scan_forward_while(|it| !targets.contains(it))
    }

    /// # Errors
    ///
    /// See [`Navigator::try_scan_forward_while`].
    fn try_scan_backward_to_any(&mut self, targets: &[T]) -> CursorResult<usize>
    where
        T: PartialEq,
    {
        self.try_scan_backward_while(|it| !targets.contains(it))
    }

    #[doc(hidden)]
    fn try_scan_while(
        &mut self,
        step: isize,
        predicate: &mut dyn FnMut(&T) -> bool,
    ) -> CursorResult<usize> {
        let mut moved = 0;
        loop {
            let mut satisfied = false;
            self.engine().visit(0, &mut |it| satisfied = predicate(it))?;
            if !satisfied || !self.engine().can_move_by(step) {
                return Ok(moved);
            }
            self.engine_mut().move_by(step)?;
            moved += 1;
        }
    }

    #[doc(hidden)]
    fn delta_out_of_range(&self, delta: isize) -> CursorError {
        CursorError::OutOfRange {
            name: "delta",
            value: delta,
            length: self.len(),
        }
    }
}
