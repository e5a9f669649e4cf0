// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Forward and backward scans, built once for every cursor kind.
//!
//! All "find" operations are expressed with a single `while` primitive per direction
//! and a derived predicate, so forward and backward scans share one termination rule
//! and one landing convention:
//!
//! ```text
//! scan_forward_to(&'c') from index 0:
//!
//!   0   1   2   3   4
//! ┌───┬───┬───┬───┬───┐
//! │ a │ b │ c │ d │ c │
//! └───┴───┴───┴───┴───┘
//!   ↑ ──────→ ↑
//! start      lands ON the first match (moved 2)
//!
//! scan_forward_while(|_| true) from index 0:
//!
//!   0   1   2   3   4
//! ┌───┬───┬───┬───┬───┐
//! │ a │ b │ c │ d │ c │
//! └───┴───┴───┴───┴───┘
//!   ↑ ──────────────→ ↑
//! start              lands ON the last element (moved 4), never past it
//! ```
//!
//! The end of the backing is an absorbing stop, not an error.

/// The minimal contract a cursor has to satisfy to get every scan operation for free.
///
/// The three required methods are object safe (the predicate is passed as
/// `&mut dyn FnMut`), so a cursor backed by a `dyn` engine can implement them by
/// delegation.
pub trait ScanCursor {
    type Item;

    /// Run `predicate` against the element under the cursor.
    fn current_satisfies(&self, predicate: &mut dyn FnMut(&Self::Item) -> bool) -> bool;

    /// Move one element toward the end. Returns `false` (and does not move) when the
    /// cursor is already on the last element.
    fn try_advance(&mut self) -> bool;

    /// Move one element toward the start. Returns `false` (and does not move) when the
    /// cursor is already on the first element.
    fn try_retreat(&mut self) -> bool;

    /// Advance while `predicate` holds for the current element. Returns the number of
    /// positions moved.
    fn scan_forward_while(&mut self, mut predicate: impl FnMut(&Self::Item) -> bool) -> usize
    where
        Self: Sized,
    {
        let mut moved = 0;
        while self.current_satisfies(&mut predicate) && self.try_advance() {
            moved += 1;
        }
        moved
    }

    /// Retreat while `predicate` holds for the current element. Returns the number of
    /// positions moved.
    fn scan_backward_while(&mut self, mut predicate: impl FnMut(&Self::Item) -> bool) -> usize
    where
        Self: Sized,
    {
        let mut moved = 0;
        while self.current_satisfies(&mut predicate) && self.try_retreat() {
            moved += 1;
        }
        moved
    }

    fn scan_forward_to(&mut self, target: &Self::Item) -> usize
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        self.scan_forward_while(|it| it != target)
    }

    fn scan_forward_to_by(
        &mut self,
        target: &Self::Item,
        mut eq: impl FnMut(&Self::Item, &Self::Item) -> bool,
    ) -> usize
    where
        Self: Sized,
    {
        self.scan_forward_while(|it| !eq(it, target))
    }

    fn scan_forward_to_any(&mut self, targets: &[Self::Item]) -> usize
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        self.scan_forward_while(|it| !targets.contains(it))
    }

    fn scan_forward_to_any_by(
        &mut self,
        targets: &[Self::Item],
        mut eq: impl FnMut(&Self::Item, &Self::Item) -> bool,
    ) -> usize
    where
        Self: Sized,
    {
        self.scan_forward_while(|it| !targets.iter().any(|target| eq(it, target)))
    }

    fn scan_backward_to(&mut self, target: &Self::Item) -> usize
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        self.scan_backward_while(|it| it != target)
    }

    fn scan_backward_to_by(
        &mut self,
        target: &Self::Item,
        mut eq: impl FnMut(&Self::Item, &Self::Item) -> bool,
    ) -> usize
    where
        Self: Sized,
    {
        self.scan_backward_while(|it| !eq(it, target))
    }

    fn scan_backward_to_any(&mut self, targets: &[Self::Item]) -> usize
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        self.scan_backward_while(|it| !targets.contains(it))
    }

    fn scan_backward_to_any_by(
        &mut self,
        targets: &[Self::Item],
        mut eq: impl FnMut(&Self::Item, &Self::Item) -> bool,
    ) -> usize
    where
        Self: Sized,
    {
        self.scan_backward_while(|it| !targets.iter().any(|target| eq(it, target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GetPosition, assert_eq2};

    #[test]
    fn test_scan_forward_while_stops_on_first_failing_element() {
        let items = [1, 3, 5, 6, 7];
        let mut pos = items.position_of(0).unwrap();
        assert_eq2!(pos.scan_forward_while(|it| it % 2 == 1), 3);
        assert_eq2!(pos.index(), 3);
        assert_eq2!(*pos.current(), 6);
    }

    #[test]
    fn test_scan_forward_while_always_true_ends_on_last() {
        let items = ['a', 'b', 'c'];
        let mut pos = items.position_of(0).unwrap();
        assert_eq2!(pos.scan_forward_while(|_| true), 2);
        assert_eq2!(pos.index(), 2);
        // Absorbing: scanning again does not move.
        assert_eq2!(pos.scan_forward_while(|_| true), 0);
    }

    #[test]
    fn test_scan_to_is_idempotent_on_a_match() {
        let items = [10, 20, 30, 20];
        let mut pos = items.position_of(1).unwrap();
        assert_eq2!(pos.scan_forward_to(&20), 0);
        assert_eq2!(pos.index(), 1);
    }

    #[test]
    fn test_scan_to_absent_target_stops_at_end() {
        let items = [10, 20, 30];
        let mut pos = items.position_of(0).unwrap();
        assert_eq2!(pos.scan_forward_to(&99), 2);
        assert_eq2!(pos.index(), 2);
    }

    #[test]
    fn test_scan_to_any() {
        let items = "let x = 1;".chars().collect::<Vec<_>>();
        let mut pos = items.position_of(0).unwrap();
        assert_eq2!(pos.scan_forward_to_any(&['=', ';']), 6);
        assert_eq2!(*pos.current(), '=');
        pos.move_next().unwrap();
        assert_eq2!(pos.scan_forward_to_any(&['=', ';']), 2);
        assert_eq2!(*pos.current(), ';');
    }

    #[test]
    fn test_scan_with_comparer() {
        let items = ["Foo", "bar", "BAZ"];
        let mut pos = items.position_of(0).unwrap();
        let moved = pos.scan_forward_to_by(&"baz", |a, b| a.eq_ignore_ascii_case(b));
        assert_eq2!(moved, 2);

        let moved =
            pos.scan_backward_to_any_by(&["FOO"], |a, b| a.eq_ignore_ascii_case(b));
        assert_eq2!(moved, 2);
        assert_eq2!(pos.index(), 0);
    }

    #[test]
    fn test_scan_backward_mirrors_forward() {
        let items = [0, 1, 0, 1, 1];
        let mut pos = items.position_of(4).unwrap();
        assert_eq2!(pos.scan_backward_while(|it| *it == 1), 2);
        assert_eq2!(pos.index(), 2);
        assert_eq2!(pos.scan_backward_to(&7), 2);
        assert_eq2!(pos.index(), 0);
        assert_eq2!(pos.scan_backward_to_any(&[3, 4]), 0);
    }
}
