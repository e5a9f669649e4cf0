// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::DEBUG_CURSOR_MOD;
use crate::{CursorError, CursorPositionStatus, CursorResult, LinkedSeq, NodeId, ScanCursor,
            SeqIndex, TrackingMode};
use std::ops::{Deref, DerefMut};

/// A point on one node of a [`LinkedSeq`], plus the borrow of that sequence.
///
/// The point is a node handle, so moving by one and splicing at the point are O(1),
/// while the absolute index ([`Self::current_index`]) is O(n). As with [`Position`],
/// a shared borrow (`&LinkedSeq<T>`) can only read and move, and an exclusive borrow
/// (`&mut LinkedSeq<T>`) can also write, insert, and remove.
///
/// ```text
/// remove() at B:
///
///   A ⇄ B ⇄ C        A ⇄ C
///       ↑       →        ↑
///     point            point (snaps to the successor, or the predecessor at the tail)
/// ```
///
/// [`Position`]: crate::Position
#[derive(Debug, Clone, Copy)]
pub struct LinkedPosition<R> {
    seq: R,
    node: NodeId,
}

impl<R, T> LinkedPosition<R>
where
    R: Deref<Target = LinkedSeq<T>>,
{
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] when `node` is not in `seq`.
    pub fn new(seq: R, node: NodeId) -> CursorResult<Self> {
        if !seq.contains(node) {
            return Err(CursorError::DetachedNode { node });
        }
        Ok(Self { seq, node })
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    pub fn first(seq: R) -> CursorResult<Self> {
        let node = seq.first().ok_or(CursorError::EmptyBacking)?;
        Ok(Self { seq, node })
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    pub fn last(seq: R) -> CursorResult<Self> {
        let node = seq.last().ok_or(CursorError::EmptyBacking)?;
        Ok(Self { seq, node })
    }

    /// Create a position at an index counted from either end. O(n).
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
    pub fn at(seq: R, at: impl Into<SeqIndex>) -> CursorResult<Self> {
        let index = at.into().resolve(seq.len())?;
        let node = seq.node_at(index)?;
        Ok(Self { seq, node })
    }

    #[must_use]
    pub fn seq(&self) -> &LinkedSeq<T> { &self.seq }

    #[must_use]
    pub fn node(&self) -> NodeId { self.node }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.seq.len() }

    /// Zero-based index of the pointed node. O(n).
    #[must_use]
    pub fn current_index(&self) -> usize { self.seq.index_of(self.node).unwrap_or_default() }

    /// Point at the node at `index`. O(n).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`. The position does not move.
    pub fn set_current_index(&mut self, index: usize) -> CursorResult<()> {
        self.node = self.seq.node_at(index)?;
        Ok(())
    }

    /// Point at another node of the same sequence.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`]. The position does not move.
    pub fn set_node(&mut self, node: NodeId) -> CursorResult<()> {
        if !self.seq.contains(node) {
            return Err(CursorError::DetachedNode { node });
        }
        self.node = node;
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> &T { &self.seq[self.node] }

    #[must_use]
    pub fn status(&self) -> CursorPositionStatus {
        match (self.is_start(), self.is_end()) {
            (true, true) => CursorPositionStatus::Only,
            (true, false) => CursorPositionStatus::AtStart,
            (false, true) => CursorPositionStatus::AtEnd,
            (false, false) => CursorPositionStatus::Within,
        }
    }

    #[must_use]
    pub fn is_start(&self) -> bool { self.seq.first() == Some(self.node) }

    #[must_use]
    pub fn is_end(&self) -> bool { self.seq.last() == Some(self.node) }

    #[must_use]
    pub fn can_move_next(&self) -> bool { !self.is_end() }

    #[must_use]
    pub fn can_move_previous(&self) -> bool { !self.is_start() }

    #[must_use]
    pub fn can_move_by(&self, delta: isize) -> bool { self.node_by(delta).is_some() }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the last node.
    pub fn move_next(&mut self) -> CursorResult<()> { self.move_by(1) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the first node.
    pub fn move_previous(&mut self) -> CursorResult<()> { self.move_by(-1) }

    /// Walk `delta` nodes. O(|delta|).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`. The position does not move.
    pub fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.node = self.checked_node_by(delta)?;
        Ok(())
    }

    pub fn move_to_start(&mut self) {
        if let Some(first) = self.seq.first() {
            self.node = first;
        }
    }

    pub fn move_to_end(&mut self) {
        if let Some(last) = self.seq.last() {
            self.node = last;
        }
    }

    /// A read-only sibling position `delta` nodes away.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn offset(&self, delta: isize) -> CursorResult<LinkedPosition<&LinkedSeq<T>>> {
        Ok(LinkedPosition {
            seq: self.seq(),
            node: self.checked_node_by(delta)?,
        })
    }

    /// The value `delta` nodes away, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn peek(&self, delta: isize) -> CursorResult<&T> {
        let node = self.checked_node_by(delta)?;
        Ok(&self.seq[node])
    }

    #[must_use]
    pub fn try_peek(&self, delta: isize) -> Option<&T> {
        self.node_by(delta).map(|it| &self.seq[it])
    }

    /// Values before the point, nearest first. Lazy.
    pub fn before<'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        self.nodes_before().map(|it| &self.seq[it])
    }

    /// Values after the point, nearest first. Lazy.
    pub fn after<'a>(&'a self) -> impl Iterator<Item = &'a T> + 'a
    where
        T: 'a,
    {
        self.nodes_after().map(|it| &self.seq[it])
    }

    /// Node handles before the point, nearest first.
    pub fn nodes_before<'a>(&'a self) -> impl Iterator<Item = NodeId> + 'a
    where
        T: 'a,
    {
        let seq = self.seq();
        std::iter::successors(seq.prev(self.node).ok().flatten(), move |&it| {
            seq.prev(it).ok().flatten()
        })
    }

    /// Node handles after the point, nearest first.
    pub fn nodes_after<'a>(&'a self) -> impl Iterator<Item = NodeId> + 'a
    where
        T: 'a,
    {
        let seq = self.seq();
        std::iter::successors(seq.next(self.node).ok().flatten(), move |&it| {
            seq.next(it).ok().flatten()
        })
    }

    /// Same node. O(1).
    #[must_use]
    pub fn is_same_node<R2>(&self, other: &LinkedPosition<R2>) -> bool
    where
        R2: Deref<Target = LinkedSeq<T>>,
    {
        std::ptr::eq(self.seq(), other.seq.deref()) && self.node == other.node
    }

    fn node_by(&self, delta: isize) -> Option<NodeId> {
        let steps = delta.unsigned_abs();
        match steps {
            0 => Some(self.node),
            _ if delta > 0 => self.nodes_after().nth(steps - 1),
            _ => self.nodes_before().nth(steps - 1),
        }
    }

    fn checked_node_by(&self, delta: isize) -> CursorResult<NodeId> {
        self.node_by(delta).ok_or(CursorError::OutOfRange {
            name: "delta",
            value: delta,
            length: self.len(),
        })
    }
}

impl<R, T> LinkedPosition<R>
where
    R: DerefMut<Target = LinkedSeq<T>>,
{
    pub fn current_mut(&mut self) -> &mut T { &mut self.seq[self.node] }

    /// Replace the value under the point.
    pub fn write(&mut self, value: T) { *self.current_mut() = value; }

    /// Splice `value` in before the point. The point stays on its node. O(1).
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] only if the point was already detached, which an
    /// exclusive borrow rules out.
    pub fn insert_before(&mut self, value: T) -> CursorResult<NodeId> {
        self.insert_before_tracking(value, TrackingMode::Positive)
    }

    /// Splice `value` in before the point, and let `mode` decide whether the point
    /// moves onto the new node ([`TrackingMode::Negative`], so the index stays the same)
    /// or stays on its node ([`TrackingMode::Positive`]).
    ///
    /// # Errors
    ///
    /// See [`Self::insert_before`].
    pub fn insert_before_tracking(
        &mut self,
        value: T,
        mode: TrackingMode,
    ) -> CursorResult<NodeId> {
        let inserted = self.seq.insert_before(self.node, value)?;
        if mode == TrackingMode::Negative {
            self.node = inserted;
        }
        DEBUG_CURSOR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "LinkedPosition -> insert_before",
                inserted = ?inserted,
                mode = %mode,
                node = ?self.node
            );
        });
        Ok(inserted)
    }

    /// Splice `value` in after the point. The point stays on its node. O(1).
    ///
    /// # Errors
    ///
    /// See [`Self::insert_before`].
    pub fn insert_after(&mut self, value: T) -> CursorResult<NodeId> {
        let inserted = self.seq.insert_after(self.node, value)?;
        DEBUG_CURSOR_MOD.then(|| {
            tracing::debug!(message = "LinkedPosition -> insert_after", inserted = ?inserted);
        });
        Ok(inserted)
    }

    /// Unlink the pointed node and return its value. The point snaps to the successor,
    /// or to the predecessor when the tail was removed. O(1).
    ///
    /// # Errors
    ///
    /// [`CursorError::RemoveLastElement`] when only one node is left. Nothing is removed
    /// in that case.
    pub fn remove(&mut self) -> CursorResult<T> {
        if self.seq.len() <= 1 {
            return Err(CursorError::RemoveLastElement);
        }
        let removed = self.node;
        let snap_to = match self.seq.next(removed)? {
            Some(next) => next,
            None => self.seq.prev(removed)?.ok_or(CursorError::RemoveLastElement)?,
        };
        let value = self.seq.remove(removed)?;
        self.node = snap_to;
        DEBUG_CURSOR_MOD.then(|| {
            tracing::debug!(
                message = "LinkedPosition -> remove",
                removed = ?removed,
                node = ?self.node
            );
        });
        Ok(value)
    }
}

impl<R, T> ScanCursor for LinkedPosition<R>
where
    R: Deref<Target = LinkedSeq<T>>,
{
    type Item = T;

    fn current_satisfies(&self, predicate: &mut dyn FnMut(&T) -> bool) -> bool {
        predicate(self.current())
    }

    fn try_advance(&mut self) -> bool { self.move_next().is_ok() }

    fn try_retreat(&mut self) -> bool { self.move_previous().is_ok() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    fn abc() -> LinkedSeq<char> { LinkedSeq::from_iter(['a', 'b', 'c']) }

    #[test]
    fn test_remove_middle_snaps_to_successor() {
        let mut seq = abc();
        let mut pos = LinkedPosition::at(&mut seq, SeqIndex::FromStart(1)).unwrap();
        assert_eq2!(pos.remove(), Ok('b'));
        assert_eq2!(*pos.current(), 'c');
        assert_eq2!(pos.try_peek(-1), Some(&'a'));
        assert_eq2!(seq.iter().collect::<String>(), "ac");
    }

    #[test]
    fn test_remove_tail_snaps_to_predecessor() {
        let mut seq = abc();
        let mut pos = LinkedPosition::last(&mut seq).unwrap();
        assert_eq2!(pos.remove(), Ok('c'));
        assert_eq2!(*pos.current(), 'b');
        assert!(pos.is_end());
    }

    #[test]
    fn test_remove_refuses_the_last_node() {
        let mut seq = LinkedSeq::from_iter([1]);
        let mut pos = LinkedPosition::first(&mut seq).unwrap();
        assert_eq2!(pos.remove(), Err(CursorError::RemoveLastElement));
        assert_eq2!(seq.len(), 1);
    }

    #[test]
    fn test_insert_keeps_node_unless_negative() {
        let mut seq = abc();
        let mut pos = LinkedPosition::at(&mut seq, SeqIndex::FromStart(1)).unwrap();
        pos.insert_before('x').unwrap();
        assert_eq2!((*pos.current(), pos.current_index()), ('b', 2));
        pos.insert_after('y').unwrap();
        let inserted = pos.insert_before_tracking('z', TrackingMode::Negative).unwrap();
        assert_eq2!(pos.node(), inserted);
        assert_eq2!(pos.current_index(), 2);
        assert_eq2!(seq.iter().collect::<String>(), "axzbyc");
    }

    #[test]
    fn test_movement_and_peek() {
        let seq = LinkedSeq::from_iter([10, 20, 30, 40]);
        let mut pos = LinkedPosition::first(&seq).unwrap();
        assert_eq2!(pos.peek(3), Ok(&40));
        assert_eq2!(pos.try_peek(-1), None);
        assert!(matches!(
            pos.peek(4),
            Err(CursorError::OutOfRange { name: "delta", value: 4, length: 4 })
        ));
        pos.move_by(2).unwrap();
        assert_eq2!(pos.current_index(), 2);
        assert!(pos.move_by(2).is_err());
        assert_eq2!(pos.current_index(), 2);
        assert_eq2!(pos.before().copied().collect::<Vec<_>>(), vec![20, 10]);
        assert_eq2!(pos.after().copied().collect::<Vec<_>>(), vec![40]);
        assert_eq2!(pos.status(), CursorPositionStatus::Within);
    }

    #[test]
    fn test_walks_over_borrowed_items() {
        let text = String::from("one two three four");
        let seq = text.split(' ').collect::<LinkedSeq<&str>>();
        let pos = LinkedPosition::at(&seq, SeqIndex::FromStart(1)).unwrap();
        assert_eq2!(pos.before().copied().collect::<Vec<_>>(), vec!["one"]);
        assert_eq2!(pos.after().copied().collect::<Vec<_>>(), vec!["three", "four"]);
        let nodes = pos.nodes_after().collect::<Vec<_>>();
        assert_eq2!(nodes.len(), 2);
        assert_eq2!(seq.index_of(nodes[1]), Ok(3));
        assert_eq2!(pos.nodes_before().next(), seq.first());
    }

    #[test]
    fn test_identity() {
        let seq = LinkedSeq::from_iter([7, 7]);
        let first = LinkedPosition::first(&seq).unwrap();
        let last = LinkedPosition::last(&seq).unwrap();
        assert_eq2!(first.current(), last.current());
        assert!(!first.is_same_node(&last));
        assert!(first.is_same_node(&last.offset(-1).unwrap()));
    }

    #[test]
    fn test_detached_node_is_rejected() {
        let mut seq = abc();
        let first = seq.first().unwrap();
        seq.remove(first).unwrap();
        assert!(matches!(
            LinkedPosition::new(&seq, first),
            Err(CursorError::DetachedNode { .. })
        ));
        let empty = LinkedSeq::<char>::new();
        assert!(matches!(
            LinkedPosition::first(&empty),
            Err(CursorError::EmptyBacking)
        ));
    }

    #[test]
    fn test_scan() {
        let seq = LinkedSeq::from_iter("a1b2".chars());
        let mut pos = LinkedPosition::first(&seq).unwrap();
        assert_eq2!(pos.scan_forward_while(|it| !it.is_ascii_digit()), 1);
        assert_eq2!(pos.scan_forward_to(&'2'), 2);
        assert_eq2!(pos.scan_backward_to_any(&['a', 'b']), 1);
        assert_eq2!(*pos.current(), 'b');
    }
}
