// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::NodeId;
use crate::{CursorError, CursorResult, validate_index};
use std::{fmt::{Debug, Formatter},
          ops::{Index, IndexMut}};

#[derive(Clone)]
struct Slot<T> {
    /// `None` while the slot sits on the free list.
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
    generation: u32,
}

/// Doubly-linked sequence with O(1) insertion and removal at any node.
///
/// ```
/// use r3bl_cursor::LinkedSeq;
///
/// let mut seq = LinkedSeq::from_iter(['a', 'c']);
/// let a = seq.first().unwrap();
/// let b = seq.insert_after(a, 'b').unwrap();
/// assert_eq!(seq.iter().collect::<String>(), "abc");
///
/// assert_eq!(seq.remove(b), Ok('b'));
/// assert!(!seq.contains(b));
/// assert!(seq.get(b).is_err());
/// ```
#[derive(Clone)]
pub struct LinkedSeq<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for LinkedSeq<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<T> LinkedSeq<T> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[must_use]
    pub fn first(&self) -> Option<NodeId> { self.head.map(|it| self.id_of(it)) }

    #[must_use]
    pub fn last(&self) -> Option<NodeId> { self.tail.map(|it| self.id_of(it)) }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool { self.attached_slot(node).is_ok() }

    /// The node after `node`, or `None` if `node` is the last one.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn next(&self, node: NodeId) -> CursorResult<Option<NodeId>> {
        let slot = self.attached_slot(node)?;
        Ok(self.slots[slot].next.map(|it| self.id_of(it)))
    }

    /// The node before `node`, or `None` if `node` is the first one.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn prev(&self, node: NodeId) -> CursorResult<Option<NodeId>> {
        let slot = self.attached_slot(node)?;
        Ok(self.slots[slot].prev.map(|it| self.id_of(it)))
    }

    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn get(&self, node: NodeId) -> CursorResult<&T> {
        let slot = self.attached_slot(node)?;
        self.slots[slot]
            .value
            .as_ref()
            .ok_or(CursorError::DetachedNode { node })
    }

    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn get_mut(&mut self, node: NodeId) -> CursorResult<&mut T> {
        let slot = self.attached_slot(node)?;
        self.slots[slot]
            .value
            .as_mut()
            .ok_or(CursorError::DetachedNode { node })
    }

    pub fn push_front(&mut self, value: T) -> NodeId {
        let slot = self.allocate(value);
        self.link(slot, None, self.head);
        self.id_of(slot)
    }

    pub fn push_back(&mut self, value: T) -> NodeId {
        let slot = self.allocate(value);
        self.link(slot, self.tail, None);
        self.id_of(slot)
    }

    /// Insert `value` immediately before `anchor` and return the new node.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `anchor` is not in this sequence. Nothing is
    /// inserted in that case.
    pub fn insert_before(&mut self, anchor: NodeId, value: T) -> CursorResult<NodeId> {
        let anchor_slot = self.attached_slot(anchor)?;
        let prev = self.slots[anchor_slot].prev;
        let slot = self.allocate(value);
        self.link(slot, prev, Some(anchor_slot));
        Ok(self.id_of(slot))
    }

    /// Insert `value` immediately after `anchor` and return the new node.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `anchor` is not in this sequence. Nothing is
    /// inserted in that case.
    pub fn insert_after(&mut self, anchor: NodeId, value: T) -> CursorResult<NodeId> {
        let anchor_slot = self.attached_slot(anchor)?;
        let next = self.slots[anchor_slot].next;
        let slot = self.allocate(value);
        self.link(slot, Some(anchor_slot), next);
        Ok(self.id_of(slot))
    }

    /// Unlink `node` and hand back its value. The handle (and every copy of it) is
    /// detached from then on.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn remove(&mut self, node: NodeId) -> CursorResult<T> {
        let slot = self.attached_slot(node)?;
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);

        match prev {
            Some(it) => self.slots[it].next = next,
            None => self.head = next,
        }
        match next {
            Some(it) => self.slots[it].prev = prev,
            None => self.tail = prev,
        }

        let removed = &mut self.slots[slot];
        removed.prev = None;
        removed.next = None;
        let value = removed.value.take();
        // A slot whose generation can't be bumped again is retired, never reused.
        if let Some(generation) = removed.generation.checked_add(1) {
            removed.generation = generation;
            self.free.push(slot);
        }
        self.len -= 1;
        value.ok_or(CursorError::DetachedNode { node })
    }

    /// Zero-based position of `node`, counted from the first node. O(n).
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] if `node` is not in this sequence.
    pub fn index_of(&self, node: NodeId) -> CursorResult<usize> {
        let mut slot = self.attached_slot(node)?;
        let mut index = 0;
        while let Some(prev) = self.slots[slot].prev {
            slot = prev;
            index += 1;
        }
        Ok(index)
    }

    /// Node at the zero-based `index`. O(n), walking from whichever end is closer.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if `index` is not in `[0, len)`.
    pub fn node_at(&self, index: usize) -> CursorResult<NodeId> {
        let index = validate_index(index, self.len)?;
        let node = if index <= self.len / 2 {
            self.node_ids().nth(index)
        } else {
            self.node_ids_rev().nth(self.len - 1 - index)
        };
        node.ok_or(CursorError::OutOfRange {
            name: "index",
            value: crate::as_signed(index),
            length: self.len,
        })
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Node handles from first to last.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first(), |&it| self.next(it).ok().flatten())
    }

    /// Node handles from last to first.
    pub fn node_ids_rev(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.last(), |&it| self.prev(it).ok().flatten())
    }

    fn id_of(&self, slot: usize) -> NodeId {
        NodeId {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    fn attached_slot(&self, node: NodeId) -> CursorResult<usize> {
        match self.slots.get(node.slot) {
            Some(it) if it.generation == node.generation && it.value.is_some() => {
                Ok(node.slot)
            }
            _ => Err(CursorError::DetachedNode { node }),
        }
    }

    fn allocate(&mut self, value: T) -> usize {
        if let Some(slot) = self.free.pop() {
            self.slots[slot].value = Some(value);
            slot
        } else {
            self.slots.push(Slot {
                value: Some(value),
                prev: None,
                next: None,
                generation: 0,
            });
            self.slots.len() - 1
        }
    }

    fn link(&mut self, slot: usize, prev: Option<usize>, next: Option<usize>) {
        self.slots[slot].prev = prev;
        self.slots[slot].next = next;
        match prev {
            Some(it) => self.slots[it].next = Some(slot),
            None => self.head = Some(slot),
        }
        match next {
            Some(it) => self.slots[it].prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.len += 1;
    }
}

/// # Panics
///
/// If `node` is not in this sequence. Use [`LinkedSeq::get`] to probe.
impl<T> Index<NodeId> for LinkedSeq<T> {
    type Output = T;

    fn index(&self, node: NodeId) -> &T {
        match self.get(node) {
            Ok(it) => it,
            Err(error) => panic!("{error}"),
        }
    }
}

/// # Panics
///
/// If `node` is not in this sequence. Use [`LinkedSeq::get_mut`] to probe.
impl<T> IndexMut<NodeId> for LinkedSeq<T> {
    fn index_mut(&mut self, node: NodeId) -> &mut T {
        match self.get_mut(node) {
            Ok(it) => it,
            Err(error) => panic!("{error}"),
        }
    }
}

/// Values from first to last (or last to first via [`DoubleEndedIterator`]).
#[derive(Debug)]
pub struct Iter<'a, T> {
    seq: &'a LinkedSeq<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.seq.slots[self.front?];
        self.front = slot.next;
        self.remaining -= 1;
        slot.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.remaining, Some(self.remaining)) }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = &self.seq.slots[self.back?];
        self.back = slot.prev;
        self.remaining -= 1;
        slot.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T> FromIterator<T> for LinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Debug> Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Sequences are equal when they hold equal values in the same order. Node handles and
/// slot layout are not compared.
impl<T: PartialEq> PartialEq for LinkedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSeq<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_exhausted_slot_is_retired() {
        let mut seq = LinkedSeq::from_iter(['a', 'b']);
        let first_slot = seq.first().unwrap().slot;
        seq.slots[first_slot].generation = u32::MAX;
        let a = seq.first().unwrap();
        assert_eq2!(a.generation(), u32::MAX);

        assert_eq2!(seq.remove(a), Ok('a'));
        let c = seq.push_back('c');
        assert!(c.slot != a.slot);
        assert!(!seq.contains(a));
        assert!(seq.get(a).is_err());
        assert_eq2!(seq.iter().collect::<String>(), "bc");
    }

    fn values(seq: &LinkedSeq<char>) -> String { seq.iter().collect() }

    #[test]
    fn test_push_and_insert() {
        let mut seq = LinkedSeq::new();
        let b = seq.push_back('b');
        seq.push_front('a');
        seq.push_back('d');
        let c = seq.insert_after(b, 'c').unwrap();
        seq.insert_before(c, '_').unwrap();
        assert_eq2!(values(&seq), "ab_cd");
        assert_eq2!(seq.len(), 5);
        assert_eq2!(seq.iter().rev().collect::<String>(), "dc_ba");
    }

    #[test]
    fn test_remove_relinks_neighbors() {
        let mut seq = LinkedSeq::from_iter(['a', 'b', 'c']);
        let a = seq.first().unwrap();
        let b = seq.next(a).unwrap().unwrap();
        let c = seq.last().unwrap();

        assert_eq2!(seq.remove(b), Ok('b'));
        assert_eq2!(seq.next(a), Ok(Some(c)));
        assert_eq2!(seq.prev(c), Ok(Some(a)));

        assert_eq2!(seq.remove(a), Ok('a'));
        assert_eq2!(seq.first(), Some(c));
        assert_eq2!(seq.remove(c), Ok('c'));
        assert!(seq.is_empty());
        assert_eq2!(seq.first(), None);
        assert_eq2!(seq.last(), None);
    }

    #[test]
    fn test_stale_handle_is_detected_after_slot_reuse() {
        let mut seq = LinkedSeq::from_iter([1, 2]);
        let first = seq.first().unwrap();
        seq.remove(first).unwrap();
        let reused = seq.push_back(3);

        assert_eq2!(reused.slot(), first.slot());
        assert!(reused != first);
        assert_eq2!(seq.get(first), Err(CursorError::DetachedNode { node: first }));
        assert_eq2!(seq.insert_before(first, 9), Err(CursorError::DetachedNode { node: first }));
        assert_eq2!(seq.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_index_of_and_node_at_agree() {
        let seq = LinkedSeq::from_iter(0..7);
        for index in 0..7 {
            let node = seq.node_at(index).unwrap();
            assert_eq2!(seq.index_of(node), Ok(index));
            assert_eq2!(seq.get(node), Ok(&index));
        }
        assert!(matches!(seq.node_at(7), Err(CursorError::OutOfRange { .. })));
    }

    #[test]
    fn test_equality_ignores_layout() {
        let mut left = LinkedSeq::from_iter([1, 2, 3]);
        let first = left.first().unwrap();
        left.remove(first).unwrap();
        left.push_front(1);
        assert_eq2!(left, LinkedSeq::from_iter([1, 2, 3]));
        assert_eq2!(format!("{left:?}"), "[1, 2, 3]");
    }

    #[test]
    #[should_panic(expected = "is not attached to this sequence")]
    fn test_index_panics_on_a_detached_node() {
        let mut seq = LinkedSeq::from_iter([1, 2]);
        let first = seq.first().unwrap();
        seq.remove(first).unwrap();
        let _value: i32 = seq[first];
    }

    #[test]
    fn test_get_mut() {
        let mut seq = LinkedSeq::from_iter([1, 2]);
        let last = seq.last().unwrap();
        *seq.get_mut(last).unwrap() = 20;
        assert_eq2!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 20]);
    }
}
