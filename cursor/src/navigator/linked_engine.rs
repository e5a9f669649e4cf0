// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, DEBUG_NAVIGATOR_MOD, EditJournal, NavigatorEngine, PositionKey,
            SharedLinkedSeq, StructuralEdit};
use crate::{CursorError, CursorResult, LinkedSeq, NodeId, TrackingMode};
use std::fmt::{Debug, Formatter};

/// Engine over a [`SharedLinkedSeq`]: a node handle. Movement walks node links, so
/// `move_by(delta)` and `current_index()` are O(n) while edits at the point are O(1).
pub struct LinkedEngine<T> {
    seq: SharedLinkedSeq<T>,
    node: NodeId,
}

impl<T> Debug for LinkedEngine<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedEngine")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl<T> LinkedEngine<T> {
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] when `node` is not in `seq`.
    pub fn new(seq: SharedLinkedSeq<T>, node: NodeId) -> CursorResult<Self> {
        if !seq.contains(node) {
            return Err(CursorError::DetachedNode { node });
        }
        Ok(Self { seq, node })
    }

    #[must_use]
    pub fn node(&self) -> NodeId { self.node }

    /// The node `delta` links away from the point, if there is one.
    fn node_by(seq: &LinkedSeq<T>, from: NodeId, delta: isize) -> Option<NodeId> {
        let mut node = from;
        for _ in 0..delta.unsigned_abs() {
            let step = if delta > 0 { seq.next(node) } else { seq.prev(node) };
            node = step.ok().flatten()?;
        }
        seq.contains(node).then_some(node)
    }

    fn checked_node_by(&self, delta: isize) -> CursorResult<NodeId> {
        let from = self.node;
        let (found, length) = self
            .seq
            .with_seq(|seq| (Self::node_by(seq, from, delta), seq.len()))?;
        match found {
            Some(node) => Ok(node),
            None if !self.seq.contains(from) => Err(CursorError::DetachedNode { node: from }),
            None => Err(CursorError::OutOfRange {
                name: "delta",
                value: delta,
                length,
            }),
        }
    }
}

impl<T: 'static> NavigatorEngine<T> for LinkedEngine<T> {
    fn capability(&self) -> Capability { Capability::Writable }

    fn len(&self) -> usize { self.seq.len() }

    fn current_index(&self) -> CursorResult<usize> {
        let node = self.node;
        self.seq.with_seq(|seq| seq.index_of(node))?
    }

    fn set_current_index(&mut self, index: usize) -> CursorResult<()> {
        self.node = self.seq.with_seq(|seq| seq.node_at(index))??;
        Ok(())
    }

    fn can_move_by(&self, delta: isize) -> bool { self.checked_node_by(delta).is_ok() }

    fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.node = self.checked_node_by(delta)?;
        Ok(())
    }

    fn visit(&self, delta: isize, visitor: &mut dyn FnMut(&T)) -> CursorResult<()> {
        let node = self.checked_node_by(delta)?;
        self.seq
            .with_seq(|seq| seq.get(node).map(|it| visitor(it)))?
    }

    fn offset(&self, delta: isize) -> CursorResult<Box<dyn NavigatorEngine<T>>> {
        Ok(Box::new(Self {
            seq: self.seq.clone(),
            node: self.checked_node_by(delta)?,
        }))
    }

    fn position_key(&self) -> PositionKey {
        PositionKey::Node {
            backing: self.seq.address(),
            node: self.node,
        }
    }

    fn replace(&mut self, value: T) -> CursorResult<T> { self.seq.set(self.node, value) }

    /// The point stays on its node, which is now after the inserted one.
    fn insert_before(&mut self, value: T) -> CursorResult<()> {
        self.seq.insert_before(self.node, value).map(|_| ())
    }

    fn insert_after(&mut self, value: T) -> CursorResult<()> {
        self.seq.insert_after(self.node, value).map(|_| ())
    }

    /// Unlink the pointed node. The point snaps to the successor, or to the predecessor
    /// when the tail was removed.
    fn remove(&mut self) -> CursorResult<T> {
        if self.seq.len() <= 1 {
            return Err(CursorError::RemoveLastElement);
        }
        let removed = self.node;
        let snap_to = self.seq.with_seq(|seq| -> CursorResult<Option<NodeId>> {
            Ok(match seq.next(removed)? {
                Some(next) => Some(next),
                None => seq.prev(removed)?,
            })
        })??;
        let value = self.seq.remove(removed)?;
        if let Some(snap_to) = snap_to {
            self.node = snap_to;
        }
        DEBUG_NAVIGATOR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "LinkedEngine -> remove",
                removed = ?removed,
                node = ?self.node
            );
        });
        Ok(value)
    }

    fn edit_journal(&self) -> Option<EditJournal> { Some(self.seq.journal().clone()) }

    /// Node handles survive edits elsewhere, so only two edits concern the point: an
    /// insert right before it (which a negative mode follows onto the new node) and
    /// the removal of its own node.
    fn apply_edit(&mut self, edit: &StructuralEdit, mode: TrackingMode) {
        let before = self.node;
        match *edit {
            StructuralEdit::LinkedInsertedBefore { anchor, node }
                if anchor == self.node && mode == TrackingMode::Negative =>
            {
                self.node = node;
            }
            StructuralEdit::LinkedRemoved {
                node,
                successor: Some(successor),
            } if node == self.node => {
                self.node = successor;
            }
            _ => {}
        }
        if DEBUG_NAVIGATOR_MOD && before != self.node {
            tracing::trace!(
                message = "LinkedEngine -> apply_edit",
                edit = ?edit,
                from = ?before,
                to = ?self.node
            );
        }
    }
}
