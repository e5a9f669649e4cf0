// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DEBUG_NAVIGATOR_MOD, EditJournal, LinkedEngine, Navigator, StructuralEdit,
            WriteNavigator};
use crate::{CursorError, CursorResult, LinkedSeq, NodeId};
use std::{cell::RefCell,
          fmt::{Debug, Formatter},
          rc::Rc};

/// A [`LinkedSeq`] shared by any number of navigators. Node handles stay valid across
/// edits elsewhere in the sequence, so linked navigators only move when their own node
/// is removed.
pub struct SharedLinkedSeq<T> {
    seq: Rc<RefCell<LinkedSeq<T>>>,
    journal: EditJournal,
}

impl<T> Clone for SharedLinkedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            seq: Rc::clone(&self.seq),
            journal: self.journal.clone(),
        }
    }
}

impl<T> Debug for SharedLinkedSeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedLinkedSeq")
            .field("len", &self.len())
            .field("revision", &self.journal.revision())
            .finish_non_exhaustive()
    }
}

impl<T> Default for SharedLinkedSeq<T> {
    fn default() -> Self { Self::from(LinkedSeq::new()) }
}

impl<T> From<LinkedSeq<T>> for SharedLinkedSeq<T> {
    fn from(seq: LinkedSeq<T>) -> Self {
        Self {
            seq: Rc::new(RefCell::new(seq)),
            journal: EditJournal::new(),
        }
    }
}

impl<T> FromIterator<T> for SharedLinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<LinkedSeq<_>>())
    }
}

impl<T> SharedLinkedSeq<T> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn len(&self) -> usize { self.seq.borrow().len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[must_use]
    pub fn first(&self) -> Option<NodeId> { self.seq.borrow().first() }

    #[must_use]
    pub fn last(&self) -> Option<NodeId> { self.seq.borrow().last() }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool { self.seq.borrow().contains(node) }

    #[must_use]
    pub fn journal(&self) -> &EditJournal { &self.journal }

    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`].
    pub fn push_back(&self, value: T) -> CursorResult<NodeId> {
        let mut seq = self.borrow_seq_mut()?;
        let anchor = seq.last();
        let node = seq.push_back(value);
        drop(seq);
        if let Some(anchor) = anchor {
            self.journal
                .record(StructuralEdit::LinkedInsertedAfter { anchor, node });
        }
        Ok(node)
    }

    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`].
    pub fn push_front(&self, value: T) -> CursorResult<NodeId> {
        let mut seq = self.borrow_seq_mut()?;
        let anchor = seq.first();
        let node = seq.push_front(value);
        drop(seq);
        if let Some(anchor) = anchor {
            self.journal
                .record(StructuralEdit::LinkedInsertedBefore { anchor, node });
        }
        Ok(node)
    }

    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] or [`CursorError::BackingBorrowed`].
    pub fn insert_before(&self, anchor: NodeId, value: T) -> CursorResult<NodeId> {
        let node = self.borrow_seq_mut()?.insert_before(anchor, value)?;
        self.journal
            .record(StructuralEdit::LinkedInsertedBefore { anchor, node });
        DEBUG_NAVIGATOR_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "SharedLinkedSeq -> insert_before",
                anchor = ?anchor,
                node = ?node
            );
        });
        Ok(node)
    }

    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] or [`CursorError::BackingBorrowed`].
    pub fn insert_after(&self, anchor: NodeId, value: T) -> CursorResult<NodeId> {
        let node = self.borrow_seq_mut()?.insert_after(anchor, value)?;
        self.journal
            .record(StructuralEdit::LinkedInsertedAfter { anchor, node });
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(
                message = "SharedLinkedSeq -> insert_after",
                anchor = ?anchor,
                node = ?node
            );
        });
        Ok(node)
    }

    /// Unlink `node` and return its value. Tracking navigators on `node` snap to its
    /// successor, or to its predecessor when it was the tail.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] or [`CursorError::BackingBorrowed`].
    pub fn remove(&self, node: NodeId) -> CursorResult<T> {
        let mut seq = self.borrow_seq_mut()?;
        let successor = match seq.next(node)? {
            Some(next) => Some(next),
            None => seq.prev(node)?,
        };
        let value = seq.remove(node)?;
        drop(seq);
        self.journal
            .record(StructuralEdit::LinkedRemoved { node, successor });
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(
                message = "SharedLinkedSeq -> remove",
                node = ?node,
                successor = ?successor
            );
        });
        Ok(value)
    }

    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] or [`CursorError::BackingBorrowed`].
    pub fn set(&self, node: NodeId, value: T) -> CursorResult<T> {
        let mut seq = self.borrow_seq_mut()?;
        Ok(std::mem::replace(seq.get_mut(node)?, value))
    }

    /// Run `f` against the sequence.
    ///
    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`] when a write is in progress.
    pub fn with_seq<R>(&self, f: impl FnOnce(&LinkedSeq<T>) -> R) -> CursorResult<R> {
        let seq = self
            .seq
            .try_borrow()
            .map_err(|_| CursorError::BackingBorrowed)?;
        Ok(f(&seq))
    }

    pub(crate) fn address(&self) -> usize { Rc::as_ptr(&self.seq).cast::<()>().addr() }

    fn borrow_seq_mut(&self) -> CursorResult<std::cell::RefMut<'_, LinkedSeq<T>>> {
        self.seq
            .try_borrow_mut()
            .map_err(|_| CursorError::BackingBorrowed)
    }
}

impl<T: Clone> SharedLinkedSeq<T> {
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`].
    pub fn get(&self, node: NodeId) -> CursorResult<T> { self.seq.borrow().get(node).cloned() }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T> { self.seq.borrow().iter().cloned().collect() }
}

impl<T: Clone + 'static> SharedLinkedSeq<T> {
    /// A writable navigator on the first node.
    ///
    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`].
    pub fn navigator(&self) -> CursorResult<WriteNavigator<T>> {
        let first = self.first().ok_or(CursorError::EmptyBacking)?;
        self.navigator_at(first)
    }

    /// A writable navigator on `node`.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`].
    pub fn navigator_at(&self, node: NodeId) -> CursorResult<WriteNavigator<T>> {
        let engine = LinkedEngine::new(self.clone(), node)?;
        Ok(WriteNavigator::from_engine(Box::new(engine)))
    }
}
