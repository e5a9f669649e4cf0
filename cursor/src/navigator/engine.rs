// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Capability, EditJournal, StructuralEdit};
use crate::{CursorError, CursorResult, NodeId, TrackingMode};

/// Identity of the place a navigator points at. Two navigators are at the same position
/// iff their keys are equal, which is an O(1) check for every backing kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionKey {
    Index { backing: usize, index: usize },
    Node { backing: usize, node: NodeId },
}

/// The object safe engine behind every navigator facade.
///
/// The facades ([`ReadNavigator`], [`EditNavigator`], [`WriteNavigator`]) hold a
/// `Box<dyn NavigatorEngine<T>>` and decide statically which of these methods a caller
/// can reach. The mutating methods have default bodies that fail with
/// [`CursorError::Unsupported`], so an engine only implements what its backing can do.
///
/// Engines over shared backings read the backing's length live on every call. An
/// untracked engine whose backing shrank under it reports [`CursorError::OutOfRange`]
/// (or [`CursorError::DetachedNode`]) instead of reading garbage.
///
/// [`ReadNavigator`]: crate::ReadNavigator
/// [`EditNavigator`]: crate::EditNavigator
/// [`WriteNavigator`]: crate::WriteNavigator
pub trait NavigatorEngine<T: 'static> {
    fn capability(&self) -> Capability;

    /// Live length of the backing.
    fn len(&self) -> usize;

    /// Only an engine whose backing was emptied from elsewhere can see this.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Zero-based index of the point. O(n) for linked backings.
    ///
    /// # Errors
    ///
    /// [`CursorError::DetachedNode`] when a linked point was removed from under an
    /// untracked engine.
    fn current_index(&self) -> CursorResult<usize>;

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"index"`.
    fn set_current_index(&mut self, index: usize) -> CursorResult<()>;

    fn can_move_by(&self, delta: isize) -> bool;

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`. The point does not move.
    fn move_by(&mut self, delta: isize) -> CursorResult<()>;

    /// Run `visitor` on the element `delta` away from the point (`0` is the point).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`, or [`CursorError::BackingBorrowed`].
    fn visit(&self, delta: isize, visitor: &mut dyn FnMut(&T)) -> CursorResult<()>;

    /// An untracked engine over the same backing, `delta` away from the point.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    fn offset(&self, delta: isize) -> CursorResult<Box<dyn NavigatorEngine<T>>>;

    fn position_key(&self) -> PositionKey;

    /// Replace the element under the point, returning the old one.
    ///
    /// # Errors
    ///
    /// [`CursorError::Unsupported`] unless the engine is editable.
    fn replace(&mut self, _value: T) -> CursorResult<T> {
        Err(unsupported("replace", self.capability()))
    }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] unless the engine is writable.
    fn insert_before(&mut self, _value: T) -> CursorResult<()> {
        Err(unsupported("insert_before", self.capability()))
    }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] unless the engine is writable.
    fn insert_after(&mut self, _value: T) -> CursorResult<()> {
        Err(unsupported("insert_after", self.capability()))
    }

    /// # Errors
    ///
    /// [`CursorError::Unsupported`] unless the engine is writable.
    fn remove(&mut self) -> CursorResult<T> { Err(unsupported("remove", self.capability())) }

    /// The journal of the backing, if its structure can change.
    fn edit_journal(&self) -> Option<EditJournal> { None }

    /// Move the point to follow an edit made elsewhere. Edits that don't concern this
    /// kind of backing are ignored.
    fn apply_edit(&mut self, _edit: &StructuralEdit, _mode: TrackingMode) {}

    /// `Some` iff this engine follows its backing's journal.
    fn tracking_mode(&self) -> Option<TrackingMode> { None }
}

#[must_use]
pub fn unsupported(operation: &'static str, capability: Capability) -> CursorError {
    CursorError::Unsupported {
        operation,
        capability,
    }
}
