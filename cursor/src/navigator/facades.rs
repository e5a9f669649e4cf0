// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The three capability facades over a boxed [`NavigatorEngine`].
//!
//! | Facade              | Adds                                                   |
//! | :------------------ | :----------------------------------------------------- |
//! | [`ReadNavigator`]   | everything in [`Navigator`] and [`ScanCursor`]         |
//! | [`EditNavigator`]   | `set_current`, `replace`                               |
//! | [`WriteNavigator`]  | `insert_before`, `insert_after`, `remove`, tracking    |
//!
//! A facade only ever narrows (`WriteNavigator` into `EditNavigator` into
//! `ReadNavigator`, via [`From`]), so a callee handed a [`ReadNavigator`] can't write.

use super::{DEBUG_NAVIGATOR_MOD, Navigator, NavigatorEngine, TrackingEngine};
use crate::{CursorResult, ScanCursor, TrackingMode};
use std::fmt::{Debug, Formatter};

/// Generate a facade struct, its [`Navigator`] impl, and its [`ScanCursor`] impl.
macro_rules! navigator_facade {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub struct $name<T> {
            engine: Box<dyn NavigatorEngine<T>>,
        }

        impl<T: Clone + 'static> Navigator<T> for $name<T> {
            fn from_engine(engine: Box<dyn NavigatorEngine<T>>) -> Self { Self { engine } }

            fn engine(&self) -> &dyn NavigatorEngine<T> { self.engine.as_ref() }

            fn engine_mut(&mut self) -> &mut dyn NavigatorEngine<T> { self.engine.as_mut() }
        }

        impl<T: Clone + 'static> ScanCursor for $name<T> {
            type Item = T;

            /// An unreadable point stops the scan. Use the `try_scan_*` methods of
            /// [`Navigator`] to get the error instead.
            fn current_satisfies(&self, predicate: &mut dyn FnMut(&T) -> bool) -> bool {
                let mut satisfied = false;
                match self.engine.visit(0, &mut |it| satisfied = predicate(it)) {
                    Ok(()) => satisfied,
                    Err(error) => {
                        DEBUG_NAVIGATOR_MOD.then(|| {
                            // % is Display, ? is Debug.
                            tracing::debug!(
                                message = concat!(stringify!($name), " -> scan stopped"),
                                error = %error
                            );
                        });
                        false
                    }
                }
            }

            fn try_advance(&mut self) -> bool { self.engine.move_by(1).is_ok() }

            fn try_retreat(&mut self) -> bool { self.engine.move_by(-1).is_ok() }
        }

        impl<T: 'static> Debug for $name<T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("capability", &self.engine.capability())
                    .field("index", &self.engine.current_index().ok())
                    .field("tracking", &self.engine.tracking_mode())
                    .finish()
            }
        }
    };
}

navigator_facade!(
    /// A navigator that can only look. Handed out for `Rc<[T]>` backings, and by
    /// narrowing any other navigator.
    ReadNavigator
);

navigator_facade!(
    /// A navigator that can overwrite the element under its point, but never change
    /// the length of its backing.
    EditNavigator
);

navigator_facade!(
    /// A navigator that can insert and remove at its point.
    ///
    /// ```
    /// use r3bl_cursor::{Navigator, SharedList};
    ///
    /// let list = SharedList::from(vec!['a', 'c']);
    /// let mut nav = list.navigator(1).unwrap();
    /// nav.insert_before('b').unwrap();
    /// assert_eq!(nav.current(), Ok('b'));
    /// nav.remove().unwrap();
    /// assert_eq!(nav.current(), Ok('c'));
    /// assert_eq!(list.to_vec(), vec!['a', 'c']);
    /// ```
    WriteNavigator
);

impl<T: Clone + 'static> EditNavigator<T> {
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] for an untracked navigator whose point is gone.
    ///
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    pub fn set_current(&mut self, value: T) -> CursorResult<()> { self.replace(value).map(|_| ()) }

    /// Overwrite the element under the point and return the old one.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] for an untracked navigator whose point is gone.
    ///
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    pub fn replace(&mut self, value: T) -> CursorResult<T> { self.engine.replace(value) }
}

impl<T: Clone + 'static> WriteNavigator<T> {
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] for an untracked navigator whose point is gone.
    ///
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    pub fn set_current(&mut self, value: T) -> CursorResult<()> { self.replace(value).map(|_| ()) }

    /// Overwrite the element under the point and return the old one.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] for an untracked navigator whose point is gone.
    ///
    /// [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange
    pub fn replace(&mut self, value: T) -> CursorResult<T> { self.engine.replace(value) }

    /// Insert `value` right before the point.
    ///
    /// Over an indexed backing the point keeps its numeric index and so lands on the
    /// new element. Over a linked backing the point stays on its node.
    ///
    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`] when called from a scan predicate over the same
    /// backing.
    ///
    /// [`CursorError::BackingBorrowed`]: crate::CursorError::BackingBorrowed
    pub fn insert_before(&mut self, value: T) -> CursorResult<()> {
        self.engine.insert_before(value)
    }

    /// Insert `value` right after the point. The point doesn't move.
    ///
    /// # Errors
    ///
    /// [`CursorError::BackingBorrowed`].
    ///
    /// [`CursorError::BackingBorrowed`]: crate::CursorError::BackingBorrowed
    pub fn insert_after(&mut self, value: T) -> CursorResult<()> { self.engine.insert_after(value) }

    /// Remove the element under the point and return it. The point lands on the next
    /// element, or on the previous one when the last element was removed.
    ///
    /// # Errors
    ///
    /// [`CursorError::RemoveLastElement`] when only one element is left.
    ///
    /// [`CursorError::RemoveLastElement`]: crate::CursorError::RemoveLastElement
    pub fn remove(&mut self) -> CursorResult<T> { self.engine.remove() }

    /// Follow structural edits made through other navigators (or the backing's own
    /// handle) according to `mode`. A navigator that already tracks is returned as is.
    #[must_use]
    pub fn into_tracking(self, mode: TrackingMode) -> Self {
        DEBUG_NAVIGATOR_MOD.then(|| {
            tracing::debug!(
                message = "WriteNavigator -> into_tracking",
                already = ?self.engine.tracking_mode()
            );
        });
        Self {
            engine: TrackingEngine::wrap(self.engine, mode),
        }
    }

    #[must_use]
    pub fn tracking_mode(&self) -> Option<TrackingMode> { self.engine.tracking_mode() }

    #[must_use]
    pub fn is_tracking(&self) -> bool { self.tracking_mode().is_some() }
}

impl<T> From<WriteNavigator<T>> for EditNavigator<T> {
    fn from(it: WriteNavigator<T>) -> Self { Self { engine: it.engine } }
}

impl<T> From<EditNavigator<T>> for ReadNavigator<T> {
    fn from(it: EditNavigator<T>) -> Self { Self { engine: it.engine } }
}

impl<T> From<WriteNavigator<T>> for ReadNavigator<T> {
    fn from(it: WriteNavigator<T>) -> Self { Self { engine: it.engine } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, CursorError, SharedArray, SharedLinkedSeq, SharedList, assert_eq2,
                read_navigator};

    #[test]
    fn test_edit_navigator_overwrites() {
        let array = SharedArray::from([1, 2, 3]);
        let mut nav = array.navigator(2).unwrap();
        assert_eq2!(nav.replace(30), Ok(3));
        nav.move_by(-2).unwrap();
        nav.set_current(10).unwrap();
        assert_eq2!(array.to_vec(), vec![10, 2, 30]);
    }

    #[test]
    fn test_narrowing_keeps_the_point() {
        let list = SharedList::from(vec![1, 2, 3]);
        let write = list.navigator(2).unwrap();
        let edit = EditNavigator::from(write);
        let read = ReadNavigator::from(edit);
        assert_eq2!(read.current(), Ok(3));
        // Narrowing keeps the engine, so this is still the backing's capability.
        assert_eq2!(read.capability(), Capability::Writable);
    }

    #[test]
    fn test_siblings_have_the_same_facade() {
        let seq = "abc".chars().collect::<SharedLinkedSeq<_>>();
        let nav = seq.navigator().unwrap();
        let mut next: WriteNavigator<char> = nav.next().unwrap();
        assert_eq2!(next.current(), Ok('b'));
        next.insert_after('x').unwrap();
        assert_eq2!(seq.to_vec(), vec!['a', 'b', 'x', 'c']);
        assert!(nav.previous().is_err());
        assert!(!nav.is_same_position(&next));
        assert!(next.previous().unwrap().is_same_position(&nav));
    }

    #[test]
    fn test_same_position_is_identity_not_value() {
        let one = read_navigator(vec![7, 7], 0).unwrap();
        let other = read_navigator(vec![7, 7], 0).unwrap();
        assert!(!one.is_same_position(&other));
        assert!(one.is_same_position(&one.offset(0).unwrap()));
        assert!(!one.is_same_position(&one.offset(1).unwrap()));
    }

    #[test]
    fn test_scan_and_soft_peek() {
        let mut nav = read_navigator(vec![10, 20, 30, 40], 1).unwrap();
        assert_eq2!(nav.scan_forward_to(&40), 2);
        assert_eq2!(nav.current_index(), Ok(3));
        assert_eq2!(nav.try_peek(1), None);
        assert_eq2!(
            nav.peek(-5),
            Err(CursorError::OutOfRange {
                name: "delta",
                value: -5,
                length: 4
            })
        );
        assert_eq2!(nav.scan_backward_while(|it| *it > 10), 3);
    }

    #[test]
    fn test_fallible_scans_report_a_lost_point() {
        let list = SharedList::from(vec![1, 2, 3]);
        let mut stale = list.navigator(2).unwrap();
        list.remove(0).unwrap();
        let lost = CursorError::OutOfRange {
            name: "index",
            value: 2,
            length: 2,
        };
        assert_eq2!(stale.try_scan_forward_while(|_| true), Err(lost.clone()));
        assert_eq2!(stale.try_scan_backward_to(&99), Err(lost.clone()));
        assert_eq2!(stale.scan_forward_while(|_| true), 0);
        assert_eq2!(stale.current_index(), Err(lost));
    }

    #[test]
    fn test_fallible_scans_report_a_detached_node() {
        let seq = "abc".chars().collect::<SharedLinkedSeq<_>>();
        let b = seq.with_seq(|it| it.node_at(1)).unwrap().unwrap();
        let mut stale = seq.navigator_at(b).unwrap();
        seq.remove(b).unwrap();
        assert!(matches!(
            stale.try_scan_forward_to_any(&['c']),
            Err(CursorError::DetachedNode { .. })
        ));
    }

    #[test]
    fn test_fallible_scans_land_like_soft_scans() {
        let items = vec![10, 20, 30, 40, 30];
        let mut soft = read_navigator(items.clone(), 0).unwrap();
        let mut hard = read_navigator(items, 0).unwrap();
        assert_eq2!(hard.try_scan_forward_to(&30), Ok(soft.scan_forward_to(&30)));
        assert_eq2!(hard.try_scan_forward_while(|_| true), Ok(soft.scan_forward_while(|_| true)));
        assert_eq2!(hard.try_scan_backward_to_any(&[20, 99]), Ok(3));
        assert_eq2!(hard.current_index(), Ok(1));
        assert_eq2!(hard.try_scan_backward_while(|_| true), Ok(1));
    }

    #[test]
    fn test_fallible_scan_sees_a_tracked_point() {
        let list = SharedList::from(vec!['a', 'b', 'c']);
        let mut nav = list.navigator(2).unwrap().into_tracking(TrackingMode::Positive);
        list.remove(0).unwrap();
        assert_eq2!(nav.try_scan_backward_to(&'b'), Ok(1));
        assert_eq2!(nav.current(), Ok('b'));
    }

    #[test]
    fn test_tracking_toggle() {
        let list = SharedList::from(vec![1]);
        let nav = list.navigator(0).unwrap();
        assert!(!nav.is_tracking());
        let nav = nav.into_tracking(TrackingMode::Positive);
        let nav = nav.into_tracking(TrackingMode::Negative);
        assert_eq2!(nav.tracking_mode(), Some(TrackingMode::Positive));
        assert!(!nav.offset(0).unwrap().is_tracking());
        assert!(format!("{nav:?}").contains("Positive"));
    }
}
