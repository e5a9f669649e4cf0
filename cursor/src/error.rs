// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The single error type shared by every cursor front end. See [`CursorError`].

use crate::{Capability, NodeId};

/// Errors raised by positions, linked positions, and navigators.
///
/// All of these are local, synchronous failures at the call that violated a
/// precondition. None of them leave a cursor partially moved: every fallible operation
/// validates before it mutates anything.
///
/// | Variant                | Kind              | Raised by                                      |
/// | :--------------------- | :---------------- | :--------------------------------------------- |
/// | [`OutOfRange`]         | out of range      | construction, `set_index`, `move_by`, `peek`   |
/// | [`EmptyBacking`]       | invalid argument  | construction over a zero length backing        |
/// | [`NotACharBoundary`]   | invalid argument  | [`StrPosition`] construction and `set_index`   |
/// | [`DetachedNode`]       | invalid argument  | any linked operation on a stale [`NodeId`]     |
/// | [`RemoveLastElement`]  | invalid operation | `remove()` when one element is left            |
/// | [`Unsupported`]        | invalid operation | an engine asked for more than its capability   |
/// | [`BackingBorrowed`]    | invalid operation | a navigator callback reaching into its backing |
///
/// [`OutOfRange`]: Self::OutOfRange
/// [`EmptyBacking`]: Self::EmptyBacking
/// [`NotACharBoundary`]: Self::NotACharBoundary
/// [`DetachedNode`]: Self::DetachedNode
/// [`RemoveLastElement`]: Self::RemoveLastElement
/// [`Unsupported`]: Self::Unsupported
/// [`BackingBorrowed`]: Self::BackingBorrowed
/// [`StrPosition`]: crate::StrPosition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum CursorError {
    /// The candidate index (or the index a delta would produce) is outside
    /// `[0, length)`.
    #[error("{name} {value} is out of range for a backing of length {length}")]
    #[diagnostic(
        code(r3bl_cursor::out_of_range),
        help("Use the `try_` form (eg: `try_peek`) when probing near a boundary")
    )]
    OutOfRange {
        /// Which argument was rejected (`"index"`, `"delta"`, or `"length"`).
        name: &'static str,
        /// The rejected value.
        value: isize,
        /// The live length of the backing at the time of the check.
        length: usize,
    },

    /// A cursor can never point into an empty backing.
    #[error("Can't create a cursor over an empty backing")]
    #[diagnostic(code(r3bl_cursor::empty_backing))]
    EmptyBacking,

    /// A [`StrPosition`] offset must sit on a `char` boundary.
    ///
    /// [`StrPosition`]: crate::StrPosition
    #[error("Byte offset {offset} is not on a char boundary")]
    #[diagnostic(code(r3bl_cursor::not_a_char_boundary))]
    NotACharBoundary { offset: usize },

    /// The node handle has been removed from its sequence (or never belonged to it).
    #[error("Node {node:?} is not attached to this sequence")]
    #[diagnostic(
        code(r3bl_cursor::detached_node),
        help("Wrap the navigator with `into_tracking()` so it follows removals")
    )]
    DetachedNode { node: NodeId },

    /// Removing would leave nothing for the cursor to point at.
    #[error("At least one item must remain in the backing the cursor points into")]
    #[diagnostic(code(r3bl_cursor::remove_last_element))]
    RemoveLastElement,

    /// The engine does not support this operation.
    #[error("{operation} is not supported by {capability} navigators")]
    #[diagnostic(code(r3bl_cursor::unsupported))]
    Unsupported {
        operation: &'static str,
        capability: Capability,
    },

    /// A shared backing was already borrowed, which happens when a callback run by a
    /// navigator (eg: a scan predicate) tries to mutate the same backing.
    #[error("The shared backing is already borrowed")]
    #[diagnostic(
        code(r3bl_cursor::backing_borrowed),
        help("Don't edit a shared backing from inside a predicate that scans it")
    )]
    BackingBorrowed,
}

pub type CursorResult<T> = Result<T, CursorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_out_of_range_names_the_offending_value() {
        let error = CursorError::OutOfRange {
            name: "delta",
            value: -5,
            length: 4,
        };
        assert_eq2!(
            error.to_string(),
            "delta -5 is out of range for a backing of length 4"
        );
    }

    #[test]
    fn test_unsupported_mentions_capability() {
        let error = CursorError::Unsupported {
            operation: "remove",
            capability: Capability::Editable,
        };
        assert_eq2!(
            error.to_string(),
            "remove is not supported by editable navigators"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        use miette::Diagnostic;
        let code = CursorError::RemoveLastElement.code().map(|it| it.to_string());
        assert_eq2!(code.as_deref(), Some("r3bl_cursor::remove_last_element"));
    }
}
