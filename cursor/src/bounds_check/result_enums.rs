// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Result enums for bounds checking:
//! - [`RangeBoundsResult`] - where a candidate index falls relative to `[0, length)`.
//! - [`CursorPositionStatus`] - where a valid index sits inside its backing.

/// Result of checking a (possibly negative) candidate index against `[0, length)`.
///
/// ```
/// use r3bl_cursor::{RangeBoundsResult, check_index};
///
/// assert_eq!(check_index(-1, 4), RangeBoundsResult::Underflowed);
/// assert_eq!(check_index(3, 4), RangeBoundsResult::Within);
/// assert_eq!(check_index(4, 4), RangeBoundsResult::Overflowed);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RangeBoundsResult {
    /// Candidate is below 0.
    Underflowed,

    /// Candidate can safely address an element.
    Within,

    /// Candidate is at or past `length`.
    Overflowed,
}

impl RangeBoundsResult {
    #[must_use]
    pub fn is_within(self) -> bool { self == Self::Within }
}

/// Where a valid index sits inside a backing of a given length.
///
/// ```text
/// length=5:
///             0   1   2   3   4
///           ┌───┬───┬───┬───┬───┐
///           │ S │ W │ W │ W │ E │
///           └───┴───┴───┴───┴───┘
///
/// length=1:
///             0
///           ┌───┐
///           │ O │
///           └───┘
///
/// S = AtStart, W = Within, E = AtEnd, O = Only (both start and end)
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CursorPositionStatus {
    /// First element of a backing with more than one element.
    AtStart,

    /// Strictly between the first and the last element.
    Within,

    /// Last element of a backing with more than one element.
    AtEnd,

    /// The one and only element.
    Only,
}

impl CursorPositionStatus {
    /// Locate a valid `index` in a backing of `length`. The caller guarantees
    /// `index < length`.
    #[must_use]
    pub fn locate(index: usize, length: usize) -> Self {
        let last = length.saturating_sub(1);
        match (index == 0, index == last) {
            (true, true) => Self::Only,
            (true, false) => Self::AtStart,
            (false, true) => Self::AtEnd,
            (false, false) => Self::Within,
        }
    }

    #[must_use]
    pub fn is_start(self) -> bool { matches!(self, Self::AtStart | Self::Only) }

    #[must_use]
    pub fn is_end(self) -> bool { matches!(self, Self::AtEnd | Self::Only) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;
    use test_case::test_case;

    #[test_case(0, 5, CursorPositionStatus::AtStart)]
    #[test_case(2, 5, CursorPositionStatus::Within)]
    #[test_case(4, 5, CursorPositionStatus::AtEnd)]
    #[test_case(0, 1, CursorPositionStatus::Only)]
    fn test_locate(index: usize, length: usize, expected: CursorPositionStatus) {
        assert_eq2!(CursorPositionStatus::locate(index, length), expected);
    }

    #[test]
    fn test_only_is_both_start_and_end() {
        assert!(CursorPositionStatus::Only.is_start());
        assert!(CursorPositionStatus::Only.is_end());
        assert!(!CursorPositionStatus::Within.is_start());
        assert!(!CursorPositionStatus::Within.is_end());
    }
}
