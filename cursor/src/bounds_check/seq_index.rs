// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::validate_index;
use crate::{CursorError, CursorResult};

/// An index counted from either end of a backing. `FromEnd(1)` is the last element,
/// `FromEnd(length)` is the first one, and `FromEnd(0)` is one past the end (so it is
/// never a valid cursor index).
///
/// ```
/// use r3bl_cursor::SeqIndex;
///
/// assert_eq!(SeqIndex::FromStart(0).resolve(4), Ok(0));
/// assert_eq!(SeqIndex::FromEnd(1).resolve(4), Ok(3));
/// assert!(SeqIndex::FromEnd(5).resolve(4).is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SeqIndex {
    FromStart(usize),
    FromEnd(usize),
}

impl SeqIndex {
    /// Resolve to an absolute index in a backing of `length`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::EmptyBacking`] for an empty backing and
    /// [`CursorError::OutOfRange`] when the resolved index is not in `[0, length)`.
    pub fn resolve(self, length: usize) -> CursorResult<usize> {
        if length == 0 {
            return Err(CursorError::EmptyBacking);
        }
        match self {
            Self::FromStart(index) => validate_index(index, length),
            Self::FromEnd(from_end) => match length.checked_sub(from_end) {
                Some(index) => validate_index(index, length),
                None => Err(CursorError::OutOfRange {
                    name: "index",
                    value: -crate::as_signed(from_end - length),
                    length,
                }),
            },
        }
    }
}

impl From<usize> for SeqIndex {
    fn from(index: usize) -> Self { Self::FromStart(index) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_from_end_zero_is_one_past_the_end() {
        assert_eq2!(
            SeqIndex::FromEnd(0).resolve(3),
            Err(CursorError::OutOfRange {
                name: "index",
                value: 3,
                length: 3
            })
        );
    }

    #[test]
    fn test_from_end_past_start_reports_negative_index() {
        assert_eq2!(
            SeqIndex::FromEnd(5).resolve(3),
            Err(CursorError::OutOfRange {
                name: "index",
                value: -2,
                length: 3
            })
        );
    }

    #[test]
    fn test_empty() {
        assert_eq2!(SeqIndex::FromEnd(1).resolve(0), Err(CursorError::EmptyBacking));
    }
}
