// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Index validation and offset arithmetic. All functions here are thin wrappers around
//! [`check_index`], so they agree on every boundary.

use super::RangeBoundsResult;
use crate::{CursorError, CursorResult};

/// Check a candidate index against `[0, length)`. This is the single source of truth
/// for index validity in this crate.
#[must_use]
pub fn check_index(candidate: isize, length: usize) -> RangeBoundsResult {
    match usize::try_from(candidate) {
        Err(_) => RangeBoundsResult::Underflowed,
        Ok(it) if it >= length => RangeBoundsResult::Overflowed,
        Ok(_) => RangeBoundsResult::Within,
    }
}

/// Signed view of an index. Allocations never exceed `isize::MAX` bytes, so an index
/// that does not fit is out of range for every backing anyway.
#[must_use]
pub fn as_signed(index: usize) -> isize { isize::try_from(index).unwrap_or(isize::MAX) }

/// Accept `index` iff it is within `[0, length)`.
///
/// # Errors
///
/// Returns [`CursorError::OutOfRange`] naming `"index"`.
pub fn validate_index(index: usize, length: usize) -> CursorResult<usize> {
    let candidate = as_signed(index);
    match check_index(candidate, length) {
        RangeBoundsResult::Within => Ok(index),
        RangeBoundsResult::Underflowed | RangeBoundsResult::Overflowed => {
            Err(CursorError::OutOfRange {
                name: "index",
                value: candidate,
                length,
            })
        }
    }
}

/// Validate the starting index of a new cursor. An empty backing is reported as
/// [`CursorError::EmptyBacking`] rather than as an out of range index, since no index
/// could ever be valid.
///
/// # Errors
///
/// Returns [`CursorError::EmptyBacking`] or [`CursorError::OutOfRange`].
pub fn validate_cursor_start(index: usize, length: usize) -> CursorResult<usize> {
    if length == 0 {
        return Err(CursorError::EmptyBacking);
    }
    validate_index(index, length)
}

/// Apply `delta` to `index`, accepting the result iff it is within `[0, length)`.
///
/// ```
/// use r3bl_cursor::{CursorError, offset_index};
///
/// assert_eq!(offset_index(1, 2, 4), Ok(3));
/// assert_eq!(
///     offset_index(1, -5, 4),
///     Err(CursorError::OutOfRange { name: "delta", value: -5, length: 4 })
/// );
/// ```
///
/// # Errors
///
/// Returns [`CursorError::OutOfRange`] naming `"delta"`.
pub fn offset_index(index: usize, delta: isize, length: usize) -> CursorResult<usize> {
    try_offset_index(index, delta, length).ok_or(CursorError::OutOfRange {
        name: "delta",
        value: delta,
        length,
    })
}

/// Soft form of [`offset_index`].
#[must_use]
pub fn try_offset_index(index: usize, delta: isize, length: usize) -> Option<usize> {
    let candidate = as_signed(index).checked_add(delta)?;
    match check_index(candidate, length) {
        RangeBoundsResult::Within => usize::try_from(candidate).ok(),
        RangeBoundsResult::Underflowed | RangeBoundsResult::Overflowed => None,
    }
}
