// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Where a point lands when the backing changes around it. See [`TrackingMode`].

/// Policy for how a cursor's point reacts to an insertion made at its own location.
///
/// Think of the point as a caret sitting just before the element it points at. When
/// items are inserted exactly at the caret, the caret can either stay before them or be
/// carried past them:
///
/// ```text
/// Before: point on `c` (index 2), insert [x, y] at index 2.
///
///   0   1   2   3
/// ┌───┬───┬───┬───┐
/// │ a │ b │ c │ d │
/// └───┴───┴───┴───┘
///           ↑
///
/// Negative (stays before the inserted run):
///   0   1   2   3   4   5
/// ┌───┬───┬───┬───┬───┬───┐
/// │ a │ b │ x │ y │ c │ d │
/// └───┴───┴───┴───┴───┴───┘
///           ↑ point=2, now on `x`
///
/// Positive (carried to the end of the inserted run):
///   0   1   2   3   4   5
/// ┌───┬───┬───┬───┬───┬───┐
/// │ a │ b │ x │ y │ c │ d │
/// └───┴───┴───┴───┴───┴───┘
///                   ↑ point=4, still on `c`
/// ```
///
/// Insertions strictly before the point always shift it, and insertions after the
/// point never do, regardless of mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum_macros::Display,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum TrackingMode {
    /// The point tracks toward the beginning. An insertion at the point leaves the
    /// point's index unaffected, so it ends up on the first inserted item.
    #[default]
    Negative,

    /// The point tracks toward the end. An insertion at the point pushes the point to
    /// the end of the inserted range, so it stays on the item it was on.
    Positive,
}

impl TrackingMode {
    /// New index of a point at `point` after `count` items were inserted at `at`.
    #[must_use]
    pub fn track_insert(self, point: usize, at: usize, count: usize) -> usize {
        match (at.cmp(&point), self) {
            (std::cmp::Ordering::Less, _) | (std::cmp::Ordering::Equal, Self::Positive) => {
                point + count
            }
            (std::cmp::Ordering::Equal, Self::Negative)
            | (std::cmp::Ordering::Greater, _) => point,
        }
    }
}

/// New index of a point at `point` after the item at `at` was removed, leaving
/// `remaining` items. Removing the pointed item keeps the index (the successor slides
/// under it) unless it was the last one, in which case the point clamps back.
#[must_use]
pub fn track_remove(point: usize, at: usize, remaining: usize) -> usize {
    let shifted = if at < point { point - 1 } else { point };
    shifted.min(remaining.saturating_sub(1))
}
