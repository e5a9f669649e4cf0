// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CursorError, CursorPositionStatus, CursorResult, RangeBoundsResult, ScanCursor,
            as_signed, check_index, validate_cursor_start, validate_index};

/// A point on one `char` of a `&str` (or of any substring view of one).
///
/// The index is the **byte offset** of the pointed char, so it is always on a char
/// boundary and slicing around the point is O(1). Movement steps by whole chars:
///
/// ```text
/// text = "añb"   (ñ is 2 bytes)
///
/// byte offset:   0   1   2   3
///              ┌───┬───────┬───┐
///              │ a │   ñ   │ b │
///              └───┴───────┴───┘
///                    ↑
///              index() = 1, char_index() = 1
///
/// move_next() -> index() = 3
/// ```
///
/// Char steps are counted, not looked up, so a move walks the chars between the point
/// and its target. Whether the target exists is still decided by [`check_index`], over
/// the window of chars walked. Errors report the char count of the text as the length.
///
/// Two positions are equal when they point into the same text slice (same address and
/// length) at the same offset. Equal contents elsewhere do not count.
#[derive(Debug, Clone, Copy)]
pub struct StrPosition<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> StrPosition<'a> {
    /// # Errors
    ///
    /// - [`CursorError::EmptyBacking`] for `""`.
    /// - [`CursorError::OutOfRange`] when `offset >= text.len()`.
    /// - [`CursorError::NotACharBoundary`] when `offset` is inside a multi byte char.
    pub fn new(text: &'a str, offset: usize) -> CursorResult<Self> {
        let offset = validate_boundary(text, validate_cursor_start(offset, text.len())?)?;
        Ok(Self { text, offset })
    }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] for `""`.
    pub fn start(text: &'a str) -> CursorResult<Self> { Self::new(text, 0) }

    /// # Errors
    ///
    /// [`CursorError::EmptyBacking`] for `""`.
    pub fn end(text: &'a str) -> CursorResult<Self> {
        let offset = text.char_indices().next_back().map_or(0, |(it, _)| it);
        Self::new(text, offset)
    }

    #[must_use]
    pub fn text(&self) -> &'a str { self.text }

    /// Byte offset of the pointed char.
    #[must_use]
    pub fn index(&self) -> usize { self.offset }

    /// Number of chars before the point. O(n).
    #[must_use]
    pub fn char_index(&self) -> usize { self.all_before().chars().count() }

    /// Length of the text in bytes. Never 0.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.text.len() }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] or [`CursorError::NotACharBoundary`]. The position
    /// does not move.
    pub fn set_index(&mut self, offset: usize) -> CursorResult<()> {
        self.offset = validate_boundary(self.text, validate_index(offset, self.len())?)?;
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> char { self.after_and_self().chars().next().unwrap_or_default() }

    #[must_use]
    pub fn status(&self) -> CursorPositionStatus {
        match (self.is_start(), self.is_end()) {
            (true, true) => CursorPositionStatus::Only,
            (true, false) => CursorPositionStatus::AtStart,
            (false, true) => CursorPositionStatus::AtEnd,
            (false, false) => CursorPositionStatus::Within,
        }
    }

    #[must_use]
    pub fn is_start(&self) -> bool { self.offset == 0 }

    #[must_use]
    pub fn is_end(&self) -> bool { self.next_offset() >= self.text.len() }

    #[must_use]
    pub fn can_move_next(&self) -> bool { !self.is_end() }

    #[must_use]
    pub fn can_move_previous(&self) -> bool { !self.is_start() }

    #[must_use]
    pub fn can_move_by(&self, delta: isize) -> bool { self.offset_by(delta).is_some() }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the last char.
    pub fn move_next(&mut self) -> CursorResult<()> { self.move_by(1) }

    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] on the first char.
    pub fn move_previous(&mut self) -> CursorResult<()> { self.move_by(-1) }

    /// Move by `delta` chars.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`, with the char count as the length.
    /// The position does not move.
    pub fn move_by(&mut self, delta: isize) -> CursorResult<()> {
        self.offset = self.checked_offset_by(delta)?;
        Ok(())
    }

    pub fn move_to_start(&mut self) { self.offset = 0; }

    pub fn move_to_end(&mut self) {
        self.offset = self.text.char_indices().next_back().map_or(0, |(it, _)| it);
    }

    /// A sibling position `delta` chars away.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn offset(&self, delta: isize) -> CursorResult<Self> {
        Ok(Self {
            text: self.text,
            offset: self.checked_offset_by(delta)?,
        })
    }

    /// The char `delta` chars away, without moving.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"delta"`.
    pub fn peek(&self, delta: isize) -> CursorResult<char> {
        Ok(self.offset(delta)?.current())
    }

    #[must_use]
    pub fn try_peek(&self, delta: isize) -> Option<char> {
        self.offset_by(delta).and_then(|it| self.text[it..].chars().next())
    }

    /// Chars before the point, nearest first. Lazy.
    pub fn before(&self) -> impl Iterator<Item = char> + use<'a> {
        self.all_before().chars().rev()
    }

    /// Chars after the point, nearest first. Lazy.
    pub fn after(&self) -> impl Iterator<Item = char> + use<'a> { self.all_after().chars() }

    #[must_use]
    pub fn all_before(&self) -> &'a str { &self.text[..self.offset] }

    #[must_use]
    pub fn all_after(&self) -> &'a str { &self.text[self.next_offset()..] }

    /// `char_count` chars starting at the point (inclusive).
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] naming `"length"` when the range runs past the end.
    pub fn slice(&self, char_count: usize) -> CursorResult<&'a str> {
        let rest = self.after_and_self();
        let end = match char_count {
            0 => Some(0),
            _ => rest
                .char_indices()
                .nth(char_count - 1)
                .map(|(it, ch)| it + ch.len_utf8()),
        };
        end.map(|it| &rest[..it]).ok_or_else(|| CursorError::OutOfRange {
            name: "length",
            value: as_signed(char_count),
            length: self.text.chars().count(),
        })
    }

    #[must_use]
    pub fn is_same_position(&self, other: &Self) -> bool { self == other }

    fn after_and_self(&self) -> &'a str { &self.text[self.offset..] }

    fn next_offset(&self) -> usize { self.offset + self.current().len_utf8() }

    /// Byte offset of the char `delta` chars away. Only the chars between the point and
    /// the target are walked, and the target's place in that window goes through
    /// [`check_index`] like every other index in the crate.
    fn offset_by(&self, delta: isize) -> Option<usize> {
        let steps = delta.unsigned_abs();
        let (candidate, window) = if delta >= 0 {
            let after = self.after_and_self().chars().take(steps.saturating_add(1));
            (delta, after.count())
        } else {
            let before = self.all_before().chars().rev().take(steps).count();
            (as_signed(before) + delta, before + 1)
        };
        match check_index(candidate, window) {
            RangeBoundsResult::Underflowed | RangeBoundsResult::Overflowed => None,
            RangeBoundsResult::Within if delta >= 0 => self
                .after_and_self()
                .char_indices()
                .nth(steps)
                .map(|(it, _)| self.offset + it),
            RangeBoundsResult::Within => self
                .all_before()
                .char_indices()
                .rev()
                .nth(steps - 1)
                .map(|(it, _)| it),
        }
    }

    fn checked_offset_by(&self, delta: isize) -> CursorResult<usize> {
        self.offset_by(delta).ok_or_else(|| CursorError::OutOfRange {
            name: "delta",
            value: delta,
            length: self.text.chars().count(),
        })
    }
}

fn validate_boundary(text: &str, offset: usize) -> CursorResult<usize> {
    if text.is_char_boundary(offset) {
        Ok(offset)
    } else {
        Err(CursorError::NotACharBoundary { offset })
    }
}

impl PartialEq for StrPosition<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text) && self.offset == other.offset
    }
}

impl Eq for StrPosition<'_> {}

impl ScanCursor for StrPosition<'_> {
    type Item = char;

    fn current_satisfies(&self, predicate: &mut dyn FnMut(&char) -> bool) -> bool {
        predicate(&self.current())
    }

    fn try_advance(&mut self) -> bool { self.move_next().is_ok() }

    fn try_retreat(&mut self) -> bool { self.move_previous().is_ok() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;
    use test_case::test_case;

    #[test]
    fn test_steps_by_chars() {
        let text = "añb";
        let mut pos = StrPosition::start(text).unwrap();
        pos.move_next().unwrap();
        assert_eq2!((pos.index(), pos.char_index(), pos.current()), (1, 1, 'ñ'));
        pos.move_next().unwrap();
        assert_eq2!((pos.index(), pos.current()), (3, 'b'));
        assert!(pos.is_end());
        assert!(pos.move_next().is_err());
        assert_eq2!(pos.peek(-2), Ok('a'));
        assert_eq2!(pos.try_peek(-3), None);
    }

    #[test_case(-1, Some('a'))]
    #[test_case(-2, Some('x'))]
    #[test_case(-3, None)]
    #[test_case(0, Some('ñ'))]
    #[test_case(1, Some('b'))]
    #[test_case(2, None)]
    #[test_case(isize::MIN, None)]
    #[test_case(isize::MAX, None)]
    fn test_peek_window_bounds(delta: isize, expected: Option<char>) {
        // "xañb" with the point on 'ñ'.
        let pos = StrPosition::new("xañb", 2).unwrap();
        assert_eq2!(pos.try_peek(delta), expected);
        assert_eq2!(pos.can_move_by(delta), expected.is_some());
        if expected.is_none() {
            assert_eq2!(
                pos.peek(delta),
                Err(CursorError::OutOfRange {
                    name: "delta",
                    value: delta,
                    length: 4,
                })
            );
        }
    }

    #[test]
    fn test_construction_rejects_bad_offsets() {
        assert_eq2!(StrPosition::new("", 0), Err(CursorError::EmptyBacking));
        assert_eq2!(
            StrPosition::new("añb", 2),
            Err(CursorError::NotACharBoundary { offset: 2 })
        );
        assert!(matches!(
            StrPosition::new("ab", 2),
            Err(CursorError::OutOfRange { name: "index", .. })
        ));
        assert_eq2!(StrPosition::end("añ").unwrap().index(), 1);
    }

    #[test]
    fn test_ranges_around_the_point() {
        let pos = StrPosition::new("let x = 1;", 4).unwrap();
        assert_eq2!(pos.all_before(), "let ");
        assert_eq2!(pos.all_after(), " = 1;");
        assert_eq2!(pos.slice(3), Ok("x ="));
        assert_eq2!(pos.slice(0), Ok(""));
        assert!(pos.slice(7).is_err());
        assert_eq2!(pos.before().collect::<String>(), " tel");
        assert_eq2!(pos.after().collect::<String>(), " = 1;");
    }

    #[test]
    fn test_equality_is_by_slice_identity() {
        let text = "abcabc";
        let left = StrPosition::new(&text[..3], 1).unwrap();
        let right = StrPosition::new(&text[3..], 1).unwrap();
        assert_eq2!(left.current(), right.current());
        assert!(left != right);
        assert_eq2!(left, StrPosition::new(&text[..3], 0).unwrap().offset(1).unwrap());
    }

    #[test]
    fn test_scan_over_text() {
        let mut pos = StrPosition::start("  key: value").unwrap();
        assert_eq2!(pos.scan_forward_while(|it| it.is_whitespace()), 2);
        assert_eq2!(pos.scan_forward_to(&':'), 3);
        assert_eq2!(pos.all_before(), "  key");
        assert_eq2!(pos.scan_backward_to(&'X'), 5);
        assert!(pos.is_start());
    }
}
