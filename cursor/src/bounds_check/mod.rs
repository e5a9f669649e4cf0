// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The one definition of a valid cursor index.
//!
//! Every cursor in this crate (positions, linked positions, navigators) routes
//! construction, index assignment, and offset application through [`check_index`]. A
//! candidate index is valid iff `0 <= index < length`:
//!
//! ```text
//!                   index=0                     index=3  index=4
//!                      ↓                           ↓        ↓
//! Index:          -1 │ 0   1   2   3 │ 4   5
//!               ┌────┼───┬───┬───┬───┼───┬───┐
//!               │ U  │ W │ W │ W │ W │ O │ O │
//!               └────┼───┴───┴───┴───┼───┴───┘
//!        underflow ──┤    within     ├── overflow
//!                    └── length=4 ───┘
//! ```
//!
//! # Interval notation
//!
//! `[0, length)` means 0 is included and `length` is excluded. There is no valid index
//! into an empty backing, which is why cursors can't be created over one.
//!
//! # Hard and soft forms
//!
//! - [`validate_index`] and [`offset_index`] return [`CursorError::OutOfRange`] naming
//!   the offending argument. Use these for movement.
//! - [`try_offset_index`] returns `None`. Use it for probes (`try_peek`).
//!
//! [`CursorError::OutOfRange`]: crate::CursorError::OutOfRange

// Attach.
pub mod index_ops;
pub mod result_enums;
pub mod seq_index;

// Re-export.
pub use index_ops::*;
pub use result_enums::*;
pub use seq_index::*;
