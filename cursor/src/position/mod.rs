// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Zero-allocation cursors. Each one is a borrow of its backing plus an index (or a
//! node handle), so it lives on the stack and costs nothing to create or copy.
//!
//! | Type                  | Backing                                              | Point         |
//! | :-------------------- | :--------------------------------------------------- | :------------ |
//! | [`Position`]          | any [`SeqBuffer`]: slices, arrays, `Vec`, `VecDeque`, `SmallVec` | index |
//! | [`StrPosition`]       | `&str` and substrings of it                          | byte offset   |
//! | [`LinkedPosition`]    | [`LinkedSeq`]                                        | [`NodeId`]    |
//!
//! What a position may do follows from its borrow. A shared borrow reads, moves, peeks,
//! and scans. An exclusive borrow also writes, and if the backing can be resized, it
//! inserts and removes at the point.
//!
//! [`LinkedSeq`]: crate::LinkedSeq
//! [`NodeId`]: crate::NodeId

// Attach.
pub mod get_position;
pub mod linked_position;
pub mod position_struct;
pub mod seq_buffer;
pub mod str_position;

// Re-export.
pub use get_position::*;
pub use linked_position::*;
pub use position_struct::*;
pub use seq_buffer::*;
pub use str_position::*;

/// Log structural edits made through positions.
pub const DEBUG_CURSOR_MOD: bool = true;
