// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A doubly-linked sequence whose nodes live in a slot arena.
//!
//! Links are `Option<usize>` slot indices instead of pointers, so the whole list is a
//! plain `Vec` that can be borrowed, cloned, and dropped without `unsafe`:
//!
//! ```text
//!            head                                         tail
//!             ↓                                            ↓
//! slots:   ┌──────┐      ┌──────┐      ┌──────┐      ┌──────┐
//!          │ [2]  │ ───→ │ [0]  │ ───→ │ [3]  │ ───→ │ [1]  │
//!          │  A   │ ←─── │  B   │ ←─── │  C   │ ←─── │  D   │
//!          └──────┘      └──────┘      └──────┘      └──────┘
//!
//! free: [4, 5]   (slots of removed nodes, reused by later insertions)
//! ```
//!
//! A [`NodeId`] is a slot index plus the generation the slot had when the node was
//! created. Removing a node bumps its slot's generation, so a stale id is reported as
//! [`CursorError::DetachedNode`] instead of silently aliasing whatever reuses the slot.
//! A slot whose generation reaches `u32::MAX` is retired rather than wrapped, so a
//! stale id can never match again (at the cost of one unused slot per 2^32 reuses).
//!
//! [`CursorError::DetachedNode`]: crate::CursorError::DetachedNode

// Attach.
pub mod linked_seq;
pub mod node_id;

// Re-export.
pub use linked_seq::*;
pub use node_id::*;
