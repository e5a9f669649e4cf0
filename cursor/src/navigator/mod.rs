// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Heap allocated cursors over shared backings, for APIs that store cursors or pass
//! them to callees.
//!
//! ```text
//!  facade (static capability)      engine (dyn)              backing (shared)
//! ┌─────────────────────┐        ┌──────────────────┐      ┌──────────────────┐
//! │ ReadNavigator<T>    │        │ TrackingEngine   │      │ Rc<[T]>          │
//! │ EditNavigator<T>    │ ─────→ │   wraps one of:  │ ───→ │ SharedArray<T>   │
//! │ WriteNavigator<T>   │        │ IndexedEngine<S> │      │ SharedList<T>    │
//! └─────────────────────┘        │ LinkedEngine<T>  │      │ SharedLinkedSeq  │
//!                                └──────────────────┘      └────────┬─────────┘
//!                                         ↑                         │ records
//!                                         └──── drains ──── EditJournal
//! ```
//!
//! Every backing handle is a cheap `Rc` clone, so a navigator and the code that created
//! it see the same items. Lengths are read live; an untracked navigator whose point
//! was removed from under it reports an error instead of reading past the end.

// Attach.
pub mod capability;
pub mod edit_journal;
pub mod engine;
pub mod facades;
pub mod indexed_engine;
pub mod indexed_store;
pub mod linked_engine;
pub mod navigator_trait;
pub mod shared_array;
pub mod shared_linked_seq;
pub mod shared_list;
pub mod tracking_engine;
pub mod walk;

// Re-export.
pub use capability::*;
pub use edit_journal::*;
pub use engine::*;
pub use facades::*;
pub use indexed_engine::*;
pub use indexed_store::*;
pub use linked_engine::*;
pub use navigator_trait::*;
pub use shared_array::*;
pub use shared_linked_seq::*;
pub use shared_list::*;
pub use tracking_engine::*;
pub use walk::*;

/// Log structural edits, tracking adjustments, and journal trimming.
pub const DEBUG_NAVIGATOR_MOD: bool = true;
