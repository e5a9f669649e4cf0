// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_cursor
//!
//! A cursor points at one element of an ordered sequence and moves that point around:
//! it peeks at neighbors, scans until a condition holds, and (where the backing allows
//! it) writes, inserts, and removes elements at the point while keeping the point
//! coherent.
//!
//! There is one engine and two front ends:
//!
//! | Front end       | Types                                                  | Cost                          |
//! | :-------------- | :----------------------------------------------------- | :---------------------------- |
//! | Zero allocation | [`Position`], [`StrPosition`], [`LinkedPosition`]      | a borrow and an index / node  |
//! | Polymorphic     | [`ReadNavigator`], [`EditNavigator`], [`WriteNavigator`] | one heap object per navigator |
//!
//! Positions are for tight scanner loops. They borrow their backing (`&[T]`,
//! `&mut Vec<T>`, `&str`, `&mut LinkedSeq<T>`, ...) and their capabilities fall out of
//! the borrow: a shared borrow can only read, an exclusive borrow of a resizable
//! backing can insert and remove.
//!
//! Navigators are for APIs that hand cursors to callees or store them. They share
//! their backing ([`SharedList`], [`SharedArray`], [`SharedLinkedSeq`], `Rc<[T]>`), and
//! their capability is encoded in the facade type: a callee that receives a
//! [`ReadNavigator`] can't write through it.
//!
//! # Bounds
//!
//! A cursor can never be created over an empty backing, and its index always satisfies
//! `0 <= index < length` where length is read live from the backing on every check.
//! Every index check goes through [`check_index`], so there is exactly one definition
//! of a valid index ([`StrPosition`] counts chars instead, and reports the char count
//! as the length). Hard operations (`move_by`, `set_index`, `peek`) fail with
//! [`CursorError::OutOfRange`]; soft operations (`try_peek`) return `None`.
//!
//! # Scanning
//!
//! Every cursor implements [`ScanCursor`], which provides `scan_forward_while`,
//! `scan_forward_to`, `scan_forward_to_any` and their backward mirrors. A scan lands
//! **on** the first element that stops it, or on the terminal element.
//!
//! ```
//! use r3bl_cursor::{GetPosition, ScanCursor};
//!
//! let items = [10, 20, 30, 40];
//! let mut pos = items.position_of(1).unwrap();
//! assert_eq!(pos.scan_forward_to(&40), 2);
//! assert_eq!(pos.index(), 3);
//! assert_eq!(pos.try_peek(-5), None);
//! ```
//!
//! # Tracking
//!
//! A [`TrackingMode`] says where the point lands when something is inserted at it:
//! [`TrackingMode::Negative`] keeps it before the inserted run, and
//! [`TrackingMode::Positive`] carries it past the run. Positions take the mode per call
//! (`insert_before_tracking`). Navigators can be wrapped with
//! [`WriteNavigator::into_tracking`], after which they also follow edits made through
//! *other* navigators over the same backing.
//!
//! # Logging
//!
//! Structural edits and tracking adjustments are logged with [`tracing`] at `debug` and
//! `trace` level. Nothing is printed unless a subscriber is installed, for example via
//! [`try_initialize_logging`] with a [`TracingConfig`].

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod bounds_check;
pub mod decl_macros;
pub mod error;
pub mod linked;
pub mod log;
pub mod navigator;
pub mod position;
pub mod scan;
pub mod tracking_mode;

// Re-export.
pub use bounds_check::*;
pub use error::*;
pub use linked::*;
pub use log::*;
pub use navigator::*;
pub use position::*;
pub use scan::*;
pub use tracking_mode::*;
