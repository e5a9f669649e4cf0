// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod scan_cursor;

// Re-export.
pub use scan_cursor::*;
