// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// What a navigator's backing lets it do. Each level includes the ones before it.
///
/// | Capability  | Facade              | Backings                        |
/// | :---------- | :------------------ | :------------------------------ |
/// | `ReadOnly`  | [`ReadNavigator`]   | `Rc<[T]>`                       |
/// | `Editable`  | [`EditNavigator`]   | [`SharedArray`]                 |
/// | `Writable`  | [`WriteNavigator`]  | [`SharedList`], [`SharedLinkedSeq`] |
///
/// [`ReadNavigator`]: crate::ReadNavigator
/// [`EditNavigator`]: crate::EditNavigator
/// [`WriteNavigator`]: crate::WriteNavigator
/// [`SharedArray`]: crate::SharedArray
/// [`SharedList`]: crate::SharedList
/// [`SharedLinkedSeq`]: crate::SharedLinkedSeq
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Capability {
    /// Read, move, peek, scan.
    #[strum(serialize = "read-only")]
    ReadOnly,

    /// Also replace the element under the point.
    Editable,

    /// Also insert and remove at the point.
    Writable,
}

impl Capability {
    #[must_use]
    pub fn can_edit(self) -> bool { self >= Self::Editable }

    #[must_use]
    pub fn can_write(self) -> bool { self == Self::Writable }
}
