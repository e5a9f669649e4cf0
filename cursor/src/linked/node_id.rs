// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Handle to one node of a [`LinkedSeq`]. Comparing two handles is an O(1) identity
/// check: equal handles refer to the same node, never merely to equal values.
///
/// [`LinkedSeq`]: crate::LinkedSeq
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    #[must_use]
    pub fn slot(self) -> usize { self.slot }

    #[must_use]
    pub fn generation(self) -> u32 { self.generation }
}
