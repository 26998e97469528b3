//! 结点标识：内部 0 起始，对外展示 1 起始。
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn from_usize(idx: usize) -> Self {
        Self(idx as u32)
    }

    /// Label used in every human-facing output (grids, cycles, reports).
    pub fn one_based(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self::from_usize(value)
    }
}

/// Converts a path of node ids into the 1-based labels shown to users.
pub fn one_based(nodes: &[NodeId]) -> Vec<usize> {
    nodes.iter().map(|node| node.one_based()).collect()
}
