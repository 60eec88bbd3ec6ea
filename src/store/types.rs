use serde::{Serialize, Deserialize};

/// Dense index of a vertex inside a `Registry`. Ids follow sorted vertex order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
    pub fn new(idx: usize) -> Self { Self(idx as u32) }
}

/// One entry of a vertex's argument list: `node` is the `order`-th argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    pub node: NodeId,
    pub order: u32,
}

/// Sentinel terminating a child linked list.
pub(crate) const NO_EDGE: u32 = u32::MAX;
