use super::types::*;
use crate::graph::{Graph, Vertex};
use std::collections::HashMap;

/// Columnar, read-only view of a validated graph.
///
/// Vertices are interned to dense `NodeId`s (in sorted vertex order). Two
/// adjacency structures are kept:
/// - argument lists in CSR form, keyed by the edge target and sorted by order,
///   used by root finding and prefix encoding;
/// - child linked lists following `from -> to`, used by cycle detection.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub names: Vec<Vertex>,
    lookup: HashMap<Vertex, NodeId>,

    // Arguments (CSR)
    pub args_flat: Vec<Argument>,
    pub args_ranges: Vec<(u32, u32)>, // (start, count)

    // Children (Adjacency List)
    pub first_child: Vec<u32>,
    pub child_targets: Vec<NodeId>,
    pub next_child: Vec<u32>,
    last_child: Vec<u32>,
}

impl Registry {
    pub fn new() -> Self { Self::default() }
    pub fn count(&self) -> usize { self.names.len() }

    pub fn from_graph(graph: &Graph) -> Self {
        let mut reg = Self::new();
        for vertex in graph.vertices() {
            reg.intern(vertex);
        }

        // 1. Arguments, grouped per target. `edges_by_target` is stable, so ties in
        //    order keep insertion order.
        let mut per_node: Vec<Vec<Argument>> = vec![Vec::new(); reg.count()];
        for edge in graph.edges_by_target() {
            if let (Some(to), Some(from)) = (reg.id_of(&edge.to), reg.id_of(&edge.from)) {
                per_node[to.index()].push(Argument { node: from, order: edge.order });
            }
        }
        for args in per_node {
            let start = reg.args_flat.len() as u32;
            reg.args_ranges.push((start, args.len() as u32));
            reg.args_flat.extend(args);
        }

        // 2. Children, in parse order.
        for edge in graph.edges() {
            if let (Some(from), Some(to)) = (reg.id_of(&edge.from), reg.id_of(&edge.to)) {
                reg.push_child(from, to);
            }
        }

        reg
    }

    fn intern(&mut self, vertex: &Vertex) -> NodeId {
        if let Some(&id) = self.lookup.get(vertex) {
            return id;
        }
        let id = NodeId::new(self.names.len());
        self.names.push(vertex.clone());
        self.lookup.insert(vertex.clone(), id);
        self.first_child.push(NO_EDGE);
        self.last_child.push(NO_EDGE);
        id
    }

    /// Appends `child` to the end of `parent`'s child list.
    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let new_edge = self.child_targets.len() as u32;
        self.child_targets.push(child);
        self.next_child.push(NO_EDGE);

        let p_idx = parent.index();
        match self.last_child[p_idx] {
            NO_EDGE => self.first_child[p_idx] = new_edge,
            tail => self.next_child[tail as usize] = new_edge,
        }
        self.last_child[p_idx] = new_edge;
    }

    pub fn id_of(&self, vertex: &Vertex) -> Option<NodeId> {
        self.lookup.get(vertex).copied()
    }

    pub fn name(&self, id: NodeId) -> &Vertex {
        &self.names[id.index()]
    }

    /// The arguments of `id`, sorted by order.
    #[inline(always)]
    pub fn get_args(&self, id: NodeId) -> &[Argument] {
        let (start, count) = self.args_ranges[id.index()];
        &self.args_flat[start as usize..(start + count) as usize]
    }

    /// Iterates the vertices `id` points to, in edge parse order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children { registry: self, cursor: self.first_child[id.index()] }
    }

    /// Whether `id` is the `from` side of at least one edge.
    pub fn has_children(&self, id: NodeId) -> bool {
        self.first_child[id.index()] != NO_EDGE
    }
}

pub struct Children<'a> {
    registry: &'a Registry,
    cursor: u32,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.cursor == NO_EDGE {
            return None;
        }
        let idx = self.cursor as usize;
        self.cursor = self.registry.next_child[idx];
        Some(self.registry.child_targets[idx])
    }
}
