use crate::activity::Activity;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub mod builder;

pub use builder::GraphBuilder;

/// A validated, acyclic activity network.
///
/// Edges point from predecessor to successor. Node indices are dense
/// (`0..len()`), so the passes keep their per-activity values in plain
/// vectors indexed by `NodeIndex::index()`.
#[derive(Debug, Clone)]
pub struct ActivityGraph {
    pub(crate) graph: DiGraph<Activity, ()>,
    pub(crate) id_to_index: HashMap<String, NodeIndex>,
    pub(crate) topological_order: Vec<NodeIndex>,
}

impl ActivityGraph {
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn graph(&self) -> &DiGraph<Activity, ()> {
        &self.graph
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_index.get(id).copied()
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.index_of(id).map(|ix| &self.graph[ix])
    }

    pub fn node(&self, ix: NodeIndex) -> &Activity {
        &self.graph[ix]
    }

    /// Nodes ordered so that every activity follows all of its predecessors.
    /// Ties among ready activities are broken by ascending id.
    pub fn topological_order(&self) -> &[NodeIndex] {
        &self.topological_order
    }

    pub fn activities(&self) -> impl Iterator<Item = &Activity> + '_ {
        self.topological_order.iter().map(|&ix| &self.graph[ix])
    }

    pub fn predecessors(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(ix, Direction::Incoming)
    }

    pub fn successors(&self, ix: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_neighbors(ix, Direction::Outgoing)
    }

    pub fn has_predecessors(&self, ix: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(ix, Direction::Incoming)
            .next()
            .is_some()
    }

    pub fn has_successors(&self, ix: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(ix, Direction::Outgoing)
            .next()
            .is_some()
    }

    /// Activities without predecessors, by ascending id.
    pub fn entry_points(&self) -> Vec<NodeIndex> {
        let mut entries: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&ix| !self.has_predecessors(ix))
            .collect();
        entries.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
        entries
    }

    pub fn total_budget(&self) -> f64 {
        self.graph.node_weights().map(|a| a.budgeted_cost).sum()
    }

    fn sorted_neighbors(&self, ix: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors_directed(ix, direction).collect();
        neighbors.sort_by(|a, b| self.graph[*a].id.cmp(&self.graph[*b].id));
        neighbors
    }
}
