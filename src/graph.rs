use std::collections::HashMap;

use petgraph::stable_graph::{DefaultIx, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;

use crate::store::Triplet;

type StableGraphType = StableGraph<String, String, Directed, DefaultIx>;

/// Directed multigraph over entity names with relation labels on the edges.
///
/// Every edge is one selected triplet; parallel edges are kept.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    g: StableGraphType,
    index: HashMap<String, NodeIndex<DefaultIx>>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from rows in order. Nodes appear in first-seen order.
    pub fn from_triplets<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Triplet>,
    {
        let mut graph = Self::new();
        for t in rows {
            graph.add_triplet(t);
        }
        graph
    }

    pub fn add_triplet(&mut self, t: &Triplet) {
        let a = self.ensure_node(&t.source);
        let b = self.ensure_node(&t.target);
        self.g.add_edge(a, b, t.relation.clone());
    }

    fn ensure_node(&mut self, entity: &str) -> NodeIndex<DefaultIx> {
        if let Some(idx) = self.index.get(entity) {
            return *idx;
        }
        let idx = self.g.add_node(entity.to_string());
        self.index.insert(entity.to_string(), idx);
        idx
    }

    pub fn g(&self) -> &StableGraphType {
        &self.g
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.g.node_count() == 0
    }

    pub fn contains_node(&self, entity: &str) -> bool {
        self.index.contains_key(entity)
    }

    /// Entity names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.g.node_weights().map(String::as_str)
    }

    /// `(source, relation, target)` for every edge.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.g.edge_references().map(|e| {
            (
                self.g[e.source()].as_str(),
                e.weight().as_str(),
                self.g[e.target()].as_str(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_become_nodes() {
        let rows = [
            Triplet::new("A", "r", "B"),
            Triplet::new("B", "s", "C"),
            Triplet::new("A", "r", "C"),
        ];
        let g = KnowledgeGraph::from_triplets(&rows);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        for t in &rows {
            assert!(g.contains_node(&t.source));
            assert!(g.contains_node(&t.target));
        }
    }

    #[test]
    fn keeps_parallel_edges() {
        let rows = [
            Triplet::new("A", "treats", "B"),
            Triplet::new("A", "studies", "B"),
        ];
        let g = KnowledgeGraph::from_triplets(&rows);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
        let mut labels: Vec<_> = g.edges().map(|(_, r, _)| r).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec!["studies", "treats"]);
    }

    #[test]
    fn self_loop_is_one_node() {
        let g = KnowledgeGraph::from_triplets(&[Triplet::new("A", "r", "A")]);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn empty_graph() {
        let g = KnowledgeGraph::from_triplets(&[]);
        assert!(g.is_empty());
        assert_eq!(g.edges().count(), 0);
    }
}
