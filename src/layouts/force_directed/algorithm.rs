use egui::{Pos2, Rect};

use crate::graph::KnowledgeGraph;
use crate::layouts::LayoutState;

/// A pluggable force-directed algorithm.
///
/// The algorithm advances node coordinates by one step inside a canvas `Rect`.
/// `positions` is aligned with the node order of the graph.
pub trait ForceAlgorithm: Default {
    type State: LayoutState;

    fn from_state(state: Self::State) -> Self;

    /// Advance the simulation by one step.
    fn step(&mut self, g: &KnowledgeGraph, positions: &mut [Pos2], canvas: Rect);
}
