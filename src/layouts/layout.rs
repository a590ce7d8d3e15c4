use std::fmt::Debug;

use egui::{Pos2, Rect};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::graph::KnowledgeGraph;

/// Serializable parameters of a layout. Stored in settings and reused for every run.
pub trait LayoutState: Serialize + DeserializeOwned + Default + Debug + Clone {}

/// Node coordinates aligned with [`KnowledgeGraph::nodes`] order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Positions {
    points: Vec<Pos2>,
}

impl Positions {
    pub fn new(points: Vec<Pos2>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Pos2> {
        self.points.get(i).copied()
    }

    pub fn as_slice(&self) -> &[Pos2] {
        &self.points
    }

    /// Smallest rectangle containing every point, `Rect::NOTHING` when empty.
    pub fn bounds(&self) -> Rect {
        let mut r = Rect::NOTHING;
        for p in &self.points {
            r.extend_with(*p);
        }
        r
    }
}

pub trait Layout<S>: Default
where
    S: LayoutState,
{
    /// Creates a new layout from the given state.
    fn from_state(state: S) -> Self;

    /// Computes coordinates for every node of `g`.
    fn run(&mut self, g: &KnowledgeGraph) -> Positions;
}
