use egui::{Pos2, Rect};
use instant::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::algorithm::ForceAlgorithm;
use crate::graph::KnowledgeGraph;
use crate::layouts::{Layout, LayoutState, Positions};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ITERATIONS: usize = 50;
pub const DEFAULT_CANVAS_SIZE: f32 = 1000.0;

/// Parameters of a complete layout run: the seeded initial placement, the
/// number of steps and the algorithm's own state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize",
    deserialize = "S: serde::de::DeserializeOwned"
))]
pub struct ForceDirectedState<S> {
    pub seed: u64,
    pub iterations: usize,
    pub canvas_size: f32,
    pub alg: S,
}

impl<S: Default> Default for ForceDirectedState<S> {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
            canvas_size: DEFAULT_CANVAS_SIZE,
            alg: S::default(),
        }
    }
}

impl<S: LayoutState> LayoutState for ForceDirectedState<S> {}

impl<S> ForceDirectedState<S> {
    pub fn canvas(&self) -> Rect {
        let size = self.canvas_size.max(1.0);
        Rect::from_min_max(Pos2::ZERO, Pos2::new(size, size))
    }
}

/// Runs a [`ForceAlgorithm`] to completion from a seeded random placement.
///
/// The same graph and state always produce the same coordinates.
#[derive(Debug, Default)]
pub struct ForceDirected<A: ForceAlgorithm> {
    state: ForceDirectedState<A::State>,
}

impl<A: ForceAlgorithm> Layout<ForceDirectedState<A::State>> for ForceDirected<A> {
    fn from_state(state: ForceDirectedState<A::State>) -> Self {
        Self { state }
    }

    fn run(&mut self, g: &KnowledgeGraph) -> Positions {
        let canvas = self.state.canvas();
        let mut rng = StdRng::seed_from_u64(self.state.seed);
        let mut positions: Vec<Pos2> = (0..g.node_count())
            .map(|_| random_location(&mut rng, canvas))
            .collect();

        if positions.is_empty() {
            return Positions::default();
        }

        let started = Instant::now();
        let mut alg = A::from_state(self.state.alg.clone());
        for _ in 0..self.state.iterations {
            alg.step(g, &mut positions, canvas);
        }
        log::debug!(
            "layout of {} nodes took {} steps in {:.1} ms",
            positions.len(),
            self.state.iterations,
            started.elapsed().as_secs_f32() * 1000.0
        );

        Positions::new(positions)
    }
}

fn random_location<R: Rng>(rng: &mut R, canvas: Rect) -> Pos2 {
    Pos2::new(
        rng.random_range(canvas.min.x..canvas.max.x),
        rng.random_range(canvas.min.y..canvas.max.y),
    )
}
