use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::algorithm::ForceAlgorithm;
use super::extras::{CenterGravity, Extra};
use super::fruchterman_reingold::{
    apply_displacements, compute_attraction, compute_repulsion, node_indices, prepare_constants,
    reset_scratch, FruchtermanReingoldState,
};
use crate::graph::KnowledgeGraph;
use crate::layouts::LayoutState;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FruchtermanReingoldWithCenterGravityState {
    pub base: FruchtermanReingoldState,
    pub center_gravity: Extra<CenterGravity, true>,
}

impl LayoutState for FruchtermanReingoldWithCenterGravityState {}

/// Fruchterman-Reingold with the center gravity force applied after the base forces.
#[derive(Debug, Default)]
pub struct FruchtermanReingoldWithCenterGravity {
    state: FruchtermanReingoldWithCenterGravityState,
    // Reusable displacement buffer
    scratch_disp: Vec<Vec2>,
}

impl ForceAlgorithm for FruchtermanReingoldWithCenterGravity {
    type State = FruchtermanReingoldWithCenterGravityState;

    fn from_state(state: Self::State) -> Self {
        Self {
            state,
            scratch_disp: Vec::new(),
        }
    }

    fn step(&mut self, g: &KnowledgeGraph, positions: &mut [Pos2], canvas: Rect) {
        if g.node_count() == 0 {
            return;
        }
        let base = &self.state.base;
        let Some(k) = prepare_constants(canvas, g.node_count(), base.k_scale) else {
            return;
        };

        let indices = node_indices(g);
        reset_scratch(&mut self.scratch_disp, indices.len());

        compute_repulsion(
            positions,
            &mut self.scratch_disp,
            k,
            base.epsilon,
            base.c_repulse,
        );
        compute_attraction(
            g,
            &indices,
            positions,
            &mut self.scratch_disp,
            k,
            base.epsilon,
            base.c_attract,
        );
        self.state
            .center_gravity
            .apply(positions, &mut self.scratch_disp, canvas, k);
        apply_displacements(
            positions,
            &self.scratch_disp,
            base.dt,
            base.damping,
            base.max_step,
        );
    }
}
