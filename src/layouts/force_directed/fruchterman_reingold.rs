use egui::{Pos2, Rect, Vec2};
use petgraph::stable_graph::{DefaultIx, NodeIndex};
use serde::{Deserialize, Serialize};

use super::algorithm::ForceAlgorithm;
use crate::graph::KnowledgeGraph;
use crate::layouts::LayoutState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruchtermanReingoldState {
    pub dt: f32,
    pub epsilon: f32,
    pub damping: f32,
    pub max_step: f32,
    pub k_scale: f32,
    pub c_attract: f32,
    pub c_repulse: f32,
}

impl LayoutState for FruchtermanReingoldState {}

impl Default for FruchtermanReingoldState {
    fn default() -> Self {
        FruchtermanReingoldState {
            dt: 0.05,
            epsilon: 1e-3,
            damping: 0.3,
            max_step: 20.0,
            k_scale: 0.5,
            c_attract: 1.0,
            c_repulse: 1.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct FruchtermanReingold {
    state: FruchtermanReingoldState,
    // Reusable displacement buffer to avoid per-step allocations
    scratch_disp: Vec<Vec2>,
}

impl ForceAlgorithm for FruchtermanReingold {
    type State = FruchtermanReingoldState;

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

        let params = &self.state;
        let Some(k) = prepare_constants(canvas, g.node_count(), params.k_scale) else {
            return;
        };

        let indices = node_indices(g);
        reset_scratch(&mut self.scratch_disp, indices.len());

        compute_repulsion(
            positions,
            &mut self.scratch_disp,
            k,
            params.epsilon,
            params.c_repulse,
        );
        compute_attraction(
            g,
            &indices,
            positions,
            &mut self.scratch_disp,
            k,
            params.epsilon,
            params.c_attract,
        );
        apply_displacements(
            positions,
            &self.scratch_disp,
            params.dt,
            params.damping,
            params.max_step,
        );
    }
}

pub(crate) fn node_indices(g: &KnowledgeGraph) -> Vec<NodeIndex<DefaultIx>> {
    g.g().node_indices().collect()
}

pub(crate) fn reset_scratch(disp: &mut Vec<Vec2>, len: usize) {
    if disp.len() == len {
        disp.fill(Vec2::ZERO);
    } else {
        disp.clear();
        disp.resize(len, Vec2::ZERO);
    }
}

pub(crate) fn prepare_constants(canvas: Rect, node_count: usize, k_scale: f32) -> Option<f32> {
    if node_count == 0 {
        return None;
    }
    let n = node_count as f32;
    let area = canvas.area().max(1.0);
    let k_ideal = (area / n).sqrt(); // ideal edge length
    let k = k_ideal * k_scale;
    if !k.is_finite() {
        return None;
    }
    Some(k)
}

pub(crate) fn compute_repulsion(
    positions: &[Pos2],
    disp: &mut [Vec2],
    k: f32,
    epsilon: f32,
    c_repulse: f32,
) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let delta = positions[i] - positions[j];
            let distance = delta.length().max(epsilon);
            let force = c_repulse * (k * k) / distance;
            let dir = delta / distance;
            disp[i] += dir * force;
            disp[j] -= dir * force;
        }
    }
}

/// `indices[i]` must be the node whose coordinates are `positions[i]`.
pub(crate) fn compute_attraction(
    g: &KnowledgeGraph,
    indices: &[NodeIndex<DefaultIx>],
    positions: &[Pos2],
    disp: &mut [Vec2],
    k: f32,
    epsilon: f32,
    c_attract: f32,
) {
    for (vec_pos, &idx) in indices.iter().enumerate() {
        let loc = positions[vec_pos];
        for nbr in g.g().neighbors_undirected(idx) {
            let delta = positions[nbr.index()] - loc;
            let distance = delta.length().max(epsilon);
            let force = c_attract * (distance * distance) / k;
            disp[vec_pos] += (delta / distance) * force;
        }
    }
}

pub(crate) fn apply_displacements(
    positions: &mut [Pos2],
    disp: &[Vec2],
    dt: f32,
    damping: f32,
    max_step: f32,
) {
    for (loc, d) in positions.iter_mut().zip(disp) {
        let mut step = *d * dt * damping;
        if step.length() > max_step {
            step = step.normalized() * max_step;
        }
        let new_loc = *loc + step;
        if !new_loc.x.is_finite() || !new_loc.y.is_finite() {
            continue;
        }
        *loc = new_loc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Triplet;

    fn canvas() -> Rect {
        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1000.0, 1000.0))
    }

    fn linked_pair() -> KnowledgeGraph {
        let mut g = KnowledgeGraph::new();
        g.add_triplet(&Triplet::new("A", "r", "B"));
        g
    }

    #[test]
    fn repulsion_increases_distance() {
        let mut positions = vec![Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0)];
        let params = FruchtermanReingoldState::default();
        let k = prepare_constants(canvas(), 2, params.k_scale).unwrap();
        let mut disp = vec![Vec2::ZERO; positions.len()];
        compute_repulsion(&positions, &mut disp, k, params.epsilon, params.c_repulse);
        apply_displacements(
            &mut positions,
            &disp,
            params.dt,
            params.damping,
            params.max_step,
        );
        assert!(
            (positions[1].x - positions[0].x).abs() > 1.0,
            "Nodes should move apart"
        );
    }

    #[test]
    fn attraction_decreases_distance_when_far() {
        let g = linked_pair();
        let indices = node_indices(&g);
        let mut positions = vec![Pos2::new(0.0, 0.0), Pos2::new(1200.0, 0.0)];
        let params = FruchtermanReingoldState::default();
        let k = prepare_constants(canvas(), 2, params.k_scale).unwrap();
        let mut disp = vec![Vec2::ZERO; positions.len()];
        compute_repulsion(&positions, &mut disp, k, params.epsilon, params.c_repulse);
        compute_attraction(
            &g,
            &indices,
            &positions,
            &mut disp,
            k,
            params.epsilon,
            params.c_attract,
        );
        apply_displacements(
            &mut positions,
            &disp,
            params.dt,
            params.damping,
            params.max_step,
        );
        let new_dist = (positions[1] - positions[0]).length();
        assert!(new_dist < 1200.0, "Distance should shrink due to attraction");
    }

    #[test]
    fn step_is_noop_on_empty_graph() {
        let g = KnowledgeGraph::new();
        let mut alg = FruchtermanReingold::from_state(FruchtermanReingoldState::default());
        let mut positions: Vec<Pos2> = Vec::new();
        alg.step(&g, &mut positions, canvas());
        assert!(positions.is_empty());
    }

    #[test]
    fn displacement_is_clamped() {
        let mut positions = vec![Pos2::ZERO];
        apply_displacements(&mut positions, &[Vec2::new(1e9, 0.0)], 1.0, 1.0, 5.0);
        assert!((positions[0].x - 5.0).abs() < 1e-3);
    }
}
