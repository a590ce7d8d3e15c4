use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::core::ExtraForce;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterGravityParams {
    pub c: f32,
}

impl Default for CenterGravityParams {
    fn default() -> Self {
        Self { c: 0.3 }
    }
}

/// Pulls every node toward the canvas center so disconnected parts stay in view.
#[derive(Debug, Default)]
pub struct CenterGravity;

impl ExtraForce for CenterGravity {
    type Params = CenterGravityParams;

    fn apply(params: &Self::Params, positions: &[Pos2], disp: &mut [Vec2], area: Rect, _k: f32) {
        if params.c == 0.0 {
            return;
        }
        let center = area.center();
        for (d, pos) in disp.iter_mut().zip(positions) {
            *d += (center - *pos) * params.c;
        }
    }
}
