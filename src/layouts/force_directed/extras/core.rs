use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// An additional force to be applied after the base forces.
/// Implementors are zero-sized marker types with the behavior in `apply`.
pub trait ExtraForce: std::fmt::Debug + Default + Send + Sync + 'static {
    type Params: Clone + Default + std::fmt::Debug + PartialEq + Send + Sync + 'static;

    /// Apply the extra force: accumulate into `disp` (same convention as base helpers).
    fn apply(params: &Self::Params, positions: &[Pos2], disp: &mut [Vec2], area: Rect, k: f32);
}

/// A configured instance of an extra force (on/off + parameters).
#[derive(Serialize, Deserialize)]
#[serde(bound(
    serialize = "E::Params: Serialize",
    deserialize = "E::Params: Deserialize<'de>"
))]
pub struct Extra<E: ExtraForce, const ENABLED_DEFAULT: bool> {
    pub enabled: bool,
    pub params: E::Params,
}

impl<E: ExtraForce, const ENABLED_DEFAULT: bool> Extra<E, ENABLED_DEFAULT> {
    pub fn apply(&self, positions: &[Pos2], disp: &mut [Vec2], area: Rect, k: f32) {
        if self.enabled {
            E::apply(&self.params, positions, disp, area, k);
        }
    }
}

impl<E: ExtraForce, const ENABLED_DEFAULT: bool> Default for Extra<E, ENABLED_DEFAULT> {
    fn default() -> Self {
        Self {
            enabled: ENABLED_DEFAULT,
            params: E::Params::default(),
        }
    }
}

impl<E: ExtraForce, const ENABLED_DEFAULT: bool> Clone for Extra<E, ENABLED_DEFAULT> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            params: self.params.clone(),
        }
    }
}

impl<E: ExtraForce, const ENABLED_DEFAULT: bool> PartialEq for Extra<E, ENABLED_DEFAULT> {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled && self.params == other.params
    }
}

impl<E: ExtraForce, const ENABLED_DEFAULT: bool> std::fmt::Debug for Extra<E, ENABLED_DEFAULT> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extra")
            .field("enabled", &self.enabled)
            .field("params", &self.params)
            .finish()
    }
}
