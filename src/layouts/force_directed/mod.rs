mod algorithm;
mod fruchterman_reingold;
mod layout;
mod with_extras;

pub mod extras;

pub use algorithm::ForceAlgorithm;
pub use extras::{CenterGravity, CenterGravityParams, Extra, ExtraForce};
pub use fruchterman_reingold::{FruchtermanReingold, FruchtermanReingoldState};
pub use layout::{
    ForceDirected, ForceDirectedState, DEFAULT_CANVAS_SIZE, DEFAULT_ITERATIONS, DEFAULT_SEED,
};
pub use with_extras::{
    FruchtermanReingoldWithCenterGravity, FruchtermanReingoldWithCenterGravityState,
};
