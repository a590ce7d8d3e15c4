mod core;

pub mod center_gravity;

pub use center_gravity::{CenterGravity, CenterGravityParams};
pub use core::{Extra, ExtraForce};
