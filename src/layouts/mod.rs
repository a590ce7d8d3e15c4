pub mod force_directed;

mod layout;
pub use layout::{Layout, LayoutState, Positions};
