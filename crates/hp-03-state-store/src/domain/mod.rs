//! Domain layer: state shape, actions and the reducer.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::*;
pub use reducer::reduce;
pub use state::*;
