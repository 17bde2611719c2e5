//! Domain layer: reward descriptors and the streak rule.

pub mod reward;
pub mod streak;

pub use reward::*;
pub use streak::*;
