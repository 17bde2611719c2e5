//! Domain layer for hydration: where the user id and profile came from.

pub mod report;

pub use report::{HydrationReport, IdSource, ProfileSource};
