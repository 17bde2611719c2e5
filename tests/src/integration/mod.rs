//! Cross-crate integration scenarios.

pub mod fixtures;

mod boot;
mod cache_corruption;
mod commerce;
mod logout_fence;
mod salvage;
