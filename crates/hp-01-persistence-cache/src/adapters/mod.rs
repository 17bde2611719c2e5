//! Adapters implementing the `LocalStore` port.

pub mod file;
pub mod memory;

pub use file::FileLocalStore;
pub use memory::InMemoryLocalStore;
