//! In-memory adapters for the outbound ports.
//!
//! Used by tests and by the runtime's demo wiring. Each one can be slowed
//! down or made to fail so races and fallbacks can be exercised.

pub mod backend;
pub mod identity;
pub mod url_bar;

pub use backend::InMemoryBackend;
pub use identity::InMemoryIdentityProvider;
pub use url_bar::InMemoryUrlBar;
