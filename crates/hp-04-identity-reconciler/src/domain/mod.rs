//! Domain layer: the logout fence, decision outcomes and URL scrubbing.

pub mod fence;
pub mod outcome;
pub mod url_artifacts;

pub use fence::{FenceState, LogoutFence};
pub use outcome::{IgnoreReason, ReconcileOutcome, SalvageSource};
pub use url_artifacts::{strip_auth_artifacts, StrippedUrl, AUTH_QUERY_PARAMS};
