//! # Hydration Report
//!
//! Summary of one boot, returned by `SessionHydrator::run`.

use shared_types::UserId;

/// Which link of the id chain produced the current user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    Session,
    BackendMarker,
    CacheLastActive,
    SecondSessionCheck,
}

/// Where the installed profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileSource {
    Backend,
    Cache,
    Skeleton,
    /// The realtime listener installed a full profile during boot and the
    /// hydrator kept it.
    Realtime,
    /// No user could be resolved; the session was left as it was.
    #[default]
    None,
}

impl ProfileSource {
    /// Metric label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Cache => "cache",
            Self::Skeleton => "skeleton",
            Self::Realtime => "realtime",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub source: ProfileSource,
    pub user_id: Option<UserId>,
    pub id_source: Option<IdSource>,
    /// The first remote session check hit the deadline.
    pub session_timed_out: bool,
    /// An OAuth-style redirect was found in the address bar.
    pub redirect_detected: bool,
    /// Non-fatal failure that pushed the boot onto a fallback path.
    pub error: Option<String>,
}

impl HydrationReport {
    pub fn is_authenticated(&self) -> bool {
        self.source != ProfileSource::None
    }
}
