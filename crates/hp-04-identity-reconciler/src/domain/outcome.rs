//! Decisions the reconciler can take for one identity event.

/// Where a salvaged profile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalvageSource {
    /// The user already installed in the store.
    InMemory,
    /// A snapshot from the local cache.
    Cache,
}

/// Why an event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A logout is in flight.
    LogoutInProgress,
    /// A logout began while a lookup was pending.
    SupersededByLogout,
    /// The event carried no session.
    NoSession,
    /// Refresh-like event with no rich profile anywhere.
    NoProfile,
}

/// Decision taken for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Rich backend profile installed.
    Backend,
    /// Previously known rich profile reinstalled.
    Salvaged(SalvageSource),
    /// Skeleton built from provider claims installed.
    Skeleton,
    /// Session cleared.
    LoggedOut,
    Ignored(IgnoreReason),
}

impl ReconcileOutcome {
    /// Metric label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Salvaged(SalvageSource::InMemory) => "salvaged_in_memory",
            Self::Salvaged(SalvageSource::Cache) => "salvaged_cache",
            Self::Skeleton => "skeleton",
            Self::LoggedOut => "logged_out",
            Self::Ignored(IgnoreReason::LogoutInProgress) => "ignored_fenced",
            Self::Ignored(IgnoreReason::SupersededByLogout) => "ignored_superseded",
            Self::Ignored(IgnoreReason::NoSession) => "ignored_no_session",
            Self::Ignored(IgnoreReason::NoProfile) => "ignored_no_profile",
        }
    }

    pub fn installed_user(self) -> bool {
        matches!(self, Self::Backend | Self::Salvaged(_) | Self::Skeleton)
    }
}
