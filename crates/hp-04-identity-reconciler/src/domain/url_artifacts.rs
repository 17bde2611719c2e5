//! # URL Artifact Scrubbing
//!
//! Identity redirects leave credentials in the address bar. They are removed
//! in place (no reload) as soon as a session is seen.

use url::Url;

/// Query parameters that never survive a scrub.
pub const AUTH_QUERY_PARAMS: &[&str] = &[
    "code",
    "error",
    "error_description",
    "access_token",
    "refresh_token",
    "expires_in",
    "token_type",
];

/// Parameters whose presence means the app was reached through a sign-in
/// redirect.
const REDIRECT_MARKERS: &[&str] = &["code", "access_token", "refresh_token"];

/// Result of a scrub that removed something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedUrl {
    pub url: String,
    pub redirect_detected: bool,
}

/// Remove authentication artifacts from `raw`.
///
/// Returns `None` when the URL is unparseable or already clean.
pub fn strip_auth_artifacts(raw: &str) -> Option<StrippedUrl> {
    let mut url = Url::parse(raw).ok()?;

    let (removed, kept): (Vec<(String, String)>, Vec<(String, String)>) = url
        .query_pairs()
        .into_owned()
        .partition(|(key, _)| AUTH_QUERY_PARAMS.contains(&key.as_str()));
    let fragment_has_token = url
        .fragment()
        .is_some_and(|fragment| fragment.contains("access_token"));

    if removed.is_empty() && !fragment_has_token {
        return None;
    }

    let redirect_detected = fragment_has_token
        || removed
            .iter()
            .any(|(key, _)| REDIRECT_MARKERS.contains(&key.as_str()));

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept.iter());
    }
    if fragment_has_token {
        url.set_fragment(None);
    }

    Some(StrippedUrl {
        url: url.to_string(),
        redirect_detected,
    })
}
