//! Live process environment overlay.
//!
//! Responsibilities:
//! - Snapshot the live process environment into a `RawEnvironment`.
//! - Overlay live variables on top of the merged dotenv layer.
//! - Provide a helper for reading single env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Loading dotenv files (see dotenv.rs).
//! - Casting or validating values (see the `schema` module).
//!
//! Invariants:
//! - Live environment variables always win over dotenv values, even empty ones.
//! - Variables whose name or value is not valid UTF-8 are skipped.

use super::raw::RawEnvironment;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Current process environment, UTF-8 entries only.
pub fn process_environment() -> RawEnvironment {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                tracing::debug!(var = %key, "skipping environment variable with non-UTF-8 value");
                None
            }
            (Err(_), _) => {
                tracing::debug!("skipping environment variable with non-UTF-8 name");
                None
            }
        })
        .collect()
}

/// Overlay `live` on top of `files`; every live key replaces the file value.
pub fn overlay<I, K, V>(files: RawEnvironment, live: I) -> RawEnvironment
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut merged = files;
    merged.merge(live.into_iter().collect());
    merged
}

/// Overlay the current process environment on top of `files`.
pub fn overlay_process_env(files: RawEnvironment) -> RawEnvironment {
    let mut merged = files;
    merged.merge(process_environment());
    merged
}
