//! Path helpers for user-supplied directory names.

use std::path::{Component, Path, PathBuf};

use crate::errors::SlackError;

/// Joins a single user-supplied directory name onto `base`.
///
/// The segment must resolve to exactly one normal path component: separators,
/// `.`/`..`, absolute paths and NUL bytes are rejected so a target can never
/// escape the base directory.
///
/// # Errors
///
/// Returns `SlackError::InvalidTarget` when the segment is not a plain name.
pub fn safe_join(base: &Path, segment: &str) -> Result<PathBuf, SlackError> {
    let reject = |reason: &str| SlackError::InvalidTarget {
        target: segment.to_string(),
        reason: reason.to_string(),
    };

    if segment.trim().is_empty() {
        return Err(reject("name is blank"));
    }
    if segment.contains('\0') {
        return Err(reject("name contains a NUL byte"));
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(reject("name contains a path separator"));
    }

    let mut components = Path::new(segment).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(base.join(segment)),
        _ => Err(reject("name is not a plain directory name")),
    }
}
