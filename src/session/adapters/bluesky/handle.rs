//! Handle extraction from the account references players actually type.

use url::Url;

/// Extracts a bare handle from a handle, an `@handle`, or a profile URL.
///
/// For URLs the segment after `/profile/` wins; otherwise the last non-empty
/// path segment is taken. Anything unparseable passes through trimmed.
#[must_use]
pub fn extract_handle(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        if let Some(handle) = handle_from_url(trimmed) {
            return handle;
        }
        return trimmed.to_owned();
    }
    trimmed.trim_start_matches('@').to_owned()
}

fn handle_from_url(reference: &str) -> Option<String> {
    let parsed = Url::parse(reference).ok()?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|path| path.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();
    let after_profile = segments
        .iter()
        .position(|segment| *segment == "profile")
        .and_then(|index| segments.get(index + 1));
    after_profile
        .or_else(|| segments.last())
        .map(|segment| (*segment).to_owned())
}
