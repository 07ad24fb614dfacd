//! Result-entry derivation from the final display buffer
//!
//! The template asks the model for two variants formatted as a numbered
//! list, so the split keys off the literal `1.` and `2.` markers. This is a
//! heuristic over a formatting convention, not a guaranteed parse: output
//! that drops or reorders the markers degrades to fewer (possibly one)
//! entries rather than failing.

/// Split the final buffer into discrete result entries
///
/// Discards everything up to and including the first `1.` marker (the
/// sentinel prefix), then splits the remainder once on the first `2.`
/// marker. Entries are trimmed; empty entries are dropped. When no `1.`
/// marker exists the whole trimmed buffer becomes the single entry. A pure
/// function of the buffer, so repeated application yields identical output.
#[must_use]
pub fn split_entries(buffer: &str) -> Vec<String> {
    let Some(first) = buffer.find("1.") else {
        let whole = buffer.trim();
        return if whole.is_empty() {
            Vec::new()
        } else {
            vec![whole.to_owned()]
        };
    };

    let body = &buffer[first + 2..];
    let parts = match body.find("2.") {
        Some(second) => vec![&body[..second], &body[second + 2..]],
        None => vec![body],
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
