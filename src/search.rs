//! Search and replace over a whole buffer
//!
//! Occurrences are counted one by one as they are found. Matches are
//! non-overlapping and scanned left to right.

use tracing::debug;

/// Number of non-overlapping occurrences of `find` in `text`
pub fn count_occurrences(text: &str, find: &str) -> usize {
    if find.is_empty() {
        return 0;
    }
    text.match_indices(find).count()
}

/// Replace every occurrence of `find`, returning the new text and how many were replaced
///
/// An empty `find` matches nothing.
pub fn replace_all(text: &str, find: &str, replace: &str) -> (String, usize) {
    if find.is_empty() {
        return (text.to_string(), 0);
    }

    let mut result = String::with_capacity(text.len());
    let mut count = 0;
    let mut last = 0;

    for (start, matched) in text.match_indices(find) {
        result.push_str(&text[last..start]);
        result.push_str(replace);
        last = start + matched.len();
        count += 1;
    }
    result.push_str(&text[last..]);

    debug!(count, "replaced occurrences");
    (result, count)
}
