//! Case-insensitive find
//!
//! A search starts either from the top of the document or, for "find next",
//! from the end of the previous match. It never wraps around.

use std::ops::Range;

/// Status message for a miss
pub const NOT_FOUND: &str = "Not found.";

/// Find the first case-insensitive occurrence of `query` at or after `from`
///
/// Returns the byte range of the match in `haystack`. An empty query never
/// matches; `from` past the end or inside a character finds nothing.
pub fn find(haystack: &str, query: &str, from: usize) -> Option<Range<usize>> {
    if query.is_empty() || from > haystack.len() || !haystack.is_char_boundary(from) {
        return None;
    }

    let tail = &haystack[from..];
    tail.char_indices()
        .find_map(|(i, _)| match_len(&tail[i..], query).map(|len| from + i..from + i + len))
}

/// Byte length of the prefix of `text` that equals `query` ignoring case
fn match_len(text: &str, query: &str) -> Option<usize> {
    let mut len = 0;
    let mut chars = text.chars();
    for q in query.chars() {
        let c = chars.next()?;
        if !c.to_lowercase().eq(q.to_lowercase()) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

/// Query and resume position across find / find next
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindState {
    query: String,
    next_from: usize,
}

impl FindState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether a query has been entered
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Start a new search from the top of `text`
    pub fn find_first(&mut self, text: &str, query: &str) -> Option<Range<usize>> {
        self.query = query.to_string();
        self.next_from = 0;
        self.find_next(text)
    }

    /// Continue after the previous match
    ///
    /// A miss leaves the resume position unchanged.
    pub fn find_next(&mut self, text: &str) -> Option<Range<usize>> {
        let found = find(text, &self.query, self.next_from.min(text.len()))?;
        self.next_from = found.end;
        Some(found)
    }

    /// Forget the resume position (the document was replaced)
    pub fn reset(&mut self) {
        self.next_from = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("Hello World", "world", 0), Some(6..11));
        assert_eq!(find("Hello World", "HELLO", 0), Some(0..5));
        assert_eq!(find("Hello World", "xyz", 0), None);
    }

    #[test]
    fn test_find_from_offset() {
        let text = "abc abc abc";
        assert_eq!(find(text, "abc", 1), Some(4..7));
        assert_eq!(find(text, "abc", 9), None);
        assert_eq!(find(text, "abc", 99), None);
    }

    #[test]
    fn test_empty_query_never_matches() {
        assert_eq!(find("anything", "", 0), None);
    }

    #[test]
    fn test_find_multibyte() {
        let text = "Ünïcode ÜNÏ";
        let first = find(text, "ünï", 0).unwrap();
        assert_eq!(&text[first.clone()], "Ünï");
        let second = find(text, "ünï", first.end).unwrap();
        assert_eq!(&text[second], "ÜNÏ");
    }

    #[test]
    fn test_find_next_advances_without_wrapping() {
        let text = "IDOR here, idor there";
        let mut state = FindState::new();
        assert_eq!(state.find_first(text, "idor"), Some(0..4));
        assert_eq!(state.find_next(text), Some(11..15));
        assert_eq!(state.find_next(text), None);
        assert_eq!(state.find_next(text), None);
    }

    #[test]
    fn test_find_first_restarts_from_top() {
        let text = "x x";
        let mut state = FindState::new();
        state.find_first(text, "x");
        state.find_next(text);
        assert_eq!(state.find_first(text, "x"), Some(0..1));
    }

    #[test]
    fn test_find_next_after_document_shrinks() {
        let mut state = FindState::new();
        state.find_first("long text with match", "match");
        assert_eq!(state.find_next("short"), None);
        state.reset();
        assert_eq!(state.find_next("a match"), Some(2..7));
    }
}
