//! Character-capped excerpts of context documents

/// First `limit` characters of `text`
///
/// A hard cutoff: it never splits a UTF-8 sequence but will happily cut a
/// word, a JSON value or an HTML tag in half.
pub fn excerpt(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// An excerpt wrapped the way every stage prompt embeds context
pub(crate) fn fenced(lang: &str, text: &str, limit: usize) -> String {
    format!("```{}\n{}...\n```", lang, excerpt(text, limit))
}
