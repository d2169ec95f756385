//! Query highlighting for rendered search results.

use regex::{Captures, RegexBuilder};

/// Wrap every case-insensitive occurrence of `query` in `<mark>` tags.
///
/// The query is matched literally. Empty text or query is returned as-is.
pub fn highlight_matches(text: &str, query: &str) -> String {
    if text.is_empty() || query.is_empty() {
        return text.to_string();
    }

    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::debug!(error = %e, "Highlight pattern rejected");
            return text.to_string();
        }
    };

    pattern
        .replace_all(text, |caps: &Captures| format!("<mark>{}</mark>", &caps[0]))
        .into_owned()
}
