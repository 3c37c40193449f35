//! Numbered section lookup.
//!
//! A section starts at a line of the form `<prefix>N) <label>:` (or `N.`)
//! and its body runs up to the next line numbered `N+1`, or to the end of
//! the text.

use super::labels::{BLOCK_PREFIX, EMPH};
use regex::Regex;

/// Finds numbered, labelled sections in normalized model output.
pub struct SectionFinder {
    start: Regex,
    next: Regex,
}

impl SectionFinder {
    /// Build a finder for section `num` whose label matches `label_pattern`.
    ///
    /// Panics only if `label_pattern` is not a valid regex fragment, which
    /// for the constants in `labels` is a programming error.
    pub fn new(num: u8, label_pattern: &str) -> Self {
        let start = Regex::new(&format!(
            r"(?i)(?:^|\n){BLOCK_PREFIX}{num}\s*[).]\s*{EMPH}(?:{label_pattern}){EMPH}[ \t]*[:：]?{EMPH}"
        ))
        .expect("section label pattern");
        let next = Regex::new(&format!(r"\n{BLOCK_PREFIX}{}\s*[).]", num + 1))
            .expect("section boundary pattern");
        Self { start, next }
    }

    /// Body of the first matching section, trimmed. `None` when the
    /// numbered label is absent. An empty body is returned as `Some("")`.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        let m = self.start.find(text)?;
        let rest = &text[m.end()..];
        let body = match self.next.find(rest) {
            Some(b) => &rest[..b.start()],
            None => rest,
        };
        Some(body.trim())
    }
}
