//! Slot-2 highlight splitting.

use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on highlights kept from one reply.
pub const MAX_HIGHLIGHTS: usize = 6;

/// Fragments kept when the body has no bullet markers at all.
const MAX_ROUGH_FRAGMENTS: usize = 4;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•·∙]|\d+[.)])\s+").expect("bullet pattern"));

static ROUGH_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n;•·∙]|\.\s+").expect("rough split pattern"));

/// Split a slot-2 body into at most [`MAX_HIGHLIGHTS`] items.
///
/// Bulleted or numbered lines become one item each with the marker removed.
/// When no line carries a marker the body is cut on newlines, semicolons,
/// bullet glyphs and sentence ends, and the first four fragments are kept.
pub fn split_highlights(text: &str) -> Vec<String> {
    let mut items: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter_map(|l| BULLET.find(l).map(|m| l[m.end()..].to_string()))
        .collect();

    if items.is_empty() {
        items = rough_fragments(text)
            .into_iter()
            .take(MAX_ROUGH_FRAGMENTS)
            .collect();
    }

    items.truncate(MAX_HIGHLIGHTS);
    items
}

/// Sentence-ish fragments; a sentence-ending period stays with its sentence.
fn rough_fragments(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in ROUGH_SPLIT.find_iter(text) {
        let end = if m.as_str().starts_with('.') {
            m.start() + 1
        } else {
            m.start()
        };
        push_trimmed(&mut out, &text[last..end]);
        last = m.end();
    }
    push_trimmed(&mut out, &text[last..]);
    out
}

fn push_trimmed(out: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(fragment.to_string());
    }
}
