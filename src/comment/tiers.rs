//! Ordered fallback tiers for picking the final reply out of model output.
//!
//! Each tier is a plain function from normalized text to an optional
//! non-empty string. Tiers run in order and the first hit wins; the last
//! tier always hits, so extraction is total.

use super::labels::{self, BLOCK_PREFIX, DECORATIVE};
use super::sections::SectionFinder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Which strategy produced an extracted comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// All three labelled sections present; slot 3 body.
    Structured,
    /// A `3)` line with a comment label; everything after the label.
    LabeledSlot,
    /// A `3)` line with any label; everything on the following lines.
    NumberedSlot,
    /// Last blank-line separated paragraph.
    LastParagraph,
    /// The normalized text as-is.
    WholeText,
}

type Matcher = fn(&str) -> Option<String>;

/// Tier order. Earlier entries win.
pub const TIERS: [(Tier, Matcher); 5] = [
    (Tier::Structured, structured),
    (Tier::LabeledSlot, labeled_slot),
    (Tier::NumberedSlot, numbered_slot),
    (Tier::LastParagraph, last_paragraph),
    (Tier::WholeText, whole_text),
];

pub(crate) static SUMMARY: LazyLock<SectionFinder> =
    LazyLock::new(|| SectionFinder::new(1, labels::SUMMARY));
pub(crate) static HIGHLIGHTS: LazyLock<SectionFinder> =
    LazyLock::new(|| SectionFinder::new(2, labels::HIGHLIGHTS));
pub(crate) static COMMENT: LazyLock<SectionFinder> =
    LazyLock::new(|| SectionFinder::new(3, labels::COMMENT));

static LABELED_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)(?:^|\n){BLOCK_PREFIX}3\s*[).]\s*(?:\*\*|__)?(?:{})(?:\*\*|__)?[ \t]*[:：]?(?:\*\*|__)?([\s\S]*)$",
        labels::COMMENT
    ))
    .expect("labeled slot pattern")
});

static NUMBERED_SLOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:^|\n){BLOCK_PREFIX}3\s*[).][^\n]*\n([\s\S]*)$"))
        .expect("numbered slot pattern")
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("paragraph pattern"));

/// Run the tiers in order and return the first hit with its tier.
pub fn run(text: &str) -> (String, Tier) {
    for (tier, matcher) in TIERS {
        if let Some(found) = matcher(text) {
            return (found, tier);
        }
    }
    // `whole_text` never declines.
    (text.to_string(), Tier::WholeText)
}

/// Slot 3 of a reply that carries all three labelled sections, trimmed
/// and otherwise verbatim.
pub fn structured(text: &str) -> Option<String> {
    SUMMARY.find(text)?;
    HIGHLIGHTS.find(text)?;
    non_empty(COMMENT.find(text)?)
}

/// `3) <comment label>:` anywhere, sections 1 and 2 optional.
pub fn labeled_slot(text: &str) -> Option<String> {
    let caps = LABELED_SLOT.captures(text)?;
    non_empty(&strip_decoration(caps[1].trim()))
}

/// `3)` line with an unrecognized label; its label line is skipped.
pub fn numbered_slot(text: &str) -> Option<String> {
    let caps = NUMBERED_SLOT.captures(text)?;
    non_empty(&strip_decoration(caps[1].trim()))
}

pub fn last_paragraph(text: &str) -> Option<String> {
    paragraphs(text).last().map(|p| p.to_string())
}

pub fn whole_text(text: &str) -> Option<String> {
    Some(text.to_string())
}

/// Non-empty, trimmed blank-line separated paragraphs.
pub(crate) fn paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Drop wrapping quotes and backticks from a single-line capture.
/// Multi-line captures are returned unchanged.
fn strip_decoration(s: &str) -> String {
    if s.contains('\n') {
        return s.to_string();
    }
    s.trim_start_matches(DECORATIVE)
        .trim_end_matches(DECORATIVE)
        .trim()
        .to_string()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
