//! Comment extraction domain: public API.
//!
//! Turns the free-form text a model returns into the one line the tooltip
//! shows, and optionally into the three-part breakdown
//! (summary / highlights / comment) for richer panels.
//!
//! Both entry points are total: any input yields a value, malformed
//! replies just land in a later fallback tier.

pub mod highlights;
mod labels;
mod sections;
pub mod tiers;

pub use highlights::{split_highlights, MAX_HIGHLIGHTS};
pub use tiers::Tier;

use serde::{Deserialize, Serialize};

/// Leading pad that keeps the first glyph from being clipped by the
/// tooltip's left edge in some layouts.
pub const DISPLAY_PAD: char = '\u{00A0}';

/// Structured view of one model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedComment {
    /// All three labelled sections were found and slot 3 is non-empty.
    pub ok: bool,
    pub summary: String,
    pub highlights: Vec<String>,
    pub comment: String,
    /// The normalized input.
    pub raw: String,
}

/// Extracted display text plus the tier that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub text: String,
    pub tier: Tier,
}

/// Collapse line endings to `\n` and trim ASCII whitespace at both ends.
///
/// Only space, tab, CR and LF are trimmed. A leading [`DISPLAY_PAD`] is
/// content and survives.
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .to_string()
}

/// Best-guess final reply for display. Empty only for blank input.
pub fn extract_comment(raw: &str) -> String {
    extract(raw).text
}

/// Like [`extract_comment`] but also reports which tier matched.
pub fn extract(raw: &str) -> Extraction {
    let text = normalize(raw);
    if text.is_empty() {
        return Extraction {
            text,
            tier: Tier::WholeText,
        };
    }
    let (found, tier) = tiers::run(&text);
    log::debug!("[COMMENT] extracted {} chars via {:?}", found.len(), tier);
    Extraction { text: found, tier }
}

/// Full three-part breakdown.
///
/// When the labelled structure is missing, `ok` is false, the first
/// paragraph stands in as the summary, highlights are cut from the rest,
/// and `comment` carries the same best guess [`extract_comment`] gives.
pub fn parse_comment(raw: &str) -> ParsedComment {
    let text = normalize(raw);

    let sections = (
        tiers::SUMMARY.find(&text),
        tiers::HIGHLIGHTS.find(&text),
        tiers::COMMENT.find(&text),
    );
    if let (Some(summary), Some(points), Some(comment)) = sections {
        if !comment.is_empty() {
            return ParsedComment {
                ok: true,
                summary: summary.to_string(),
                highlights: split_highlights(points),
                comment: comment.to_string(),
                raw: text,
            };
        }
    }

    let paras = tiers::paragraphs(&text);
    let summary = paras
        .first()
        .copied()
        .or_else(|| text.lines().next())
        .unwrap_or("")
        .to_string();
    let rest = text
        .find(summary.as_str())
        .map(|at| &text[at + summary.len()..])
        .unwrap_or("")
        .trim();
    let comment = if text.is_empty() {
        String::new()
    } else {
        tiers::run(&text).0
    };

    ParsedComment {
        ok: false,
        highlights: split_highlights(rest),
        summary,
        comment,
        raw: text,
    }
}

/// Prefix the display pad once. Already padded text is returned unchanged.
pub fn pad_for_display(text: &str) -> String {
    if text.starts_with(DISPLAY_PAD) {
        text.to_string()
    } else {
        format!("{DISPLAY_PAD}{text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_line_endings() {
        assert_eq!(normalize("a\r\nb\rc\n"), "a\nb\nc");
    }

    #[test]
    fn normalize_keeps_display_pad() {
        assert_eq!(normalize("  \u{a0}hi \n"), "\u{a0}hi");
    }

    #[test]
    fn blank_input_extracts_empty() {
        assert_eq!(extract_comment(""), "");
        assert_eq!(extract_comment(" \r\n\t"), "");
    }

    #[test]
    fn crlf_reply_is_structured() {
        let raw = "1) 요약: a\r\n2) 중요사항: - b\r\n3) 코멘트: c\r\n";
        let e = extract(raw);
        assert_eq!(e.text, "c");
        assert_eq!(e.tier, Tier::Structured);
    }

    #[test]
    fn parse_structured_reply() {
        let raw = "1) 현재 발화 맥락 요약: 로그를 보는 중\n\
                   2) 중요사항:\n- 에러 두 건\n- 재시도 실패\n\
                   3) 코멘트: 재시도 간격부터 봐.";
        let parsed = parse_comment(raw);
        assert!(parsed.ok);
        assert_eq!(parsed.summary, "로그를 보는 중");
        assert_eq!(parsed.highlights, vec!["에러 두 건", "재시도 실패"]);
        assert_eq!(parsed.comment, "재시도 간격부터 봐.");
    }

    #[test]
    fn parse_structured_keeps_quoted_comment() {
        let parsed = parse_comment("1) 요약: a\n2) 중요사항:\n- b\n3) 코멘트: \"\"");
        assert!(parsed.ok);
        assert_eq!(parsed.comment, "\"\"");
        assert_eq!(parsed.highlights, vec!["b"]);
    }

    #[test]
    fn parse_unstructured_reply() {
        let parsed = parse_comment("First thought.\n\nSecond thought. Third.");
        assert!(!parsed.ok);
        assert_eq!(parsed.summary, "First thought.");
        assert_eq!(parsed.highlights, vec!["Second thought.", "Third."]);
        assert_eq!(parsed.comment, "Second thought. Third.");
    }

    #[test]
    fn parse_empty_reply() {
        let parsed = parse_comment("");
        assert!(!parsed.ok);
        assert!(parsed.summary.is_empty());
        assert!(parsed.highlights.is_empty());
        assert!(parsed.comment.is_empty());
    }

    #[test]
    fn pad_is_applied_once() {
        let once = pad_for_display("hi");
        assert_eq!(once, "\u{a0}hi");
        assert_eq!(pad_for_display(&once), once);
    }
}
