//! Section label synonyms for the three-slot reply convention.
//!
//! The system prompt asks the model for `1) 현재 발화 맥락 요약:`,
//! `2) 중요사항:` and `3) 코멘트:`. Models drift from that wording, so each
//! slot accepts a small set of Korean and English synonyms. Patterns are
//! regex fragments, matched case-insensitively.

/// Slot 1: context summary.
pub const SUMMARY: &str = r"(?:현재\s*)?(?:발화|대화?)?\s*맥락\s*요약|요약|(?:current\s+)?context(?:\s+summary)?|summary";

/// Slot 2: highlights / key points.
pub const HIGHLIGHTS: &str = r"코멘트\s*중요\s*사항|중요\s*사항|중요\s*포인트|핵심|포인트|highlights?|key\s*points?|important\s*points?";

/// Slot 3: the final comment.
pub const COMMENT: &str = r"(?:최종\s*)?코멘트|최종\s*논평|논평|final\s*remarks?|remarks?|comments?";

/// Markdown glyphs that may precede a section number (quote, heading,
/// list, bold) plus ordinary whitespace.
pub const BLOCK_PREFIX: &str = r"[\s>*#-]*";

/// Optional bold/underline emphasis around a label or its colon.
pub const EMPH: &str = r"(?:\*\*|__)?";

/// Characters stripped from both ends of a single-line slot-3 capture.
pub const DECORATIVE: &[char] = &[
    '"', '\'', '`', '“', '”', '‘', '’', '「', '」', '『', '』', '«', '»',
];
