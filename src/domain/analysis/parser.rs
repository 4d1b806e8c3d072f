//! Response-to-record parser.
//!
//! Turns the model's loosely structured reply into an [`AnalysisRecord`].
//! The expected shape is one or more blocks separated by `---`, each holding
//! lines tagged `ТЕЗИС:`, `ЭФФЕКТ:`, `РИСКИ:`, `ВЕРДИКТ:` (case-insensitive).
//! Parsing has no error channel: anything unrecognised is ignored and the
//! caller flags transport failures separately.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{AnalysisRecord, THESIS_MAX_CHARS};
use crate::domain::foundation::truncate_chars;

const BLOCK_SEPARATOR: &str = "---";

const THESIS_LABEL: &str = "ТЕЗИС:";
const EFFECT_LABEL: &str = "ЭФФЕКТ:";
const RISKS_LABEL: &str = "РИСКИ:";
const VERDICT_LABEL: &str = "ВЕРДИКТ:";

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));
static UNDERLINE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"__([^_]+)__").expect("valid regex"));
static UNDERLINE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"_([^_]+)_").expect("valid regex"));

/// First verdict keyword anywhere in the reply, plus the rest of its line.
static VERDICT_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(Продвигать|Доработать|Отклонить)[\s\-—:]*([^\n]*)").expect("valid regex")
});

/// Replaces inline emphasis markers with the text they enclose.
///
/// Bold is handled before italic so `**x**` does not leave stray asterisks.
/// Text with no markers comes back unchanged.
pub fn strip_markdown_emphasis(text: &str) -> String {
    let s = BOLD.replace_all(text, "$1");
    let s = ITALIC.replace_all(&s, "$1");
    let s = UNDERLINE_BOLD.replace_all(&s, "$1");
    UNDERLINE_ITALIC.replace_all(&s, "$1").into_owned()
}

/// Parser for SWOT-style model replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwotResponseParser;

impl SwotResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `raw_response` into a record for `thesis`.
    ///
    /// Later blocks and lines overwrite earlier values for the same field.
    /// Without an explicit verdict line, the first verdict keyword in the
    /// reply is used instead.
    pub fn parse(&self, thesis: &str, raw_response: &str) -> AnalysisRecord {
        let mut record = AnalysisRecord::new(thesis);
        let text = raw_response.trim();

        for block in text.split(BLOCK_SEPARATOR) {
            for line in block.trim().lines() {
                let line = line.trim();
                if let Some(value) = strip_label(line, THESIS_LABEL) {
                    let value = value.trim();
                    record.thesis = if value.is_empty() {
                        truncate_chars(thesis, THESIS_MAX_CHARS)
                    } else {
                        clean(value)
                    };
                } else if let Some(value) = strip_label(line, EFFECT_LABEL) {
                    record.effect = clean(value);
                } else if let Some(value) = strip_label(line, RISKS_LABEL) {
                    record.risks = clean(value);
                } else if let Some(value) = strip_label(line, VERDICT_LABEL) {
                    record.verdict = clean(value);
                }
            }
        }

        if record.verdict.is_empty() && !text.is_empty() {
            if let Some(verdict) = fallback_verdict(text) {
                record.verdict = verdict;
            }
        }

        record
    }
}

/// Convenience wrapper over [`SwotResponseParser::parse`].
pub fn parse_response(thesis: &str, raw_response: &str) -> AnalysisRecord {
    SwotResponseParser.parse(thesis, raw_response)
}

fn clean(value: &str) -> String {
    strip_markdown_emphasis(value.trim()).trim().to_string()
}

/// Returns the remainder of `line` if it starts with `label`, ignoring case.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let label_chars = label.chars().count();
    let end = match line.char_indices().nth(label_chars) {
        Some((idx, _)) => idx,
        None if line.chars().count() == label_chars => line.len(),
        None => return None,
    };
    let (head, rest) = line.split_at(end);
    (head.to_uppercase() == label).then_some(rest)
}

/// First verdict keyword anywhere in `text`, joined to the rest of its line
/// as `"<keyword> - <rest>"`. A keyword that ends its line yields the bare
/// keyword, never a dangling separator.
fn fallback_verdict(text: &str) -> Option<String> {
    let captures = VERDICT_KEYWORD.captures(text)?;
    let keyword = captures.get(1)?.as_str();
    let tail = captures.get(2).map_or("", |m| m.as_str()).trim();
    let verdict = if tail.is_empty() {
        keyword.to_string()
    } else {
        format!("{} - {}", keyword, tail)
    };
    Some(strip_markdown_emphasis(&verdict).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::AnalysisStatus;
    use proptest::prelude::*;

    mod labelled_lines {
        use super::*;

        #[test]
        fn parses_all_four_fields() {
            let record = parse_response(
                "original",
                "ТЕЗИС: A\nЭФФЕКТ: B\nРИСКИ: C\nВЕРДИКТ: Продвигать - growth",
            );

            assert_eq!(record.thesis, "A");
            assert_eq!(record.effect, "B");
            assert_eq!(record.risks, "C");
            assert_eq!(record.verdict, "Продвигать - growth");
            assert_eq!(record.status, AnalysisStatus::Done);
        }

        #[test]
        fn labels_are_case_insensitive() {
            let record = parse_response("t", "эффект: рост\nВердикт: Доработать");
            assert_eq!(record.effect, "рост");
            assert_eq!(record.verdict, "Доработать");
        }

        #[test]
        fn strips_emphasis_from_values() {
            let record = parse_response("t", "РИСКИ: **высокие** и _новые_ затраты");
            assert_eq!(record.risks, "высокие и новые затраты");
        }

        #[test]
        fn later_blocks_overwrite_earlier_values() {
            let record = parse_response(
                "t",
                "ЭФФЕКТ: first\nВЕРДИКТ: Отклонить\n---\nЭФФЕКТ: second",
            );
            assert_eq!(record.effect, "second");
            assert_eq!(record.verdict, "Отклонить");
        }

        #[test]
        fn ignores_unrecognised_lines() {
            let record = parse_response("t", "Intro text\nЭФФЕКТ: B\n## heading");
            assert_eq!(record.effect, "B");
            assert!(record.risks.is_empty());
        }

        #[test]
        fn empty_thesis_label_keeps_input_thesis() {
            let record = parse_response("input thesis", "ТЕЗИС:   \nЭФФЕКТ: B");
            assert_eq!(record.thesis, "input thesis");
        }

        #[test]
        fn missing_thesis_label_defaults_to_truncated_input() {
            let long = "т".repeat(THESIS_MAX_CHARS + 5);
            let record = parse_response(&long, "ЭФФЕКТ: B");
            assert_eq!(record.thesis.chars().count(), THESIS_MAX_CHARS);
        }
    }

    mod verdict_fallback {
        use super::*;

        #[test]
        fn finds_keyword_without_label() {
            let record = parse_response("T", "Окончательно: Отклонить, слишком рискованно");
            assert!(!record.verdict.is_empty());
            assert!(record.verdict.contains("Отклонить"));
        }

        #[test]
        fn includes_trailing_text_after_separator() {
            let record = parse_response("T", "Итог:\nдоработать — уточнить бюджет");
            assert_eq!(record.verdict, "доработать - уточнить бюджет");
        }

        #[test]
        fn keyword_alone_yields_keyword() {
            let record = parse_response("T", "Продвигать");
            assert_eq!(record.verdict, "Продвигать");
        }

        #[test]
        fn keyword_at_line_end_has_no_dangling_separator() {
            let record = parse_response("T", "Итог разбора: Отклонить — ");
            assert_eq!(record.verdict, "Отклонить");
            assert_eq!(record.verdict_class(), crate::domain::analysis::Verdict::Reject);
        }

        #[test]
        fn explicit_label_suppresses_fallback() {
            let record = parse_response("T", "Можно отклонить.\nВЕРДИКТ: Продвигать");
            assert_eq!(record.verdict, "Продвигать");
        }

        #[test]
        fn uses_first_keyword_in_reply() {
            let record = parse_response("T", "Не стоит отклонить сразу.\nПродвигать");
            assert!(record.verdict.starts_with("отклонить"));
        }
    }

    #[test]
    fn unstructured_reply_yields_empty_done_record() {
        let record = parse_response("T", "I cannot help with that.");
        assert_eq!(record.thesis, "T");
        assert!(record.effect.is_empty());
        assert!(record.risks.is_empty());
        assert!(record.verdict.is_empty());
        assert_eq!(record.status, AnalysisStatus::Done);
    }

    #[test]
    fn empty_reply_yields_empty_record() {
        let record = parse_response("T", "");
        assert!(record.verdict.is_empty());
    }

    mod emphasis {
        use super::*;

        #[test]
        fn strips_every_marker_kind() {
            assert_eq!(strip_markdown_emphasis("**b** *i* __u__ _v_"), "b i u v");
        }

        #[test]
        fn leaves_unpaired_markers() {
            assert_eq!(strip_markdown_emphasis("5 * 3"), "5 * 3");
        }

        proptest! {
            #[test]
            fn marker_free_text_is_unchanged(text in "[^*_]{0,80}") {
                prop_assert_eq!(strip_markdown_emphasis(&text), text);
            }

            #[test]
            fn parse_never_panics(thesis in ".{0,40}", reply in ".{0,200}") {
                let record = parse_response(&thesis, &reply);
                prop_assert_eq!(record.status, AnalysisStatus::Done);
            }
        }
    }
}
