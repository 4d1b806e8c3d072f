//! Analysis records and the append-only batch.

use serde::{Deserialize, Serialize};

use super::verdict::Verdict;
use crate::domain::foundation::truncate_chars;

/// Maximum characters of the input thesis kept on a record.
pub const THESIS_MAX_CHARS: usize = 500;

/// Maximum characters of a failure detail stored in `effect`.
pub const ERROR_DETAIL_MAX_CHARS: usize = 200;

/// Verdict text written on records whose request failed.
pub const ERROR_VERDICT: &str = "Ошибка";

/// Whether the record came from a successful model response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Done,
    Error,
}

impl AnalysisStatus {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStatus::Done => "Готово",
            AnalysisStatus::Error => "Ошибка",
        }
    }
}

/// One evaluated thesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub thesis: String,
    pub effect: String,
    pub risks: String,
    pub verdict: String,
    pub status: AnalysisStatus,
}

impl AnalysisRecord {
    /// Creates an empty `Done` record for the thesis (truncated to 500 chars).
    pub fn new(thesis: &str) -> Self {
        Self {
            thesis: truncate_chars(thesis, THESIS_MAX_CHARS),
            effect: String::new(),
            risks: String::new(),
            verdict: String::new(),
            status: AnalysisStatus::Done,
        }
    }

    /// Creates the record stored when the request for `thesis` failed.
    ///
    /// The failure detail (first 200 chars) goes into `effect` so the
    /// operator sees why the row is empty.
    pub fn failed(thesis: &str, detail: &str) -> Self {
        Self {
            effect: truncate_chars(detail, ERROR_DETAIL_MAX_CHARS),
            verdict: ERROR_VERDICT.to_string(),
            status: AnalysisStatus::Error,
            ..Self::new(thesis)
        }
    }

    /// Classified verdict.
    pub fn verdict_class(&self) -> Verdict {
        Verdict::classify(&self.verdict)
    }

    pub fn is_error(&self) -> bool {
        self.status == AnalysisStatus::Error
    }
}

/// Counts per verdict class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub promote: usize,
    pub revise: usize,
    pub reject: usize,
    pub errors: usize,
}

/// Ordered results of one run, index-aligned with the input theses.
///
/// Grows by appending only; records are never reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisBatch {
    records: Vec<AnalysisRecord>,
}

impl AnalysisBatch {
    /// Creates an empty batch with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends the record for the next input item.
    pub fn push(&mut self, record: AnalysisRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AnalysisRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&AnalysisRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tallies verdict classes across the batch.
    pub fn summary(&self) -> BatchSummary {
        self.records
            .iter()
            .fold(BatchSummary { total: self.records.len(), ..Default::default() }, |mut acc, r| {
                match r.verdict_class() {
                    Verdict::Promote => acc.promote += 1,
                    Verdict::Revise => acc.revise += 1,
                    Verdict::Reject => acc.reject += 1,
                    Verdict::Error => acc.errors += 1,
                    Verdict::Unclassified => {}
                }
                acc
            })
    }

    /// Distinct non-empty verdict texts in first-seen order.
    pub fn distinct_verdicts(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            let verdict = record.verdict.as_str();
            if !verdict.is_empty() && !seen.contains(&verdict) {
                seen.push(verdict);
            }
        }
        seen
    }

    /// Copy of the batch holding only records whose verdict text is one of
    /// `verdicts`; an empty filter keeps all. Indices no longer line up with
    /// the input theses.
    pub fn filter_by_verdicts<S: AsRef<str>>(&self, verdicts: &[S]) -> AnalysisBatch {
        if verdicts.is_empty() {
            return self.clone();
        }
        let records = self
            .records
            .iter()
            .filter(|r| verdicts.iter().any(|v| v.as_ref() == r.verdict))
            .cloned()
            .collect();
        AnalysisBatch { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(verdict: &str) -> AnalysisRecord {
        AnalysisRecord {
            verdict: verdict.to_string(),
            ..AnalysisRecord::new("t")
        }
    }

    #[test]
    fn new_truncates_thesis() {
        let long = "я".repeat(THESIS_MAX_CHARS + 20);
        let record = AnalysisRecord::new(&long);
        assert_eq!(record.thesis.chars().count(), THESIS_MAX_CHARS);
        assert_eq!(record.status, AnalysisStatus::Done);
    }

    #[test]
    fn failed_marks_error_and_truncates_detail() {
        let detail = "x".repeat(500);
        let record = AnalysisRecord::failed("thesis", &detail);

        assert_eq!(record.status, AnalysisStatus::Error);
        assert_eq!(record.verdict, ERROR_VERDICT);
        assert_eq!(record.effect.len(), ERROR_DETAIL_MAX_CHARS);
        assert_eq!(record.thesis, "thesis");
        assert!(record.risks.is_empty());
    }

    #[test]
    fn summary_counts_each_class() {
        let mut batch = AnalysisBatch::default();
        batch.push(record("Продвигать - да"));
        batch.push(record("Продвигать"));
        batch.push(record("Доработать"));
        batch.push(AnalysisRecord::failed("t", "timeout"));
        batch.push(record(""));

        let summary = batch.summary();
        assert_eq!(
            summary,
            BatchSummary {
                total: 5,
                promote: 2,
                revise: 1,
                reject: 0,
                errors: 1,
            }
        );
    }

    #[test]
    fn distinct_verdicts_skips_empty_and_duplicates() {
        let mut batch = AnalysisBatch::default();
        batch.push(record("Доработать"));
        batch.push(record(""));
        batch.push(record("Отклонить"));
        batch.push(record("Доработать"));

        assert_eq!(batch.distinct_verdicts(), vec!["Доработать", "Отклонить"]);
    }

    #[test]
    fn filter_keeps_matching_records() {
        let mut batch = AnalysisBatch::default();
        batch.push(record("Доработать"));
        batch.push(record("Отклонить"));

        let filtered = batch.filter_by_verdicts(&["Отклонить"]);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].verdict, "Отклонить");

        let empty: [&str; 0] = [];
        assert_eq!(batch.filter_by_verdicts(&empty), batch);
    }
}
