//! Verdict classification for styling, filtering and summaries.

use serde::{Deserialize, Serialize};

/// Categorical reading of a free-text verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// "Продвигать" - take the proposal forward.
    Promote,
    /// "Доработать" - rework before deciding.
    Revise,
    /// "Отклонить" - drop the proposal.
    Reject,
    /// "Ошибка" - the model could not be reached for this item.
    Error,
    /// Nothing recognisable.
    Unclassified,
}

impl Verdict {
    /// Classifies verdict text by case-insensitive keyword containment.
    ///
    /// Keywords are checked in the order promote, revise, reject, error; the
    /// first hit wins.
    pub fn classify(text: &str) -> Self {
        let upper = text.trim().to_uppercase();
        if upper.contains("ПРОДВИГАТЬ") {
            Verdict::Promote
        } else if upper.contains("ДОРАБОТАТЬ") {
            Verdict::Revise
        } else if upper.contains("ОТКЛОНИТЬ") {
            Verdict::Reject
        } else if upper.contains("ОШИБКА") {
            Verdict::Error
        } else {
            Verdict::Unclassified
        }
    }

    /// Returns true for verdicts a presenter should flag as negative.
    pub fn is_negative(&self) -> bool {
        matches!(self, Verdict::Reject | Verdict::Error)
    }
}
