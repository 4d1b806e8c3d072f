//! Analysis Module - batch thesis evaluation records.
//!
//! # Components
//!
//! - `AnalysisRecord` / `AnalysisBatch` - per-thesis results, index-aligned with input
//! - `Verdict` - keyword classification of free-text verdicts
//! - `SwotResponseParser` - turns a model reply into a record
//!
//! Everything here is pure; the network side lives in the application layer.

mod parser;
mod record;
mod verdict;

pub use parser::{parse_response, strip_markdown_emphasis, SwotResponseParser};
pub use record::{
    AnalysisBatch, AnalysisRecord, AnalysisStatus, BatchSummary, ERROR_DETAIL_MAX_CHARS,
    ERROR_VERDICT, THESIS_MAX_CHARS,
};
pub use verdict::Verdict;
