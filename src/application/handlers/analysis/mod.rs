//! Batch thesis analysis.

mod run_analysis;

pub use run_analysis::{
    AnalysisError, AnalysisObserver, NoopObserver, RunAnalysisCommand, RunAnalysisHandler,
};
