//! RunAnalysis handler - sequential SWOT evaluation of a thesis list.
//!
//! Theses are sent one at a time in input order. Each item yields exactly one
//! record: the parsed reply on success, or an error record carrying the
//! failure detail. The observer sees the partial batch after every item.
//! Dropping the returned future aborts the run; no partial resume exists.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::super::session_endpoint;
use crate::config::AnalysisConfig;
use crate::domain::analysis::{AnalysisBatch, AnalysisRecord, SwotResponseParser};
use crate::domain::session::AnalystSession;
use crate::ports::{ChatCompletion, CompletionRequest};

/// Errors that stop a run before the first request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Введите API ключ")]
    MissingCredential,
}

/// Input for one batch run.
#[derive(Debug, Clone)]
pub struct RunAnalysisCommand {
    pub theses: Vec<String>,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RunAnalysisCommand {
    /// Creates a command with the default sampling settings (0.5, 600 tokens).
    pub fn new(theses: Vec<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            theses,
            system_prompt: system_prompt.into(),
            temperature: 0.5,
            max_tokens: 600,
        }
    }

    /// Creates a command using the prompt and sampling settings from config.
    pub fn from_config(theses: Vec<String>, config: &AnalysisConfig) -> Self {
        Self {
            theses,
            system_prompt: config.system_prompt(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Progress callback invoked after every processed item.
pub trait AnalysisObserver: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize, batch: &AnalysisBatch);
}

impl<F> AnalysisObserver for F
where
    F: Fn(usize, usize, &AnalysisBatch) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize, batch: &AnalysisBatch) {
        self(completed, total, batch)
    }
}

/// Observer that ignores progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {
    fn on_progress(&self, _completed: usize, _total: usize, _batch: &AnalysisBatch) {}
}

/// Handler for batch analysis.
pub struct RunAnalysisHandler<C: ChatCompletion> {
    client: Arc<C>,
    base_url: String,
    parser: SwotResponseParser,
}

impl<C: ChatCompletion> RunAnalysisHandler<C> {
    pub fn new(client: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            parser: SwotResponseParser::new(),
        }
    }

    /// Runs the batch and stores it as the session's last batch.
    pub async fn handle(
        &self,
        session: &mut AnalystSession,
        cmd: RunAnalysisCommand,
        observer: &dyn AnalysisObserver,
    ) -> Result<AnalysisBatch, AnalysisError> {
        let endpoint =
            session_endpoint(session, &self.base_url).ok_or(AnalysisError::MissingCredential)?;

        let total = cmd.theses.len();
        info!(session_id = %session.id(), total, "Starting batch analysis");

        let mut batch = AnalysisBatch::with_capacity(total);
        for (index, thesis) in cmd.theses.iter().enumerate() {
            let request = CompletionRequest::single_shot(cmd.system_prompt.as_str(), thesis.as_str())
                .with_temperature(cmd.temperature)
                .with_max_tokens(cmd.max_tokens);

            let record = match self.client.complete(&endpoint, request).await.into_result() {
                Ok(reply) => {
                    debug!(index, "Thesis analysed");
                    self.parser.parse(thesis, &reply)
                }
                Err(e) => {
                    warn!(index, error = %e, "Thesis analysis failed");
                    AnalysisRecord::failed(thesis, &e.to_string())
                }
            };

            batch.push(record);
            observer.on_progress(index + 1, total, &batch);
        }

        let summary = batch.summary();
        info!(
            session_id = %session.id(),
            total = summary.total,
            promote = summary.promote,
            revise = summary.revise,
            reject = summary.reject,
            errors = summary.errors,
            "Batch analysis finished"
        );

        session.store_batch(batch.clone());
        Ok(batch)
    }
}
