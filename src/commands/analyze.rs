use std::sync::Arc;

use anyhow::Context;
use strategic_analyst::adapters::{FileDocumentReader, TextReportExporter};
use strategic_analyst::application::{LoadDocumentHandler, RunAnalysisCommand, RunAnalysisHandler};
use strategic_analyst::domain::analysis::AnalysisBatch;
use strategic_analyst::domain::prompts::resolve_analysis_prompt;
use strategic_analyst::ports::{
    parse_theses_from_text, ExportFormat, ReportExporter, UploadedDocument,
};

use super::AppContext;
use crate::cli::AnalyzeArgs;

pub async fn handle(args: &AnalyzeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let theses = load_theses(args, ctx)?;
    if theses.is_empty() {
        anyhow::bail!("no theses to analyse");
    }

    let analysis = &ctx.config.analysis;
    let template = args.template.unwrap_or(analysis.template);
    let custom = args.prompt.as_deref().or(analysis.custom_prompt.as_deref());
    let cmd = RunAnalysisCommand {
        system_prompt: resolve_analysis_prompt(template, custom),
        ..RunAnalysisCommand::from_config(theses, analysis)
    };

    let progress = |done: usize, total: usize, batch: &AnalysisBatch| {
        if let Some(record) = batch.records().last() {
            eprintln!("[{done}/{total}] {} | {}", record.status.label(), record.verdict);
        }
    };

    let mut session = ctx.session();
    let handler = RunAnalysisHandler::new(ctx.client.clone(), ctx.base_url());
    let batch = handler.handle(&mut session, cmd, &progress).await?;

    let summary = batch.summary();
    eprintln!(
        "Всего: {} | Продвигать: {} | Доработать: {} | Отклонить: {} | Ошибки: {}",
        summary.total, summary.promote, summary.revise, summary.reject, summary.errors
    );

    let report = render_report(&batch, &args.verdicts, args.format)?;
    match &args.out {
        Some(path) => std::fs::write(path, report)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{report}"),
    }
    Ok(())
}

/// Exports the records whose verdict is in `verdicts`, or all of them when
/// the list is empty.
fn render_report(
    batch: &AnalysisBatch,
    verdicts: &[String],
    format: ExportFormat,
) -> anyhow::Result<String> {
    let selected = batch.filter_by_verdicts(verdicts);
    Ok(TextReportExporter::new().export_batch(&selected, format)?)
}

fn load_theses(args: &AnalyzeArgs, ctx: &AppContext) -> anyhow::Result<Vec<String>> {
    if let Some(path) = &args.file {
        let document = UploadedDocument::from_path(path)?;
        let loader = LoadDocumentHandler::new(
            Arc::new(FileDocumentReader::new()),
            ctx.config.consultant.max_context_chars,
        );
        return Ok(loader.load_theses(&document));
    }
    match &args.text {
        Some(text) => Ok(parse_theses_from_text(text)),
        None => anyhow::bail!("pass --file or --text"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strategic_analyst::domain::analysis::AnalysisRecord;

    fn batch() -> AnalysisBatch {
        let mut batch = AnalysisBatch::default();
        for (thesis, verdict) in [("Филиал", "Продвигать"), ("Скидки", "Отклонить"), ("Склад", "Доработать")] {
            batch.push(AnalysisRecord {
                verdict: verdict.to_string(),
                ..AnalysisRecord::new(thesis)
            });
        }
        batch
    }

    #[test]
    fn report_keeps_only_requested_verdicts() {
        let verdicts = vec!["Отклонить".to_string(), "Доработать".to_string()];
        let report = render_report(&batch(), &verdicts, ExportFormat::Csv).unwrap();

        assert!(!report.contains("Филиал"));
        assert!(report.contains("Скидки"));
        assert!(report.contains("Склад"));
    }

    #[test]
    fn report_without_verdicts_keeps_everything() {
        let report = render_report(&batch(), &[], ExportFormat::Markdown).unwrap();
        for thesis in ["Филиал", "Скидки", "Склад"] {
            assert!(report.contains(thesis));
        }
    }
}
