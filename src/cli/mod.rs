use std::path::PathBuf;

use clap::{Parser, Subcommand};
use strategic_analyst::domain::prompts::AnalysisTemplate;
use strategic_analyst::ports::ExportFormat;

/// Top-level CLI parser for the `strategic-analyst` binary.
#[derive(Debug, Parser)]
#[command(
    name = "strategic-analyst",
    version,
    about = "SWOT-style thesis analysis and strategic consulting chat"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API key; overrides STRATEGIC_ANALYST__AI__API_KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the API key works
    Check,

    /// Evaluate a list of theses
    Analyze(AnalyzeArgs),

    /// Interactive consulting chat
    Chat(ChatArgs),
}

#[derive(Debug, clap::Args)]
pub struct AnalyzeArgs {
    /// File with theses (txt, csv, xlsx, xls, docx)
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Theses, one per line
    #[arg(short, long)]
    pub text: Option<String>,

    /// Prompt template: standard, investment, quick
    #[arg(long)]
    pub template: Option<AnalysisTemplate>,

    /// Custom system prompt; overrides the template
    #[arg(long)]
    pub prompt: Option<String>,

    /// Report format: md or csv
    #[arg(long, default_value = "md")]
    pub format: ExportFormat,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Keep only records with this exact verdict (repeatable)
    #[arg(long = "verdict")]
    pub verdicts: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct ChatArgs {
    /// Start in short-answer mode
    #[arg(long)]
    pub short: bool,
}
