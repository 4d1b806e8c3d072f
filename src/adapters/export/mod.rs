//! Export adapters - text serialization of results.
//!
//! - `TextReportExporter` - CSV / Markdown batches, text / Markdown dialogues

mod text_exporter;

pub use text_exporter::{TextReportExporter, BATCH_HEADERS};
