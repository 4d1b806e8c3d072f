//! Document adapters - file ingestion.
//!
//! - `FileDocumentReader` - Reads txt, csv, xlsx/xls and docx uploads

mod file_reader;

pub use file_reader::FileDocumentReader;
