//! File ingestion adapter - implementation of DocumentReader.
//!
//! | Format     | Theses                          | Context                     |
//! |------------|---------------------------------|-----------------------------|
//! | txt        | non-empty lines                 | full text                   |
//! | csv        | first column, no header row     | rows, cells tab-separated   |
//! | xlsx / xls | first column of the first sheet | first sheet, tab-separated  |
//! | docx       | non-empty paragraphs            | paragraphs                  |
//!
//! A leading UTF-8 BOM is dropped from text and CSV input.

use std::io::{Cursor, Read};

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use quick_xml::events::Event;

use crate::domain::foundation::truncate_chars;
use crate::ports::{
    parse_theses_from_text, DocumentKind, DocumentReader, IngestError, UploadedDocument,
    MAX_UPLOAD_BYTES,
};

const BOM: char = '\u{feff}';

/// Reads uploads held in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocumentReader;

impl FileDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for FileDocumentReader {
    fn read_theses(&self, document: &UploadedDocument) -> Result<Vec<String>, IngestError> {
        check_size(document)?;
        match document.kind()? {
            DocumentKind::Text => Ok(parse_theses_from_text(&decode_text(&document.bytes))),
            DocumentKind::Csv => Ok(non_empty(first_column(&csv_rows(&document.bytes)?))),
            DocumentKind::Spreadsheet => {
                Ok(non_empty(first_column(&spreadsheet_rows(&document.bytes)?)))
            }
            DocumentKind::Word => Ok(non_empty(docx_paragraphs(&document.bytes)?)),
        }
    }

    fn read_context(&self, document: &UploadedDocument, max_chars: usize) -> Result<String, IngestError> {
        check_size(document)?;
        let text = match document.kind()? {
            DocumentKind::Text => decode_text(&document.bytes),
            DocumentKind::Csv => render_rows(&csv_rows(&document.bytes)?),
            DocumentKind::Spreadsheet => render_rows(&spreadsheet_rows(&document.bytes)?),
            DocumentKind::Word => docx_paragraphs(&document.bytes)?.join("\n"),
        };
        Ok(truncate_chars(&text, max_chars))
    }
}

fn check_size(document: &UploadedDocument) -> Result<(), IngestError> {
    if document.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(IngestError::TooLarge {
            size: document.bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix(BOM).unwrap_or(text.as_ref()).to_string()
}

fn first_column(rows: &[Vec<String>]) -> Vec<String> {
    rows.iter().filter_map(|row| row.first().cloned()).collect()
}

fn non_empty(cells: Vec<String>) -> Vec<String> {
    cells
        .into_iter()
        .map(|cell| cell.trim().to_string())
        .filter(|cell| !cell.is_empty())
        .collect()
}

fn render_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, IngestError> {
    let text = decode_text(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|e| IngestError::malformed(format!("CSV: {}", e)))
        })
        .collect()
}

fn spreadsheet_rows(bytes: &[u8]) -> Result<Vec<Vec<String>>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| IngestError::malformed(format!("spreadsheet: {}", e)))?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| IngestError::malformed(format!("spreadsheet: {}", e)))?,
        None => return Ok(Vec::new()),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Paragraph texts of `word/document.xml`, in order, empty ones included.
fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, IngestError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| IngestError::malformed(format!("DOCX is not a ZIP archive: {}", e)))?;

    let mut doc_xml = String::new();
    {
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|_| IngestError::malformed("DOCX is missing word/document.xml"))?;
        entry
            .read_to_string(&mut doc_xml)
            .map_err(|e| IngestError::io(e.to_string()))?;
    }

    let mut reader = quick_xml::Reader::from_str(&doc_xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"p" {
                    paragraphs.push(String::new());
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| IngestError::malformed(format!("DOCX XML: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(IngestError::malformed(format!("DOCX XML: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
