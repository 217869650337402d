//! Document reading collaborator: turns uploaded file bytes into text.
//!
//! Readers form an explicit ordered strategy chain. Extension dispatch picks
//! the candidate strategies; each strategy returns a result, and the chain —
//! not exception propagation — decides whether to try the next one. No
//! retries, no implicit fallbacks between formats.

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file format '{0}'")]
    UnsupportedFormat(String),

    #[error("reading stage failed for '{filename}': {reason}")]
    ExtractionFailure { filename: String, reason: String },
}

/// One reading strategy. `accepts` gates by file extension; `read` attempts
/// extraction from raw bytes.
pub trait DocumentReader: Send + Sync {
    fn name(&self) -> &'static str;
    fn accepts(&self, extension: &str) -> bool;
    fn read(&self, filename: &str, bytes: &[u8]) -> Result<String, DocumentError>;
}

/// PDF text extraction via pdf-extract, directly from memory.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn accepts(&self, extension: &str) -> bool {
        extension == "pdf"
    }

    fn read(&self, filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::ExtractionFailure {
            filename: filename.to_string(),
            reason: e.to_string(),
        })
    }
}

/// DOCX extraction via docx-rs: paragraph runs plus table cell text.
///
/// Legacy binary `.doc` has no pure-Rust reader; it is refused with a
/// conversion hint rather than a generic unsupported-format error.
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn accepts(&self, extension: &str) -> bool {
        extension == "docx" || extension == "doc"
    }

    fn read(&self, filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        if file_extension(filename) == "doc" {
            return Err(DocumentError::ExtractionFailure {
                filename: filename.to_string(),
                reason: "legacy .doc binaries are not supported; save the file as .docx"
                    .to_string(),
            });
        }

        let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::ExtractionFailure {
            filename: filename.to_string(),
            reason: e.to_string(),
        })?;

        let mut out = String::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    push_paragraph_text(paragraph, &mut out);
                }
                docx_rs::DocumentChild::Table(table) => {
                    for row in &table.rows {
                        let docx_rs::TableChild::TableRow(row) = row;
                        for cell in &row.cells {
                            let docx_rs::TableRowChild::TableCell(cell) = cell;
                            for content in &cell.children {
                                if let docx_rs::TableCellContent::Paragraph(paragraph) = content {
                                    push_paragraph_text(paragraph, &mut out);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(out)
    }
}

fn push_paragraph_text(paragraph: &docx_rs::Paragraph, out: &mut String) {
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for piece in &run.children {
                if let docx_rs::RunChild::Text(text) = piece {
                    out.push_str(&text.text);
                }
            }
        }
    }
    out.push('\n');
}

/// Plain-text reader. Lossy UTF-8 so a stray byte never fails the upload.
pub struct PlainTextReader;

impl DocumentReader for PlainTextReader {
    fn name(&self) -> &'static str {
        "txt"
    }

    fn accepts(&self, extension: &str) -> bool {
        extension == "txt"
    }

    fn read(&self, _filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// The ordered strategy chain shared via `AppState`.
pub struct ReaderChain {
    readers: Vec<Box<dyn DocumentReader>>,
}

impl Default for ReaderChain {
    fn default() -> Self {
        Self {
            readers: vec![
                Box::new(PdfReader),
                Box::new(DocxReader),
                Box::new(PlainTextReader),
            ],
        }
    }
}

impl ReaderChain {
    /// Reads a document: dispatch by extension, try accepting strategies in
    /// order, surface the last failure if all of them fail.
    pub fn read(&self, filename: &str, bytes: &[u8]) -> Result<String, DocumentError> {
        let extension = file_extension(filename);

        let candidates: Vec<&dyn DocumentReader> = self
            .readers
            .iter()
            .map(|r| r.as_ref())
            .filter(|r| r.accepts(&extension))
            .collect();

        if candidates.is_empty() {
            return Err(DocumentError::UnsupportedFormat(extension));
        }

        let mut last_error = None;
        for reader in candidates {
            match reader.read(filename, bytes) {
                Ok(text) => {
                    debug!("reader '{}' extracted {} bytes of text", reader.name(), text.len());
                    return Ok(normalize_whitespace(&text));
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.expect("at least one candidate reader ran"))
    }
}

fn file_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Collapses whitespace runs left behind by PDF extraction while keeping
/// word order intact.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_reader_roundtrips() {
        let chain = ReaderChain::default();
        let text = chain.read("cv.txt", b"hello   world\n\nagain").unwrap();
        assert_eq!(text, "hello world again");
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let chain = ReaderChain::default();
        let err = chain.read("cv.odt", b"PK...").unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedFormat(ext) if ext == "odt"));
    }

    #[test]
    fn test_docx_reader_roundtrips() {
        use docx_rs::{Docx, Paragraph, Run};

        let mut buf = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(
                Paragraph::new().add_run(Run::new().add_text("Senior Python developer")),
            )
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("5 years of experience")))
            .build()
            .pack(&mut buf)
            .unwrap();

        let chain = ReaderChain::default();
        let text = chain.read("cv.docx", buf.get_ref()).unwrap();
        assert_eq!(text, "Senior Python developer 5 years of experience");
    }

    #[test]
    fn test_corrupt_docx_is_extraction_failure() {
        let chain = ReaderChain::default();
        let err = chain
            .read("cv.docx", b"PK\x03\x04 not a real archive")
            .unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailure { .. }));
        assert!(err.to_string().contains("cv.docx"));
    }

    #[test]
    fn test_legacy_doc_is_rejected_with_conversion_hint() {
        let chain = ReaderChain::default();
        let err = chain.read("cv.doc", b"\xD0\xCF\x11\xE0 old word").unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailure { .. }));
        assert!(err.to_string().contains(".docx"));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        let chain = ReaderChain::default();
        assert!(matches!(
            chain.read("resume", b"text"),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_failure() {
        let chain = ReaderChain::default();
        let err = chain.read("cv.pdf", b"not a real pdf").unwrap_err();
        assert!(matches!(err, DocumentError::ExtractionFailure { .. }));
        // the error names the failing stage and file
        assert!(err.to_string().contains("cv.pdf"));
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let chain = ReaderChain::default();
        assert!(chain.read("CV.TXT", b"ok").is_ok());
    }

    #[test]
    fn test_lossy_utf8_never_fails() {
        let chain = ReaderChain::default();
        let text = chain.read("cv.txt", &[0x68, 0x69, 0xFF, 0x21]).unwrap();
        assert!(text.starts_with("hi"));
    }
}
