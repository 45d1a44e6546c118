//! Text extraction for uploaded resumes.
//!
//! PDF pages are joined in document order, each followed by one `\n`, and a page with no
//! text still contributes its separator. Plain text must be valid UTF-8. No normalization
//! is applied to either.

use bytes::Bytes;

use crate::errors::AppError;

/// Declared type of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Pdf,
    PlainText,
}

impl ContentType {
    /// Resolves the document type from the upload's MIME type, file name, and leading bytes.
    ///
    /// A recognised MIME type wins. Generic types such as `application/octet-stream` fall
    /// through to the `.pdf` / `.txt` extension, then to the `%PDF-` magic bytes.
    pub fn detect(
        mime: Option<&str>,
        file_name: Option<&str>,
        head: &[u8],
    ) -> Result<Self, AppError> {
        let essence = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match essence.as_str() {
            "application/pdf" => return Ok(ContentType::Pdf),
            "text/plain" => return Ok(ContentType::PlainText),
            _ => {}
        }

        let extension = file_name
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(ContentType::Pdf),
            Some("txt") => Ok(ContentType::PlainText),
            _ if head.starts_with(b"%PDF-") => Ok(ContentType::Pdf),
            _ => Err(AppError::UnsupportedDocument(format!(
                "Only PDF and TXT resumes are supported (got {}).",
                mime.filter(|m| !m.is_empty())
                    .or(file_name)
                    .unwrap_or("an unknown file type")
            ))),
        }
    }
}

/// One uploaded file, owned by a single analysis request.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub content_type: ContentType,
    pub raw_bytes: Bytes,
}

impl UploadedDocument {
    pub fn new(content_type: ContentType, raw_bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            raw_bytes: raw_bytes.into(),
        }
    }
}

/// Text pulled out of an `UploadedDocument`, verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub body: String,
    /// Number of pages read; `None` for plain text.
    pub page_count: Option<usize>,
}

impl ExtractedText {
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Splits a paged document into per-page text, in document order.
pub trait PageSource: Send + Sync {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<String>, AppError>;
}

/// `PageSource` backed by the `pdf-extract` crate.
pub struct PdfExtractPages;

impl PageSource for PdfExtractPages {
    fn pages(&self, bytes: &[u8]) -> Result<Vec<String>, AppError> {
        pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
            AppError::UnreadableDocument(format!(
                "The PDF could not be read ({e}). Make sure it is a valid, unencrypted PDF or upload a TXT file instead."
            ))
        })
    }
}

/// Extracts the text of `document`. CPU-bound for PDFs; run it off the async executor.
pub fn extract_text(
    document: &UploadedDocument,
    pages: &dyn PageSource,
) -> Result<ExtractedText, AppError> {
    match document.content_type {
        ContentType::PlainText => Ok(ExtractedText {
            body: decode_plain_text(&document.raw_bytes)?,
            page_count: None,
        }),
        ContentType::Pdf => {
            let pages = pages.pages(&document.raw_bytes)?;
            let page_count = pages.len();
            Ok(ExtractedText {
                body: join_pages(pages),
                page_count: Some(page_count),
            })
        }
    }
}

fn join_pages(pages: Vec<String>) -> String {
    let capacity = pages.iter().map(|p| p.len() + 1).sum();
    pages
        .into_iter()
        .fold(String::with_capacity(capacity), |mut acc, page| {
            acc.push_str(&page);
            acc.push('\n');
            acc
        })
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, AppError> {
    std::str::from_utf8(bytes).map(str::to_string).map_err(|e| {
        AppError::UnreadableDocument(format!(
            "The text file is not valid UTF-8 (invalid byte sequence at offset {}). Re-save it as UTF-8 and try again.",
            e.valid_up_to()
        ))
    })
}
