//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// Loaded PDF exposing per-page text to the extraction engine.
pub struct PdfExtractor {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption. pdf_extract works
        // on raw bytes, so the decrypted document is re-saved for it.
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {e}")))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("loaded PDF with {} pages", page_count);
        Ok(Self {
            document: doc,
            raw_data,
        })
    }

    /// Load a PDF from a file on disk.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(&data)?)
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// The underlying document, for the page splitter.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Extract text from one page (1-indexed).
    pub fn page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }
        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Extract text from every page, in page order. A page whose text
    /// extraction fails contributes an empty string so page indices stay
    /// aligned with the source document.
    pub fn page_texts(&self) -> Vec<String> {
        (1..=self.page_count())
            .map(|page| {
                self.page_text(page).unwrap_or_else(|e| {
                    debug!("page {} text extraction failed: {}", page, e);
                    String::new()
                })
            })
            .collect()
    }

    /// Extract text from the entire document in one pass, via pdf_extract
    /// on the raw (decrypted) bytes. Fallback for documents whose per-page
    /// extraction comes back empty.
    pub fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
