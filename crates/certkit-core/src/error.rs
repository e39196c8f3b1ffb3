//! Error types for the certkit-core library.

use thiserror::Error;

/// Main error type for the certkit library.
#[derive(Error, Debug)]
pub enum CertError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Record extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to write a split page document.
    #[error("failed to write split page: {0}")]
    Split(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to certificate record extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A record still holds sentinel fields after extraction.
    #[error("incomplete record for serial {serial}: missing {}", .missing.join(", "))]
    Incomplete {
        /// Serial of the offending record, or the Unknown sentinel.
        serial: String,
        /// Names of the fields left at their sentinel value.
        missing: Vec<&'static str>,
    },

    /// No certificate data could be extracted from the document.
    #[error("no certificate data found")]
    NoData,
}

/// Result type for the certkit library.
pub type Result<T> = std::result::Result<T, CertError>;
