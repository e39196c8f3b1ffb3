//! PDF processing module: per-page text extraction and per-serial page
//! splitting.

mod extractor;
mod splitter;

pub use extractor::PdfExtractor;
pub use splitter::{artifact_for, split_page};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
