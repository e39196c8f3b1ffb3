//! Core library for calibration-certificate extraction.
//!
//! This crate provides:
//! - PDF text extraction and per-serial page splitting
//! - Template classification for the four known certificate layouts
//! - Layout-specific field extraction (certificate number, model, serial,
//!   calibration/expiry dates, lot number)
//! - Record completeness validation

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use error::{CertError, ExtractionError, Result};
pub use extract::{DocumentExtraction, TemplateExtractor, classify, extract_document, extractor_for, validate};
pub use models::config::CertkitConfig;
pub use models::record::{CertificateRecord, SourceRef, TemplateKind};
pub use pdf::{PdfExtractor, artifact_for, split_page};
