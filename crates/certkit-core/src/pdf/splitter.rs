//! Per-serial page splitting for gas detector certificates.
//!
//! A recognized gas detector page is materialized as an independent
//! one-page document named after the recovered serial; that sub-document,
//! not the original multi-page file, is the artifact handed to the upload
//! side. A sentinel serial falls back to the original file so a failed
//! extraction still has a retrievable source attached.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;
use crate::models::record::{CertificateRecord, SourceRef};

/// Write page `page_index` (0-indexed) of `doc` as `<serial>.pdf` under
/// `out_dir` and return the new file's path.
pub fn split_page(
    doc: &Document,
    page_index: usize,
    serial: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let page_count = doc.get_pages().len();
    let page_number = page_index as u32 + 1;
    if page_index >= page_count {
        return Err(PdfError::InvalidPage(page_number));
    }

    let mut single = doc.clone();
    let delete: Vec<u32> = (1..=page_count as u32)
        .filter(|&p| p != page_number)
        .collect();
    single.delete_pages(&delete);
    single.prune_objects();

    fs::create_dir_all(out_dir).map_err(|e| PdfError::Split(e.to_string()))?;
    let path = out_dir.join(format!("{serial}.pdf"));
    single
        .save(&path)
        .map_err(|e| PdfError::Split(e.to_string()))?;

    debug!("split page {} into {}", page_number, path.display());
    Ok(path)
}

/// Resolve the artifact backing a record: a per-serial split page when the
/// record owns one, otherwise the original document.
pub fn artifact_for(
    doc: &Document,
    record: &CertificateRecord,
    original: &Path,
    out_dir: &Path,
) -> Result<PathBuf> {
    match (record.source, record.serial.as_deref()) {
        (SourceRef::Page(index), Some(serial)) => split_page(doc, index, serial, out_dir),
        _ => Ok(original.to_path_buf()),
    }
}
