//! Field extraction for EEBD (emergency escape breathing device)
//! certificates.
//!
//! One page may certify several physical units: a line carrying a
//! pipe-separated list of 5-digit serials fans out into one record per
//! serial, all sharing the certificate number, model, dates, and lot.

use tracing::debug;

use super::dates::normalize_date;
use super::patterns::{CERT_NUMBER, EEBD_SERIAL, LONG_DATE_LINE, REPORT_NUMBER_ES};
use super::TemplateExtractor;
use crate::models::record::{CertificateRecord, TemplateKind};

pub struct EebdExtractor;

impl TemplateExtractor for EebdExtractor {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Eebd
    }

    fn extract(&self, text: &str, lines: &[String]) -> Vec<CertificateRecord> {
        let mut base = CertificateRecord::new(TemplateKind::Eebd);

        base.cert = CERT_NUMBER
            .captures(text)
            .map(|c| c[1].to_string());
        base.lot = REPORT_NUMBER_ES
            .find(text)
            .map(|m| m.as_str().to_string());
        base.model = lines
            .iter()
            .find(|l| l.contains("INTERSPIRO") || l.contains("Spiroscape"))
            .cloned();

        let date_lines: Vec<&String> =
            lines.iter().filter(|l| LONG_DATE_LINE.is_match(l)).collect();
        base.calibration_date = date_lines.first().and_then(|l| normalize_date(l));
        base.expiry_date = date_lines.get(1).and_then(|l| normalize_date(l));

        let serials = extract_serials(text, lines);
        debug!(count = serials.len(), "extracted EEBD serial(s)");

        if serials.is_empty() {
            return vec![base];
        }
        serials
            .into_iter()
            .map(|serial| {
                let mut record = base.clone();
                record.serial = Some(serial);
                record
            })
            .collect()
    }
}

/// Serials from the first pipe-separated list line, falling back to the
/// first 5-digit token anywhere in the raw text.
fn extract_serials(text: &str, lines: &[String]) -> Vec<String> {
    if let Some(list_line) = lines.iter().find(|l| l.contains('|')) {
        let tokens: Vec<String> = EEBD_SERIAL
            .find_iter(list_line)
            .map(|m| m.as_str().to_string())
            .collect();
        if !tokens.is_empty() {
            return tokens;
        }
    }
    EEBD_SERIAL
        .find(text)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default()
}
