//! Field extraction for full-body harness inspection certificates.
//!
//! The only layout with labeled dates: "Date:" is the inspection
//! (calibration) date and "Next Inspection Date:" the expiry.

use tracing::debug;

use super::dates::normalize_date;
use super::patterns::{
    CERT_NUMBER, HARNESS_CAL_DATE, HARNESS_EXP_DATE, HARNESS_SERIAL, REPORT_NUMBER,
};
use super::TemplateExtractor;
use crate::models::record::{CertificateRecord, TemplateKind};

pub struct HarnessExtractor;

impl TemplateExtractor for HarnessExtractor {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Harness
    }

    fn extract(&self, text: &str, lines: &[String]) -> Vec<CertificateRecord> {
        let mut record = CertificateRecord::new(TemplateKind::Harness);

        record.cert = CERT_NUMBER.captures(text).map(|c| c[1].to_string());
        record.lot = REPORT_NUMBER.find(text).map(|m| m.as_str().to_string());
        record.serial = HARNESS_SERIAL.find(text).map(|m| m.as_str().to_string());
        record.model = lines
            .iter()
            .find(|l| l.contains("FULL BODY") && l.contains("HARNESS"))
            .cloned();

        record.calibration_date = HARNESS_CAL_DATE
            .captures(text)
            .and_then(|c| normalize_date(&c[1]));
        record.expiry_date = HARNESS_EXP_DATE
            .captures(text)
            .and_then(|c| normalize_date(&c[1]));

        debug!(serial = record.serial_display(), "extracted harness record");
        vec![record]
    }
}
