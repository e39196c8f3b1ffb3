//! Field extraction for shock absorber / absorbing lanyard certificates.
//!
//! Positional date convention is reversed relative to the other layouts:
//! the first DD/MM/YYYY token on the page is the expiry and the second is
//! the calibration date. Preserved as-is; unifying it with the other
//! templates is a behavior change requiring sign-off.

use tracing::debug;

use super::dates::normalize_date;
use super::patterns::{ABSORBER_SERIAL, CERT_NUMBER, DMY_DATE, REPORT_NUMBER};
use super::TemplateExtractor;
use crate::models::record::{CertificateRecord, TemplateKind};

pub struct AbsorberExtractor;

impl TemplateExtractor for AbsorberExtractor {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Absorber
    }

    fn extract(&self, text: &str, lines: &[String]) -> Vec<CertificateRecord> {
        let mut record = CertificateRecord::new(TemplateKind::Absorber);

        record.cert = CERT_NUMBER.captures(text).map(|c| c[1].to_string());
        record.lot = REPORT_NUMBER.find(text).map(|m| m.as_str().to_string());
        record.serial = ABSORBER_SERIAL.find(text).map(|m| m.as_str().to_string());
        record.model = lines
            .iter()
            .find(|l| l.contains("ABSORBING LANYARD") || l.contains("SHOCK ABSORBER"))
            .cloned();

        let dates: Vec<&str> = DMY_DATE.find_iter(text).map(|m| m.as_str()).collect();
        record.expiry_date = dates.first().and_then(|d| normalize_date(d));
        record.calibration_date = dates.get(1).and_then(|d| normalize_date(d));

        debug!(serial = record.serial_display(), "extracted absorber record");
        vec![record]
    }
}
