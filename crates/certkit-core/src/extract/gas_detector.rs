//! Field extraction for gas detector calibration certificates.
//!
//! The layout carries no reliable field labels, so every field is recovered
//! with positional heuristics: the serial is the line after the
//! "Serial Number" label, the model is the line above the serial, and the
//! two long-form dates are disambiguated by their proximity to the "Model"
//! heading, with a chronological swap when calibration postdates expiry.

use tracing::debug;

use super::dates::normalize_date;
use super::patterns::{CERT_NUMBER, GAS_SERIAL_SHAPE, LONG_DATE, NUMERIC_LOT, REPORT_NUMBER_ANY};
use super::TemplateExtractor;
use crate::extract::classify::GAS_MODEL_KEYWORDS;
use crate::models::record::{CertificateRecord, TemplateKind};

pub struct GasDetectorExtractor;

impl TemplateExtractor for GasDetectorExtractor {
    fn kind(&self) -> TemplateKind {
        TemplateKind::GasDetector
    }

    fn extract(&self, _text: &str, lines: &[String]) -> Vec<CertificateRecord> {
        let mut record = CertificateRecord::new(TemplateKind::GasDetector);

        record.cert = lines
            .iter()
            .find_map(|l| CERT_NUMBER.captures(l).map(|c| c[1].to_string()));

        record.lot = extract_lot(lines);
        record.serial = extract_serial(lines);
        record.model = extract_model(lines, record.serial.as_deref());

        let (cal, exp) = extract_dates(lines);
        record.calibration_date = cal;
        record.expiry_date = exp;

        debug!(
            serial = record.serial_display(),
            cert = record.cert.as_deref().unwrap_or("-"),
            "extracted gas detector record"
        );
        vec![record]
    }
}

/// "Cylinder Lot#" label followed by a numeric line, else a report-number
/// token found anywhere.
fn extract_lot(lines: &[String]) -> Option<String> {
    for (i, line) in lines.iter().enumerate() {
        if line.to_lowercase().contains("cylinder lot#") {
            if let Some(candidate) = lines.get(i + 1) {
                if NUMERIC_LOT.is_match(candidate) {
                    return Some(candidate.clone());
                }
            }
        }
    }
    lines
        .iter()
        .find_map(|l| REPORT_NUMBER_ANY.find(l).map(|m| m.as_str().to_string()))
}

/// The line immediately after the first "serial number" label, accepted
/// only when the trimmed line fits the alphanumeric serial shape; a line
/// with embedded spaces is rejected outright.
fn extract_serial(lines: &[String]) -> Option<String> {
    let label_idx = lines
        .iter()
        .position(|l| l.to_lowercase().contains("serial number"))?;
    let candidate = lines.get(label_idx + 1)?.trim();
    if GAS_SERIAL_SHAPE.is_match(candidate) {
        Some(candidate.to_string())
    } else {
        None
    }
}

/// The line above the serial value, unless that line is itself the serial
/// label; then fall back to the known model-name keyword list.
fn extract_model(lines: &[String], serial: Option<&str>) -> Option<String> {
    if let Some(serial) = serial {
        if let Some(i) = lines.iter().position(|l| l == serial) {
            if i > 0 {
                let candidate = &lines[i - 1];
                if !candidate.to_lowercase().contains("serial number") {
                    return Some(candidate.clone());
                }
            }
        }
    }
    lines
        .iter()
        .find(|l| {
            let lower = l.to_lowercase();
            GAS_MODEL_KEYWORDS.iter().any(|k| lower.contains(&k.to_lowercase()))
        })
        .cloned()
}

/// Collect every long-form date on the page. With two or more, the date
/// nearest the "Model" heading (searching from the heading down) is
/// calibration and the first other date is expiry; when every date
/// precedes the heading, calibration stays unset and the first date
/// becomes expiry. Without the heading, positional order applies.
/// Swapped when calibration chronologically postdates expiry.
fn extract_dates(
    lines: &[String],
) -> (Option<chrono::NaiveDate>, Option<chrono::NaiveDate>) {
    let mut all_dates: Vec<String> = Vec::new();
    for line in lines {
        for m in LONG_DATE.find_iter(line) {
            all_dates.push(m.as_str().to_string());
        }
    }

    let (cal_raw, exp_raw) = if all_dates.len() >= 2 {
        match lines.iter().position(|l| l.contains("Model")) {
            Some(model_idx) => {
                let cal = lines[model_idx..]
                    .iter()
                    .find_map(|l| LONG_DATE.find(l).map(|m| m.as_str().to_string()));
                let exp = cal.as_ref().and_then(|cal| {
                    all_dates.iter().find(|d| *d != cal).cloned()
                });
                match cal {
                    Some(cal) => (Some(cal), exp),
                    // No date at or after the heading: only the expiry slot
                    // is filled, from the first date collected.
                    None => (None, Some(all_dates[0].clone())),
                }
            }
            None => (Some(all_dates[0].clone()), Some(all_dates[1].clone())),
        }
    } else if let Some(first) = all_dates.first() {
        (Some(first.clone()), None)
    } else {
        (None, None)
    };

    let mut cal = cal_raw.as_deref().and_then(normalize_date);
    let mut exp = exp_raw.as_deref().and_then(normalize_date);

    if let (Some(c), Some(e)) = (cal, exp) {
        if c > e {
            cal = Some(e);
            exp = Some(c);
        }
    }
    (cal, exp)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extract::lines::normalize_lines;

    fn extract(text: &str) -> CertificateRecord {
        let lines = normalize_lines(text);
        GasDetectorExtractor
            .extract(text, &lines)
            .into_iter()
            .next()
            .unwrap()
    }

    const SAMPLE: &str = "\
Certificate of Calibration
Certificate No: 12/00345/2025.SRV
Model
Radius BZ1
Serial Number
ABC-123456
Calibration Date
March 5, 2025
Expiry Date
March 5, 2026
Cylinder Lot#
1234567
";

    #[test]
    fn test_full_extraction() {
        let record = extract(SAMPLE);
        assert_eq!(record.cert.as_deref(), Some("12/00345/2025.SRV"));
        assert_eq!(record.serial.as_deref(), Some("ABC-123456"));
        assert_eq!(record.model.as_deref(), Some("Radius BZ1"));
        assert_eq!(record.lot.as_deref(), Some("1234567"));
        assert_eq!(record.calibration_date, NaiveDate::from_ymd_opt(2025, 3, 5));
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert!(record.is_complete());
    }

    #[test]
    fn test_serial_shape_rejected() {
        let text = "Certificate of calibration\nSerial Number\nbad token!\n";
        let record = extract(text);
        assert_eq!(record.serial, None);
        assert!(!record.is_complete());
    }

    #[test]
    fn test_serial_line_after_label() {
        let text = "some heading\nSerial Number\nT40-9876\n";
        let record = extract(text);
        assert_eq!(record.serial.as_deref(), Some("T40-9876"));
    }

    #[test]
    fn test_model_falls_back_to_keywords() {
        // Line above the serial is the label itself, so the keyword list wins.
        let text = "ISC Radius detector unit\nSerial Number\nXYZ-123456\n";
        let record = extract(text);
        assert_eq!(record.model.as_deref(), Some("ISC Radius detector unit"));
    }

    #[test]
    fn test_serial_with_embedded_space_rejected() {
        let text = "Serial Number\nABC 123456\n";
        let record = extract(text);
        assert_eq!(record.serial, None);
    }

    #[test]
    fn test_dates_swapped_when_reversed() {
        let text = "\
Calibration records
June 1, 2026
June 1, 2025
";
        let record = extract(text);
        assert_eq!(record.calibration_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2026, 6, 1));
    }

    #[test]
    fn test_date_nearest_model_heading_is_calibration() {
        let text = "\
January 1, 2027
Model heading section
February 2, 2025
";
        let record = extract(text);
        // Nearest to "Model" is Feb 2025; the other date becomes expiry.
        assert_eq!(record.calibration_date, NaiveDate::from_ymd_opt(2025, 2, 2));
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2027, 1, 1));
    }

    #[test]
    fn test_dates_all_before_model_heading_leave_calibration_invalid() {
        let text = "\
January 1, 2025
February 2, 2026
Model
";
        let record = extract(text);
        assert_eq!(record.calibration_date, None);
        assert_eq!(record.expiry_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(!record.is_complete());
    }

    #[test]
    fn test_single_date_leaves_expiry_invalid() {
        let text = "April 10, 2025\n";
        let record = extract(text);
        assert_eq!(record.calibration_date, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(record.expiry_date, None);
    }

    #[test]
    fn test_lot_report_number_fallback() {
        let text = "report ref CHSB-GD-25-03-01\n";
        let record = extract(text);
        assert_eq!(record.lot.as_deref(), Some("CHSB-GD-25-03-01"));
    }

    #[test]
    fn test_numeric_lot_preferred_over_report_number() {
        let text = "Cylinder Lot#\n7654321\nCHSB-GD-25-03\n";
        let record = extract(text);
        assert_eq!(record.lot.as_deref(), Some("7654321"));
    }
}
