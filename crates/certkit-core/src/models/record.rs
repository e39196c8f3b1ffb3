//! Certificate record model shared by the extraction engine and downstream
//! consumers.
//!
//! Missing fields are typed as `None` inside the engine; the sentinel
//! strings `"Unknown"` and `"Invalid"` only appear at the serialization
//! boundary, which is the contract downstream row writers rely on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel rendered for a text field that was never matched.
pub const UNKNOWN: &str = "Unknown";

/// Sentinel rendered for a date field that failed normalization.
pub const INVALID: &str = "Invalid";

/// The certificate layout a page was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Gas detector calibration certificate.
    GasDetector,
    /// Emergency escape breathing device certificate.
    Eebd,
    /// Full-body harness inspection certificate.
    Harness,
    /// Shock absorber / absorbing lanyard certificate.
    Absorber,
    /// No known layout matched.
    Unknown,
}

impl TemplateKind {
    /// Destination tab/collection name used when routing records downstream.
    pub fn sheet_tab(&self) -> &'static str {
        match self {
            Self::GasDetector => "GD",
            Self::Eebd => "EEBD",
            Self::Harness => "HARNESS",
            Self::Absorber => "ABSORBER",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether this kind maps to one of the four known layouts.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Reference to the document region a record was extracted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRef {
    /// The whole originating document.
    #[default]
    Document,
    /// A single zero-indexed page, eligible for splitting into its own file.
    Page(usize),
}

/// One extracted certificate record.
///
/// Several records may share every field except `serial` when one page
/// lists multiple physical units under a single certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Certificate/report number, shaped like `12/34567/2025.SRV`.
    #[serde(with = "text_field")]
    pub cert: Option<String>,

    /// Free-text equipment model description.
    #[serde(with = "text_field")]
    pub model: Option<String>,

    /// Unit serial; shape depends on the template.
    #[serde(with = "text_field")]
    pub serial: Option<String>,

    /// Calibration/service date.
    #[serde(with = "date_field")]
    pub calibration_date: Option<NaiveDate>,

    /// Expiry/next-inspection date.
    #[serde(with = "date_field")]
    pub expiry_date: Option<NaiveDate>,

    /// Batch or service-report identifier.
    #[serde(with = "text_field")]
    pub lot: Option<String>,

    /// Layout the originating page was classified as. Fixed at creation.
    pub template: TemplateKind,

    /// Where in the document the record came from.
    #[serde(default, skip_serializing)]
    pub source: SourceRef,
}

impl CertificateRecord {
    /// Create a record with every field at its sentinel.
    pub fn new(template: TemplateKind) -> Self {
        Self {
            cert: None,
            model: None,
            serial: None,
            calibration_date: None,
            expiry_date: None,
            lot: None,
            template,
            source: SourceRef::Document,
        }
    }

    /// A record is complete iff none of the six required fields is a sentinel.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the required fields still at their sentinel value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.cert.is_none() {
            missing.push("cert");
        }
        if self.model.is_none() {
            missing.push("model");
        }
        if self.serial.is_none() {
            missing.push("serial");
        }
        if self.calibration_date.is_none() {
            missing.push("calibration_date");
        }
        if self.expiry_date.is_none() {
            missing.push("expiry_date");
        }
        if self.lot.is_none() {
            missing.push("lot");
        }
        missing
    }

    /// Serial for display/reporting, falling back to the sentinel.
    pub fn serial_display(&self) -> &str {
        self.serial.as_deref().unwrap_or(UNKNOWN)
    }

    /// Render the six required fields as a spreadsheet-style row:
    /// cert, model, serial, calibration, expiry, lot.
    pub fn to_row(&self) -> [String; 6] {
        [
            self.cert.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            self.model.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            self.serial.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            render_date(self.calibration_date),
            render_date(self.expiry_date),
            self.lot.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        ]
    }
}

/// Render a date field as canonical `YYYY-MM-DD`, or the Invalid sentinel.
pub fn render_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => INVALID.to_string(),
    }
}

mod text_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::UNKNOWN;

    pub fn serialize<S: Serializer>(value: &Option<String>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(value.as_deref().unwrap_or(UNKNOWN))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(de)?;
        if raw == UNKNOWN || raw.is_empty() {
            Ok(None)
        } else {
            Ok(Some(raw))
        }
    }
}

mod date_field {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::INVALID;

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, ser: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => ser.serialize_str(&date.format("%Y-%m-%d").to_string()),
            None => ser.serialize_str(INVALID),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(de)?;
        if raw == INVALID || raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_record_serializes_sentinels() {
        let record = CertificateRecord::new(TemplateKind::Harness);
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();

        assert_eq!(json["cert"], "Unknown");
        assert_eq!(json["model"], "Unknown");
        assert_eq!(json["serial"], "Unknown");
        assert_eq!(json["calibration_date"], "Invalid");
        assert_eq!(json["expiry_date"], "Invalid");
        assert_eq!(json["lot"], "Unknown");
        assert_eq!(json["template"], "harness");
    }

    #[test]
    fn test_complete_record_round_trips() {
        let mut record = CertificateRecord::new(TemplateKind::Eebd);
        record.cert = Some("12/34567/2025.SRV".to_string());
        record.model = Some("INTERSPIRO Spiroscape".to_string());
        record.serial = Some("12345".to_string());
        record.calibration_date = NaiveDate::from_ymd_opt(2025, 1, 5);
        record.expiry_date = NaiveDate::from_ymd_opt(2026, 1, 5);
        record.lot = Some("CHSB-ES-25-01".to_string());

        assert!(record.is_complete());

        let json = serde_json::to_string(&record).unwrap();
        let back: CertificateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.serial.as_deref(), Some("12345"));
        assert_eq!(back.calibration_date, NaiveDate::from_ymd_opt(2025, 1, 5));
    }

    #[test]
    fn test_missing_fields_names_each_sentinel() {
        let mut record = CertificateRecord::new(TemplateKind::GasDetector);
        record.serial = Some("ABC-12345".to_string());
        record.calibration_date = NaiveDate::from_ymd_opt(2025, 3, 1);

        assert_eq!(
            record.missing_fields(),
            vec!["cert", "model", "expiry_date", "lot"]
        );
        assert!(!record.is_complete());
    }

    #[test]
    fn test_row_column_order() {
        let mut record = CertificateRecord::new(TemplateKind::Absorber);
        record.cert = Some("02/00123/2024.SRV".to_string());
        record.serial = Some("12345678:0001".to_string());

        let row = record.to_row();
        assert_eq!(row[0], "02/00123/2024.SRV");
        assert_eq!(row[1], "Unknown");
        assert_eq!(row[2], "12345678:0001");
        assert_eq!(row[3], "Invalid");
        assert_eq!(row[4], "Invalid");
        assert_eq!(row[5], "Unknown");
    }

    #[test]
    fn test_sheet_tabs() {
        assert_eq!(TemplateKind::GasDetector.sheet_tab(), "GD");
        assert_eq!(TemplateKind::Eebd.sheet_tab(), "EEBD");
        assert_eq!(TemplateKind::Harness.sheet_tab(), "HARNESS");
        assert_eq!(TemplateKind::Absorber.sheet_tab(), "ABSORBER");
        assert!(!TemplateKind::Unknown.is_known());
    }
}
