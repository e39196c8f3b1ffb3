//! Common regex patterns for certificate field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Certificate/report number, e.g. "12/34567/2025.SRV"
    pub static ref CERT_NUMBER: Regex = Regex::new(
        r"\b(\d{1,3}/\d{1,5}/\d{4}\.SRV)\b"
    ).unwrap();

    // Service report numbers, e.g. "CHSB-FP-25-04"
    pub static ref REPORT_NUMBER: Regex = Regex::new(
        r"CHSB-\w+-\d{2}(?:-\d{2})?"
    ).unwrap();

    pub static ref REPORT_NUMBER_ES: Regex = Regex::new(
        r"CHSB-ES-\d{2}-\d{2}"
    ).unwrap();

    // Gas detector reports carry a variable number of trailing segments
    pub static ref REPORT_NUMBER_ANY: Regex = Regex::new(
        r"CHSB-\w+(?:-\d{2})+"
    ).unwrap();

    // Long month-name date, e.g. "January 5, 2025"
    pub static ref LONG_DATE: Regex = Regex::new(
        r"(?i)(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},\s+\d{4}"
    ).unwrap();

    // A line consisting solely of a long month-name date
    pub static ref LONG_DATE_LINE: Regex = Regex::new(
        r"^[A-Z][a-z]+ \d{1,2}, \d{4}$"
    ).unwrap();

    // DD/MM/YYYY token
    pub static ref DMY_DATE: Regex = Regex::new(
        r"\b\d{2}/\d{2}/\d{4}\b"
    ).unwrap();

    // Labeled harness inspection dates
    pub static ref HARNESS_CAL_DATE: Regex = Regex::new(
        r"Date:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref HARNESS_EXP_DATE: Regex = Regex::new(
        r"Next Inspection Date:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Serial shapes per template
    pub static ref HARNESS_SERIAL: Regex = Regex::new(
        r"\d{7}:\d{4}"
    ).unwrap();

    pub static ref ABSORBER_SERIAL: Regex = Regex::new(
        r"\d{8}:\d{4}"
    ).unwrap();

    pub static ref EEBD_SERIAL: Regex = Regex::new(
        r"\b\d{5}\b"
    ).unwrap();

    // Gas detector serials are free-form alphanumeric tokens
    pub static ref GAS_SERIAL_SHAPE: Regex = Regex::new(
        r"^[A-Z0-9\-]{6,}$"
    ).unwrap();

    // Numeric cylinder lot on the line after a "Cylinder Lot#" label
    pub static ref NUMERIC_LOT: Regex = Regex::new(
        r"^\d{6,}$"
    ).unwrap();
}
