//! Record completeness validation.

use crate::error::ExtractionError;
use crate::models::record::CertificateRecord;

/// A record passes iff none of its six required fields is a sentinel.
///
/// All-or-nothing: a record with five good fields and one sentinel is
/// rejected wholesale, naming the offending serial when one was found.
pub fn validate(record: &CertificateRecord) -> Result<(), ExtractionError> {
    let missing = record.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ExtractionError::Incomplete {
            serial: record.serial_display().to_string(),
            missing,
        })
    }
}
