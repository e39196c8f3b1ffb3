//! Date normalization for heterogeneous certificate date formats.

use chrono::NaiveDate;

/// Accepted input formats, tried in order. The canonical `%Y-%m-%d` form is
/// included last so re-normalizing an already-normalized value passes
/// through instead of degrading to the Invalid sentinel.
pub const INPUT_FORMATS: &[&str] = &["%B %d, %Y", "%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d"];

/// Parse a date candidate against the known formats.
///
/// Returns `None` when no format matches; a parse failure is a normal
/// outcome, not an error.
pub fn normalize_date(candidate: &str) -> Option<NaiveDate> {
    let candidate = candidate.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
}

/// Render a date in the canonical `YYYY-MM-DD` form.
pub fn canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_long_month_form() {
        assert_eq!(normalize_date("January 5, 2025"), Some(ymd(2025, 1, 5)));
        assert_eq!(normalize_date("  December 31, 2024 "), Some(ymd(2024, 12, 31)));
    }

    #[test]
    fn test_slash_and_dash_forms() {
        assert_eq!(normalize_date("01/02/2024"), Some(ymd(2024, 2, 1)));
        assert_eq!(normalize_date("01-02-2024"), Some(ymd(2024, 2, 1)));
        assert_eq!(normalize_date("01/02/24"), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn test_canonical_round_trip() {
        for input in ["March 7, 2025", "07/03/2025", "07-03-2025", "07/03/25"] {
            let date = normalize_date(input).unwrap();
            let rendered = canonical(date);
            assert_eq!(
                NaiveDate::parse_from_str(&rendered, "%Y-%m-%d").unwrap(),
                date,
                "round trip failed for {input}"
            );
        }
    }

    #[test]
    fn test_canonical_input_passes_through() {
        let date = normalize_date("2024-02-01").unwrap();
        assert_eq!(canonical(date), "2024-02-01");
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("99/99/9999"), None);
    }
}
