//! Page text line normalization.

/// Split raw page text into trimmed, non-empty lines, preserving order.
///
/// Order matters downstream: several extraction heuristics key off
/// "the line after X" or "the line above Y".
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_trims_and_drops_blanks() {
        let text = "  Certificate of Calibration  \n\n\t\nSerial Number\n  ABC-123  \n";
        assert_eq!(
            normalize_lines(text),
            vec!["Certificate of Calibration", "Serial Number", "ABC-123"]
        );
    }

    #[test]
    fn test_order_preserved() {
        let lines = normalize_lines("first\nsecond\nthird");
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_lines("").is_empty());
        assert!(normalize_lines("   \n \t \n").is_empty());
    }
}
