//! Template classification for certificate pages.
//!
//! Rules are evaluated in a fixed priority order and the first match wins.
//! The order is load-bearing: some layouts share vocabulary (an absorber
//! certificate may also mention calibration), so Absorber and Harness
//! markers are checked before the looser EEBD and GasDetector rules.

use crate::models::record::TemplateKind;

/// EEBD vendor/keyword tokens, matched case-insensitively per line.
const EEBD_KEYWORDS: &[&str] = &["eebd refil", "spiroscape", "interspiro", "eebd"];

/// Gas detector model-name substrings used as a model-line fallback.
pub(crate) const GAS_MODEL_KEYWORDS: &[&str] =
    &["ISC", "Radius", "BZ1", "T40", "PDM+", "SAFEGAS", "MSA"];

struct ClassifierRule {
    kind: TemplateKind,
    matches: fn(&str, &[String]) -> bool,
}

/// Ordered rule table; first match wins.
const RULES: &[ClassifierRule] = &[
    ClassifierRule {
        kind: TemplateKind::Absorber,
        matches: |text, _| text.contains("ABSORBER"),
    },
    ClassifierRule {
        kind: TemplateKind::Harness,
        matches: |text, _| {
            text.contains("FULL BODY HARNESS") || text.contains("PROFESSIONAL HARNESSES")
        },
    },
    ClassifierRule {
        kind: TemplateKind::Eebd,
        matches: |_, lines| {
            lines.iter().any(|l| {
                let lower = l.to_lowercase();
                EEBD_KEYWORDS.iter().any(|k| lower.contains(k))
            })
        },
    },
    ClassifierRule {
        kind: TemplateKind::GasDetector,
        matches: |text, _| {
            let lower = text.to_lowercase();
            lower.contains("certificate") && lower.contains("calibration")
        },
    },
];

/// Decide which known layout produced this page, or `Unknown`.
///
/// Pure and total: any input yields a value, repeated calls agree.
pub fn classify(text: &str, lines: &[String]) -> TemplateKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(text, lines))
        .map(|rule| rule.kind)
        .unwrap_or(TemplateKind::Unknown)
}
