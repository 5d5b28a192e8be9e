//! Custom assertions over inspection reports.

use redaction_inspector::RedactionReport;

/// Asserts that `page` reports exactly the given hidden texts, in order.
///
/// # Panics
/// Panics with the full report when the page differs.
pub fn assert_page_texts(report: &RedactionReport, page: usize, expected: &[&str]) {
    let actual: Vec<&str> = report
        .page(page)
        .unwrap_or_default()
        .iter()
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(
        actual, expected,
        "Unexpected findings on page {}. Full report:\n{}",
        page, report
    );
}

/// Asserts that some finding on any page contains `needle`.
pub fn assert_leaks(report: &RedactionReport, needle: &str) {
    assert!(
        report.redactions().any(|r| r.text.contains(needle)),
        "Expected a finding containing '{}'. Full report:\n{}",
        needle,
        report
    );
}

/// Asserts that the report has no findings.
pub fn assert_clean(report: &RedactionReport) {
    assert!(
        report.is_empty(),
        "Expected no findings, got {}:\n{}",
        report.len(),
        report
    );
}
