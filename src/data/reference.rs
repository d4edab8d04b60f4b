//! Extraction of expected ratings from the published force-rating
//! documentation, and the comparison harness over a units fixture.
//!
//! The doc lists each unit as a backtick span like `` `Warrior 27` ``.
//! Expected values are pinned to a specific upstream revision; computed
//! values are compared against that revision, never against a moving HEAD.

use rayon::prelude::*;
use serde::Serialize;

use crate::data::unit::UnitRecord;

/// Upstream revision the expected table is pinned to.
pub const REFERENCE_COMMIT: &str = "b57046317937f566c5b4d9c2d2c317183bc60c9f";

/// Repository path of the reference document at [REFERENCE_COMMIT].
pub const REFERENCE_DOC_PATH: &str = "docs/Other/Force-rating-calculation.md";

/// One unit of the comparison report.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub expected: f64,
    /// None when the unit is missing from the fixture or failed validation.
    pub computed: Option<f64>,
}

impl ComparisonRow {
    pub fn delta(&self) -> Option<f64> {
        self.computed.map(|computed| computed - self.expected)
    }
}

/// Pull `(name, expected force)` pairs out of the reference markdown.
/// Spans that are not a name followed by a whole number are ignored.
pub fn parse_expected_forces(markdown: &str) -> Vec<(String, f64)> {
    let mut expected = Vec::new();
    let mut in_span = false;
    for chunk in markdown.split('`') {
        if in_span {
            if let Some(entry) = parse_span(chunk) {
                expected.push(entry);
            }
        }
        in_span = !in_span;
    }
    expected
}

fn parse_span(span: &str) -> Option<(String, f64)> {
    let span = span.trim();
    let (name, value) = span.rsplit_once(char::is_whitespace)?;
    let name = name.trim();
    if name.is_empty() || value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((name.to_string(), value.parse().ok()?))
}

/// Rate every documented unit found in `units` and pair it with its
/// expected value. Evaluations are independent and run in parallel; a unit
/// that fails validation reports `computed: None` instead of aborting the
/// run.
pub fn compare_against_reference(units: &[UnitRecord], markdown: &str) -> Vec<ComparisonRow> {
    let expected = parse_expected_forces(markdown);
    expected
        .into_par_iter()
        .map(|(name, expected)| {
            let computed = units
                .iter()
                .find(|unit| unit.name == name)
                .and_then(|unit| unit.rate().ok())
                .map(|result| result.force);
            ComparisonRow {
                name,
                expected,
                computed,
            }
        })
        .collect()
}
