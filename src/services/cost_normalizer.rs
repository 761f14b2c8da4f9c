use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::models::suggestion::{CostValue, RawSuggestion};

fn numeric_runs() -> &'static Regex {
    static NUMERIC_RUNS: OnceLock<Regex> = OnceLock::new();
    NUMERIC_RUNS.get_or_init(|| Regex::new(r"[0-9.]+").expect("numeric run pattern is valid"))
}

/// Resolve the per-person base cost of a suggestion.
///
/// Candidates are checked in priority order and the first positive value wins.
/// Text such as `"₹12,500 approx"` is read by joining its digit runs. Returns
/// 0 when nothing usable is found.
pub fn normalize_base(suggestion: &RawSuggestion) -> f64 {
    for (field, value) in &suggestion.cost_candidates {
        if let CostValue::Number(n) = value {
            if n.is_finite() && *n > 0.0 {
                return *n;
            }
        }

        if let Some(n) = scrape_number(&value_text(value)) {
            if n > 0.0 {
                debug!("Read base cost {} from text in {}", n, field.as_str());
                return n;
            }
        }
    }

    0.0
}

fn value_text(value: &CostValue) -> String {
    match value {
        CostValue::Number(n) => n.to_string(),
        CostValue::Text(s) => s.clone(),
    }
}

/// Concatenate every run of digits and dots and parse the result.
fn scrape_number(text: &str) -> Option<f64> {
    let joined: String = numeric_runs()
        .find_iter(text)
        .map(|m| m.as_str())
        .collect();

    if joined.is_empty() {
        return None;
    }
    joined.parse::<f64>().ok().filter(|n| n.is_finite())
}
