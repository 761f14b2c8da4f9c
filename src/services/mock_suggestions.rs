use crate::models::suggestion::RawSuggestion;

pub const DEFAULT_BUDGET: f64 = 50000.0;
pub const COST_STEP: f64 = 1500.0;

const BASE_NAMES: [&str; 6] = [
    "City Highlights",
    "Hidden Gems",
    "Nature Escape",
    "Food & Culture",
    "Adventure Mix",
    "Relax & Reset",
];

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Local, deterministic suggestions used whenever the model cannot be asked or fails.
///
/// Always six items in a fixed order, priced from the per-person share of the
/// budget and stepping up by 1500 per item.
pub fn generate(
    mood: Option<&str>,
    country: Option<&str>,
    state: Option<&str>,
    budget: Option<f64>,
    travelers: Option<i64>,
) -> Vec<RawSuggestion> {
    let mood = present(mood);
    let country = present(country);
    let state = present(state);

    let budget = budget.unwrap_or(DEFAULT_BUDGET);
    let travelers = travelers.filter(|t| *t > 0).unwrap_or(1);
    let per_person = (budget / travelers as f64).round_ties_even();

    let prefix = match state {
        Some(state) => format!("{} - {}", country.unwrap_or("Destination"), state),
        None => country.unwrap_or("Destination").to_string(),
    };

    BASE_NAMES
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            let lowered = label.to_lowercase();
            RawSuggestion::with_base_cost(
                format!("{} - {}", prefix, label),
                format!(
                    "Suggested {} in {}: {} with approx per-person cost.",
                    mood.unwrap_or("trip"),
                    prefix,
                    lowered
                ),
                vec![
                    mood.unwrap_or("Trip").to_string(),
                    country.unwrap_or("World").to_string(),
                    lowered.clone(),
                ],
                per_person + idx as f64 * COST_STEP,
            )
        })
        .collect()
}
