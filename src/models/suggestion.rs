use serde_json::{Map, Value};

/// Fields a suggestion may carry its per-person price in, in the order they are trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostField {
    ApproxBaseCost,
    EstimatedPerPerson,
    TotalPerPerson,
    PerPerson,
    CostPerPerson,
    PricePerPerson,
}

impl CostField {
    pub const PRIORITY: [CostField; 6] = [
        CostField::ApproxBaseCost,
        CostField::EstimatedPerPerson,
        CostField::TotalPerPerson,
        CostField::PerPerson,
        CostField::CostPerPerson,
        CostField::PricePerPerson,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostField::ApproxBaseCost => "approxBaseCost",
            CostField::EstimatedPerPerson => "estimatedPerPerson",
            CostField::TotalPerPerson => "totalPerPerson",
            CostField::PerPerson => "perPerson",
            CostField::CostPerPerson => "costPerPerson",
            CostField::PricePerPerson => "pricePerPerson",
        }
    }
}

/// A cost as it arrived: either already numeric or some text that may contain a number.
#[derive(Debug, Clone, PartialEq)]
pub enum CostValue {
    Number(f64),
    Text(String),
}

impl CostValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => n.as_f64().map(CostValue::Number),
            // booleans count as 1 and 0
            Value::Bool(b) => Some(CostValue::Number(if *b { 1.0 } else { 0.0 })),
            Value::String(s) => Some(CostValue::Text(s.clone())),
            other => Some(CostValue::Text(other.to_string())),
        }
    }
}

/// A suggestion before pricing, produced by the mock generator or parsed from model output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSuggestion {
    pub destination: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<Vec<String>>,
    /// Present cost fields, already ordered by `CostField::PRIORITY`.
    pub cost_candidates: Vec<(CostField, CostValue)>,
}

impl RawSuggestion {
    /// Build from a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let cost_candidates = CostField::PRIORITY
            .iter()
            .filter_map(|field| {
                object
                    .get(field.as_str())
                    .and_then(CostValue::from_json)
                    .map(|cost| (*field, cost))
            })
            .collect();

        Some(Self {
            destination: text_field(object, "destination"),
            summary: text_field(object, "summary"),
            tags: tags_field(object),
            cost_candidates,
        })
    }

    /// Convenience constructor for a suggestion priced by `approxBaseCost`.
    pub fn with_base_cost(
        destination: impl Into<String>,
        summary: impl Into<String>,
        tags: Vec<String>,
        approx_base_cost: f64,
    ) -> Self {
        Self {
            destination: Some(destination.into()),
            summary: Some(summary.into()),
            tags: Some(tags),
            cost_candidates: vec![(CostField::ApproxBaseCost, CostValue::Number(approx_base_cost))],
        }
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn tags_field(object: &Map<String, Value>) -> Option<Vec<String>> {
    match object.get("tags")? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}
