use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// Body of `POST /recommendations`. Every field is optional; missing `mood` or
/// `country` sends the request down the local suggestion path.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Total trip budget for the whole party. Accepts `100000` or `"100000"`.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub budget: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub travelers: Option<i64>,
    /// Place names the caller has already seen and wants excluded.
    #[serde(default, alias = "existing")]
    pub existing_destinations: Option<Vec<String>>,
}

impl RecommendationRequest {
    /// `Some` only for values that carry text once trimmed.
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn mood(&self) -> Option<&str> {
        Self::present(&self.mood)
    }

    pub fn country(&self) -> Option<&str> {
        Self::present(&self.country)
    }

    pub fn state(&self) -> Option<&str> {
        Self::present(&self.state)
    }

    /// The budget, unless it was given as `NaN` or an infinity.
    pub fn budget(&self) -> Option<f64> {
        self.budget.filter(|b| b.is_finite())
    }

    pub fn existing(&self) -> &[String] {
        self.existing_destinations.as_deref().unwrap_or(&[])
    }

    /// Mood and country are both needed before the upstream model is worth asking.
    pub fn has_required_fields(&self) -> bool {
        self.mood().is_some() && self.country().is_some()
    }
}

/// Per-person spend split over a fixed two-night, two-day trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub hotel_per_night: u64,
    pub food_per_day: u64,
    pub transport: u64,
    pub shopping: u64,
    pub activities: u64,
    pub total_per_person: u64,
}

/// A priced suggestion as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSuggestion {
    pub destination: Option<String>,
    pub summary: Option<String>,
    pub tags: Vec<String>,
    pub approx_base_cost: f64,
    pub breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub suggestions: Vec<NormalizedSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
