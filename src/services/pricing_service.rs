use crate::models::recommendation::CostBreakdown;

/// Every breakdown assumes the same short trip.
pub const TRIP_NIGHTS: u64 = 2;
pub const TRIP_DAYS: u64 = 2;

const HOTEL_SHARE: f64 = 0.35;
const FOOD_SHARE: f64 = 0.2;
const TRANSPORT_SHARE: f64 = 0.15;
const SHOPPING_SHARE: f64 = 0.15;

/// Largest amount priced as given (2^53). Above it f64 stops holding whole
/// units exactly and the u64 fields could overflow, so larger amounts are
/// priced at this ceiling.
pub const MAX_PRICED_AMOUNT: f64 = 9_007_199_254_740_992.0;

pub struct PricingService;

impl PricingService {
    /// Split a per-person amount into hotel, food, transport, shopping and activities.
    /// Non-finite or non-positive amounts yield an all-zero breakdown.
    pub fn breakdown(amount: f64) -> CostBreakdown {
        if !amount.is_finite() || amount <= 0.0 {
            return CostBreakdown::default();
        }
        let amount = amount.min(MAX_PRICED_AMOUNT);

        let hotel_per_night = Self::round_units(amount * HOTEL_SHARE / TRIP_NIGHTS as f64);
        let food_per_day = Self::round_units(amount * FOOD_SHARE / TRIP_DAYS as f64);
        let transport = Self::round_units(amount * TRANSPORT_SHARE);
        let shopping = Self::round_units(amount * SHOPPING_SHARE);
        let total_per_person = Self::round_units(amount);

        let used = hotel_per_night * TRIP_NIGHTS as f64
            + food_per_day * TRIP_DAYS as f64
            + transport
            + shopping;

        // Activities take whatever rounding left over and never go negative.
        let activities = (total_per_person - used).max(0.0);

        CostBreakdown {
            hotel_per_night: hotel_per_night as u64,
            food_per_day: food_per_day as u64,
            transport: transport as u64,
            shopping: shopping as u64,
            activities: activities as u64,
            total_per_person: total_per_person as u64,
        }
    }

    /// Sum of the categories over the whole trip.
    pub fn components_total(breakdown: &CostBreakdown) -> u64 {
        breakdown.hotel_per_night * TRIP_NIGHTS
            + breakdown.food_per_day * TRIP_DAYS
            + breakdown.transport
            + breakdown.shopping
            + breakdown.activities
    }

    /// Whole units, half to even, never below zero.
    fn round_units(value: f64) -> f64 {
        value.round_ties_even().max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_of_round_amount() {
        let breakdown = PricingService::breakdown(50000.0);

        assert_eq!(
            breakdown,
            CostBreakdown {
                hotel_per_night: 8750,
                food_per_day: 5000,
                transport: 7500,
                shopping: 7500,
                activities: 7500,
                total_per_person: 50000,
            }
        );
    }

    #[test]
    fn test_components_add_up_to_total() {
        let mut amount = 10.0;
        while amount < 250000.0 {
            let breakdown = PricingService::breakdown(amount);
            assert_eq!(
                PricingService::components_total(&breakdown),
                breakdown.total_per_person,
                "amount {}",
                amount
            );
            assert_eq!(breakdown.total_per_person, amount.round_ties_even() as u64);
            amount = amount * 1.37 + 0.5;
        }
    }

    #[test]
    fn test_fractional_amounts_keep_the_invariant() {
        for amount in [12500.5, 999.99, 51500.0, 33333.33, 7.77] {
            let breakdown = PricingService::breakdown(amount);
            assert_eq!(PricingService::components_total(&breakdown), breakdown.total_per_person);
        }
    }

    #[test]
    fn test_zero_negative_and_non_finite_amounts() {
        for amount in [0.0, -1.0, -50000.0, f64::NAN, f64::INFINITY] {
            assert_eq!(PricingService::breakdown(amount), CostBreakdown::default());
        }
    }

    #[test]
    fn test_tiny_amounts_never_go_negative() {
        let breakdown = PricingService::breakdown(3.4);
        assert_eq!(breakdown.activities, 0);
        assert_eq!(breakdown.total_per_person, 3);
    }

    #[test]
    fn test_halves_round_to_even() {
        assert_eq!(PricingService::breakdown(30.0).transport, 4);
        assert_eq!(PricingService::breakdown(12345.0).food_per_day, 1234);

        let breakdown = PricingService::breakdown(12500.5);
        assert_eq!(breakdown.total_per_person, 12500);
        assert_eq!(PricingService::components_total(&breakdown), 12500);
    }

    #[test]
    fn test_half_unit_amounts_keep_the_invariant() {
        let breakdown = PricingService::breakdown(4.5);
        assert_eq!(breakdown.total_per_person, 4);
        assert_eq!(PricingService::components_total(&breakdown), 4);
    }

    #[test]
    fn test_huge_amounts_are_priced_at_the_ceiling() {
        let ceiling = PricingService::breakdown(MAX_PRICED_AMOUNT);

        for amount in [1e20, 1e300, f64::MAX] {
            let breakdown = PricingService::breakdown(amount);
            assert_eq!(breakdown, ceiling);
            assert_eq!(breakdown.total_per_person, MAX_PRICED_AMOUNT as u64);
            assert_eq!(PricingService::components_total(&breakdown), breakdown.total_per_person);
        }
    }
}
