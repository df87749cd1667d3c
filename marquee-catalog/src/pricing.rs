use marquee_domain::SeatType;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("no premium multiplier configured for seat type {0}")]
    MissingMultiplier(SeatType),
}

/// Resolves a show's base price and a seat type into the final per-seat
/// price: `base * multiplier`, rounded once to the smallest currency unit
/// (round half-up). The multiplier table is owner configuration, not code.
pub struct PricingEngine {
    multipliers: HashMap<String, Decimal>,
}

impl PricingEngine {
    pub fn new(multipliers: HashMap<String, Decimal>) -> Self {
        Self { multipliers }
    }

    pub fn price_for(&self, base_price: Decimal, seat_type: SeatType) -> Result<Decimal, PricingError> {
        let multiplier = self
            .multipliers
            .get(seat_type.as_str())
            .ok_or(PricingError::MissingMultiplier(seat_type))?;
        Ok((base_price * *multiplier)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn engine() -> PricingEngine {
        let mut m = HashMap::new();
        m.insert("standard".to_string(), dec!(1.0));
        m.insert("vip".to_string(), dec!(1.5));
        m.insert("couple".to_string(), dec!(1.3));
        m.insert("super_vip".to_string(), dec!(2.0));
        PricingEngine::new(m)
    }

    #[test]
    fn standard_seat_charges_base_price() {
        let price = engine().price_for(dec!(10.00), SeatType::Standard).unwrap();
        assert_eq!(price, dec!(10.00));
    }

    #[test]
    fn vip_seat_charges_fifty_percent_premium() {
        let price = engine().price_for(dec!(10.00), SeatType::Vip).unwrap();
        assert_eq!(price, dec!(15.00));
    }

    #[test]
    fn rounds_half_up_to_the_smallest_currency_unit() {
        // 10.95 * 1.3 = 14.235, midpoint rounds away from zero
        let price = engine().price_for(dec!(10.95), SeatType::Couple).unwrap();
        assert_eq!(price, dec!(14.24));

        // 9.99 * 1.5 = 14.985
        let price = engine().price_for(dec!(9.99), SeatType::Vip).unwrap();
        assert_eq!(price, dec!(14.99));
    }

    #[test]
    fn missing_multiplier_is_an_error_not_a_silent_default() {
        let bare = PricingEngine::new(HashMap::new());
        assert!(matches!(
            bare.price_for(dec!(10.00), SeatType::Vip),
            Err(PricingError::MissingMultiplier(SeatType::Vip))
        ));
    }
}
