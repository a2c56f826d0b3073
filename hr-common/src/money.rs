//! Money utilities using rust_decimal for precision
//!
//! Amounts are persisted as integer minor units (cents) and surfaced as
//! `Decimal` with two decimal places. All sums and averages are computed on
//! `Decimal`, never on `f64`.

use rust_decimal::prelude::*;

use crate::{Error, Result};

/// Scale of every monetary value (2 decimal places)
pub const DECIMAL_PLACES: u32 = 2;

/// Convert stored minor units into a two-place decimal
#[inline]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// Convert a decimal amount into minor units for storage
///
/// Values with more than two places are rounded half away from zero first.
pub fn to_cents(amount: Decimal) -> Result<i64> {
    round(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| Error::InvalidInput(format!("Amount out of range: {}", amount)))
}

/// Round to two places (half away from zero) and pin the scale to two,
/// so `55000` renders as `55000.00`
pub fn round(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DECIMAL_PLACES);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_round_trip_keeps_scale() {
        let amount = from_cents(5_000_000);
        assert_eq!(amount.to_string(), "50000.00");
        assert_eq!(to_cents(amount).unwrap(), 5_000_000);
    }

    #[test]
    fn test_out_of_range_amounts_rejected() {
        assert!(matches!(to_cents(Decimal::MAX), Err(Error::InvalidInput(_))));
        assert!(matches!(to_cents(Decimal::MIN), Err(Error::InvalidInput(_))));
        // Fits in Decimal, not in i64 cents
        assert!(to_cents(Decimal::from(i64::MAX)).is_err());
        assert_eq!(to_cents(Decimal::new(-1999, 2)).unwrap(), -1999);
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += from_cents(1);
        }
        assert_eq!(round(total).to_string(), "10.00");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round(Decimal::new(12345, 3)).to_string(), "12.35");
        assert_eq!(round(Decimal::new(-12345, 3)).to_string(), "-12.35");
        assert_eq!(round(Decimal::from(7)).to_string(), "7.00");
    }
}
