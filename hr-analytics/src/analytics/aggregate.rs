//! Grouping and reducing primitives shared by the engine
//!
//! Every division here treats an empty denominator as 0.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use hr_common::money;

/// Count items per key; keys come back in ascending order
pub fn group_count<T, K, F>(items: &[T], key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(key(item)).or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean, 0.0 for an empty input
pub fn average_or_zero<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u64), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// `part * 100 / total`, 0.0 when `total` is 0
pub fn percentage_or_zero(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Exact decimal sum, scaled to two places
pub fn decimal_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    money::round(values.into_iter().sum())
}

/// Decimal mean rounded to two places, zero for an empty input
pub fn decimal_average_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .fold((Decimal::ZERO, 0i64), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        money::round(Decimal::ZERO)
    } else {
        money::round(sum / Decimal::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_count_sorted_by_key() {
        let ratings = [5, 1, 3, 5, 3, 5];
        let counts = group_count(&ratings, |r| *r);

        let pairs: Vec<(i32, u64)> = counts.into_iter().collect();
        assert_eq!(pairs, vec![(1, 1), (3, 2), (5, 3)]);
    }

    #[test]
    fn test_average_or_zero() {
        assert_eq!(average_or_zero(Vec::<f64>::new()), 0.0);
        assert_eq!(average_or_zero([1.0, 2.0, 4.0, 5.0]), 3.0);
    }

    #[test]
    fn test_percentage_or_zero() {
        assert_eq!(percentage_or_zero(0, 0), 0.0);
        assert_eq!(percentage_or_zero(5, 0), 0.0);
        assert_eq!(percentage_or_zero(8, 10), 80.0);
        assert!(percentage_or_zero(1, 3).is_finite());
    }

    #[test]
    fn test_decimal_sum_keeps_two_places() {
        let total = decimal_sum([money::from_cents(100_000), money::from_cents(200_000)]);
        assert_eq!(total.to_string(), "3000.00");
        assert_eq!(decimal_sum(Vec::<Decimal>::new()).to_string(), "0.00");
    }

    #[test]
    fn test_decimal_average_rounds_half_away_from_zero() {
        // (0.01 + 0.02) / 2 = 0.015
        let avg = decimal_average_or_zero([money::from_cents(1), money::from_cents(2)]);
        assert_eq!(avg.to_string(), "0.02");

        let avg = decimal_average_or_zero([money::from_cents(100), money::from_cents(100), money::from_cents(101)]);
        assert_eq!(avg.to_string(), "1.00");

        assert_eq!(decimal_average_or_zero(Vec::<Decimal>::new()).to_string(), "0.00");
    }
}
