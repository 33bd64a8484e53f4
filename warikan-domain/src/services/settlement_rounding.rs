//! Rounding of fair shares to the currency grid and assignment of the
//! rounding remainder.
//!
//! Shares are computed exactly in `Decimal`, snapped to the configured unit,
//! and whatever the snapped shares over- or under-collect is handed to a
//! single person chosen by [`RemainderPolicy`]. After that step the shares
//! sum to the bill total exactly.

use crate::{
    error::ValidationError,
    model::{Money, Person, RoundingUnit},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Rounding mode used when snapping a share to the unit grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (e.g., 1.5 -> 2). Default.
    #[default]
    HalfUp,
    /// Round half to nearest even number (banker's rounding).
    HalfEven,
    /// Always round towards positive infinity.
    Up,
    /// Always round towards negative infinity.
    Down,
}

impl RoundingMode {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Up => RoundingStrategy::ToPositiveInfinity,
            Self::Down => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Who bears the rounding remainder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// The person with the largest paid amount absorbs the whole remainder.
    /// Ties go to the person listed first.
    #[default]
    LargestPayer,
}

/// Configures how fair shares are rounded.
///
/// # Example
/// ```
/// use warikan_domain::{RoundingUnit, services::{AllocationContext, RoundingMode, RemainderPolicy}};
///
/// let ctx = AllocationContext {
///     unit: RoundingUnit::Hundred,
///     rounding_mode: RoundingMode::Down,
///     remainder_policy: RemainderPolicy::LargestPayer,
/// };
/// assert_eq!(ctx.unit.amount(), 100);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationContext {
    pub unit: RoundingUnit,
    pub rounding_mode: RoundingMode,
    pub remainder_policy: RemainderPolicy,
}

impl AllocationContext {
    /// 1-yen grid, half-up rounding, largest payer absorbs the remainder.
    pub fn yen_default() -> Self {
        Self::default()
    }

    pub fn with_unit(self, unit: RoundingUnit) -> Self {
        Self { unit, ..self }
    }

    pub fn with_rounding_mode(self, rounding_mode: RoundingMode) -> Self {
        Self {
            rounding_mode,
            ..self
        }
    }
}

/// Snaps `exact` to a multiple of `unit` using `mode`.
pub fn round_to_unit(
    exact: Decimal,
    unit: RoundingUnit,
    mode: RoundingMode,
) -> Result<Money, ValidationError> {
    let unit_amount = unit.amount();
    let units = (exact / Decimal::from(unit_amount)).round_dp_with_strategy(0, mode.strategy());
    let Some(units) = units.to_i64() else {
        tracing::warn!(
            reject_reason = "quantize_failure",
            exact = %exact,
            unit = unit_amount,
            "Share could not be converted to integer units"
        );
        return Err(ValidationError::AmountOverflow);
    };
    units
        .checked_mul(unit_amount)
        .map(Money::from_i64)
        .ok_or(ValidationError::AmountOverflow)
}

/// Picks the index that absorbs the remainder under `policy`.
///
/// Returns `None` only for an empty roster.
pub fn remainder_holder(people: &[Person], policy: RemainderPolicy) -> Option<usize> {
    match policy {
        RemainderPolicy::LargestPayer => people
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, Money)>, (idx, person)| match best {
                Some((_, paid)) if paid >= person.paid => best,
                _ => Some((idx, person.paid)),
            })
            .map(|(idx, _)| idx),
    }
}

/// Removes `difference` from the holder's rounded share so that the shares
/// sum to the total again. Returns the holder index, or `None` when there
/// was nothing to assign.
pub fn assign_remainder(
    people: &[Person],
    shares: &mut [Money],
    difference: Money,
    policy: RemainderPolicy,
) -> Result<Option<usize>, ValidationError> {
    debug_assert_eq!(people.len(), shares.len());
    if difference.is_zero() {
        return Ok(None);
    }
    let Some(holder) = remainder_holder(people, policy) else {
        return Err(ValidationError::EmptyRoster);
    };

    shares[holder] = shares[holder]
        .checked_sub(difference)
        .ok_or(ValidationError::AmountOverflow)?;

    tracing::debug!(
        holder = %people[holder].id,
        difference = %difference,
        adjusted_share = %shares[holder],
        policy = ?policy,
        "Rounding remainder assigned"
    );

    Ok(Some(holder))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonId;
    use rstest::rstest;

    fn person(id: u64, paid: i64) -> Person {
        Person::new(PersonId(id), format!("P{id}")).with_paid(Money::from_i64(paid))
    }

    #[rstest]
    #[case::half_up_midpoint(Decimal::new(350, 0), RoundingUnit::Hundred, RoundingMode::HalfUp, 400)]
    #[case::half_even_midpoint(Decimal::new(350, 0), RoundingUnit::Hundred, RoundingMode::HalfEven, 400)]
    #[case::half_even_down(Decimal::new(250, 0), RoundingUnit::Hundred, RoundingMode::HalfEven, 200)]
    #[case::up(Decimal::new(301, 0), RoundingUnit::Hundred, RoundingMode::Up, 400)]
    #[case::down(Decimal::new(399, 0), RoundingUnit::Hundred, RoundingMode::Down, 300)]
    #[case::fractional_yen(Decimal::new(3333, 1), RoundingUnit::One, RoundingMode::HalfUp, 333)]
    #[case::fractional_yen_up(Decimal::new(3333, 1), RoundingUnit::One, RoundingMode::Up, 334)]
    #[case::thousand(Decimal::new(1499, 0), RoundingUnit::Thousand, RoundingMode::HalfUp, 1000)]
    #[case::ten_exact(Decimal::new(120, 0), RoundingUnit::Ten, RoundingMode::Up, 120)]
    fn round_to_unit_snaps_to_grid(
        #[case] exact: Decimal,
        #[case] unit: RoundingUnit,
        #[case] mode: RoundingMode,
        #[case] expected: i64,
    ) {
        assert_eq!(
            round_to_unit(exact, unit, mode),
            Ok(Money::from_i64(expected))
        );
    }

    #[rstest]
    #[case::largest_last(&[(1, 0), (2, 500), (3, 900)], Some(2))]
    #[case::largest_first(&[(1, 900), (2, 500), (3, 0)], Some(0))]
    #[case::tie_prefers_first(&[(1, 100), (2, 700), (3, 700)], Some(1))]
    #[case::all_zero(&[(1, 0), (2, 0)], Some(0))]
    #[case::empty(&[], None)]
    fn largest_payer_is_deterministic(
        #[case] roster: &[(u64, i64)],
        #[case] expected: Option<usize>,
    ) {
        let people: Vec<Person> = roster.iter().map(|&(id, paid)| person(id, paid)).collect();
        assert_eq!(
            remainder_holder(&people, RemainderPolicy::LargestPayer),
            expected
        );
    }

    #[test]
    fn assign_remainder_restores_total() {
        let people = [person(1, 1050), person(2, 0), person(3, 0)];
        let mut shares = [Money::from_i64(400); 3];
        let difference = Money::from_i64(150);

        let holder = assign_remainder(
            &people,
            &mut shares,
            difference,
            RemainderPolicy::LargestPayer,
        )
        .expect("assignment should succeed");

        assert_eq!(holder, Some(0));
        assert_eq!(
            shares,
            [Money::from_i64(250), Money::from_i64(400), Money::from_i64(400)]
        );
        assert_eq!(shares.iter().sum::<Money>(), Money::from_i64(1050));
    }

    #[test]
    fn assign_remainder_skips_zero_difference() {
        let people = [person(1, 100), person(2, 100)];
        let mut shares = [Money::from_i64(100); 2];
        let holder = assign_remainder(
            &people,
            &mut shares,
            Money::ZERO,
            RemainderPolicy::LargestPayer,
        )
        .expect("assignment should succeed");
        assert_eq!(holder, None);
        assert_eq!(shares, [Money::from_i64(100); 2]);
    }
}
