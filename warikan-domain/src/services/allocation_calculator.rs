use crate::{
    error::ValidationError,
    model::{Money, Person, PersonId, PersonShare},
    services::settlement_rounding::{AllocationContext, assign_remainder, round_to_unit},
};
use rust_decimal::Decimal;

/// Fair shares and balances for one roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub total: Money,
    pub weight_sum: Decimal,
    /// One entry per person, in input order.
    pub shares: Vec<PersonShare>,
    /// Sum of rounded shares minus `total`, before the remainder was assigned.
    pub difference: Money,
    pub remainder_holder: Option<PersonId>,
}

/// Weighted fair-share allocation service
pub struct AllocationCalculator;

impl AllocationCalculator {
    /// Checks the roster without computing anything.
    pub fn validate(people: &[Person]) -> Result<(), ValidationError> {
        if people.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        for person in people {
            if person.paid.is_negative() {
                return Err(ValidationError::NegativePaid {
                    id: person.id,
                    amount: person.paid,
                });
            }
            if person.ratio <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveRatio {
                    id: person.id,
                    ratio: person.ratio,
                });
            }
        }
        Ok(())
    }

    /// Allocate the total paid amount across `people` by ratio.
    ///
    /// # Arguments
    /// * `people` - Roster in display order (also the tie-break order)
    /// * `context` - Rounding unit, mode and remainder policy
    ///
    /// # Returns
    /// Shares whose `fair_share` values sum exactly to the total
    pub fn allocate(
        &self,
        people: &[Person],
        context: AllocationContext,
    ) -> Result<Allocation, ValidationError> {
        if let Err(err) = Self::validate(people) {
            tracing::warn!(
                reject_reason = err.reject_reason(),
                member_count = people.len(),
                "Allocation rejected due to invalid input"
            );
            return Err(err);
        }

        let total = people
            .iter()
            .try_fold(Money::ZERO, |acc, person| acc.checked_add(person.paid))
            .ok_or(ValidationError::AmountOverflow)?;
        let weight_sum = people
            .iter()
            .try_fold(Decimal::ZERO, |acc, person| acc.checked_add(person.ratio))
            .ok_or(ValidationError::AmountOverflow)?;
        if weight_sum <= Decimal::ZERO {
            return Err(ValidationError::ZeroWeightSum);
        }

        tracing::debug!(
            member_count = people.len(),
            total = %total,
            weight_sum = %weight_sum,
            unit = context.unit.amount(),
            rounding_mode = ?context.rounding_mode,
            "Allocation started"
        );

        let total_decimal = total.as_decimal();
        let mut fair_shares = people
            .iter()
            .map(|person| {
                let exact = total_decimal
                    .checked_mul(person.ratio)
                    .and_then(|weighted| weighted.checked_div(weight_sum))
                    .ok_or(ValidationError::AmountOverflow)?;
                round_to_unit(exact, context.unit, context.rounding_mode)
            })
            .collect::<Result<Vec<Money>, ValidationError>>()?;

        let rounded_sum = fair_shares
            .iter()
            .try_fold(Money::ZERO, |acc, share| acc.checked_add(*share))
            .ok_or(ValidationError::AmountOverflow)?;
        let difference = rounded_sum
            .checked_sub(total)
            .ok_or(ValidationError::AmountOverflow)?;

        let holder = assign_remainder(
            people,
            &mut fair_shares,
            difference,
            context.remainder_policy,
        )?;

        let shares = people
            .iter()
            .zip(fair_shares)
            .map(|(person, fair_share)| {
                let balance = person
                    .paid
                    .checked_sub(fair_share)
                    .ok_or(ValidationError::AmountOverflow)?;
                Ok(PersonShare {
                    id: person.id,
                    paid: person.paid,
                    fair_share,
                    balance,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        debug_assert!(shares.iter().map(|share| share.balance).sum::<Money>().is_zero());

        Ok(Allocation {
            total,
            weight_sum,
            shares,
            difference,
            remainder_holder: holder.map(|idx| people[idx].id),
        })
    }
}
