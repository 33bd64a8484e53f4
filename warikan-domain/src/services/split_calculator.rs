use crate::{
    error::ValidationError,
    model::{CalculationResult, Money, Person, PersonId, SettlementOutcome, Summary},
    services::{
        AllocationCalculator, SettlementMatcher,
        settlement_rounding::{AllocationContext, round_to_unit},
    },
};
use fxhash::FxHashMap;
use rust_decimal::Decimal;

/// Allocation plus settlement in one pure call.
pub struct SplitCalculator;

impl SplitCalculator {
    pub fn calculate(
        &self,
        people: &[Person],
        context: AllocationContext,
    ) -> Result<CalculationResult, ValidationError> {
        let allocation = AllocationCalculator.allocate(people, context)?;

        let per_person_amount = round_to_unit(
            allocation.total.as_decimal() / Decimal::from(people.len()),
            context.unit,
            context.rounding_mode,
        )?;

        let balances: Vec<_> = allocation
            .shares
            .iter()
            .map(|share| (share.id, share.balance))
            .collect();
        let transactions = SettlementMatcher.settle(&balances)?;

        let outcome = if transactions.is_empty() {
            SettlementOutcome::AlreadySettled
        } else {
            SettlementOutcome::PaymentsNeeded {
                count: transactions.len(),
            }
        };

        tracing::debug!(
            member_count = people.len(),
            total = %allocation.total,
            per_person = %per_person_amount,
            difference = %allocation.difference,
            transfer_count = transactions.len(),
            "Split calculation finished"
        );

        Ok(CalculationResult {
            total_amount: allocation.total,
            per_person_amount,
            shares: allocation.shares,
            transactions,
            summary: Summary {
                difference: allocation.difference,
                remainder_holder: allocation.remainder_holder,
                outcome,
            },
        })
    }
}

/// Applies `result.transactions` to its balances and returns what is left.
pub fn residual_balances(result: &CalculationResult) -> Vec<Money> {
    let mut net: FxHashMap<PersonId, Money> = FxHashMap::default();
    for transfer in &result.transactions {
        *net.entry(transfer.from).or_default() += transfer.amount;
        *net.entry(transfer.to).or_default() -= transfer.amount;
    }
    result
        .shares
        .iter()
        .map(|share| share.balance + net.get(&share.id).copied().unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RoundingUnit, Transfer};
    use rstest::{fixture, rstest};

    #[fixture]
    fn calculator() -> SplitCalculator {
        SplitCalculator
    }

    fn person(id: u64, name: &str, paid: i64, ratio: i64) -> Person {
        Person::new(PersonId(id), name)
            .with_paid(Money::from_i64(paid))
            .with_ratio(Decimal::from(ratio))
    }

    fn transfer(from: u64, to: u64, amount: i64) -> Transfer {
        Transfer {
            from: PersonId(from),
            to: PersonId(to),
            amount: Money::from_i64(amount),
        }
    }

    #[rstest]
    fn two_people_one_paid_everything(calculator: SplitCalculator) {
        let people = [person(1, "A", 3000, 1), person(2, "B", 0, 1)];

        let result = calculator
            .calculate(&people, AllocationContext::yen_default())
            .expect("calculation should succeed");

        assert_eq!(result.total_amount, Money::from_i64(3000));
        assert_eq!(result.per_person_amount, Money::from_i64(1500));
        assert_eq!(result.transactions, vec![transfer(2, 1, 1500)]);
        assert_eq!(
            result.summary.outcome,
            SettlementOutcome::PaymentsNeeded { count: 1 }
        );
    }

    #[rstest]
    fn weighted_ratios_follow_shares(calculator: SplitCalculator) {
        let people = [
            person(1, "A", 400, 2),
            person(2, "B", 0, 1),
            person(3, "C", 0, 1),
        ];

        let result = calculator
            .calculate(&people, AllocationContext::yen_default())
            .expect("calculation should succeed");

        let fair: Vec<i64> = result
            .shares
            .iter()
            .map(|share| share.fair_share.amount())
            .collect();
        assert_eq!(fair, [200, 100, 100]);
        assert_eq!(
            result.transactions,
            vec![transfer(2, 1, 100), transfer(3, 1, 100)]
        );
    }

    #[rstest]
    fn even_payments_need_no_transfers(calculator: SplitCalculator) {
        let people = [
            person(1, "A", 1200, 1),
            person(2, "B", 1200, 1),
            person(3, "C", 1200, 1),
        ];

        let result = calculator
            .calculate(&people, AllocationContext::yen_default())
            .expect("calculation should succeed");

        assert!(result.transactions.is_empty());
        assert!(result.is_settled());
        assert_eq!(result.summary.difference, Money::ZERO);
        assert_eq!(result.summary.remainder_holder, None);
    }

    #[rstest]
    fn hundred_unit_remainder_goes_to_largest_payer(calculator: SplitCalculator) {
        let people = [
            person(1, "A", 1050, 1),
            person(2, "B", 0, 1),
            person(3, "C", 0, 1),
        ];
        let context = AllocationContext::yen_default().with_unit(RoundingUnit::Hundred);

        let result = calculator
            .calculate(&people, context)
            .expect("calculation should succeed");

        assert_eq!(result.per_person_amount, Money::from_i64(400));
        assert_eq!(result.summary.difference, Money::from_i64(150));
        assert_eq!(result.summary.remainder_holder, Some(PersonId(1)));
        assert_eq!(
            result.share_of(PersonId(1)).map(|share| share.fair_share),
            Some(Money::from_i64(250))
        );
        assert_eq!(
            result.transactions,
            vec![transfer(2, 1, 400), transfer(3, 1, 400)]
        );
        assert!(residual_balances(&result).iter().all(|money| money.is_zero()));
    }

    #[rstest]
    fn coarse_unit_can_leave_the_holder_a_negative_share(calculator: SplitCalculator) {
        let people = [
            person(1, "A", 1500, 1),
            person(2, "B", 0, 1),
            person(3, "C", 0, 1),
        ];
        let context = AllocationContext::yen_default().with_unit(RoundingUnit::Thousand);

        let result = calculator
            .calculate(&people, context)
            .expect("calculation should succeed");

        let fair: Vec<i64> = result
            .shares
            .iter()
            .map(|share| share.fair_share.amount())
            .collect();
        assert_eq!(fair, [-500, 1000, 1000]);
        assert_eq!(result.summary.difference, Money::from_i64(1500));
        assert_eq!(result.summary.remainder_holder, Some(PersonId(1)));
        assert_eq!(
            result.transactions,
            vec![transfer(2, 1, 1000), transfer(3, 1, 1000)]
        );
        assert!(residual_balances(&result).iter().all(|money| money.is_zero()));
    }

    #[rstest]
    fn recalculation_is_idempotent(calculator: SplitCalculator) {
        let people = [
            person(1, "A", 1234, 3),
            person(2, "B", 987, 1),
            person(3, "C", 0, 2),
            person(4, "D", 555, 1),
        ];
        let context = AllocationContext::yen_default().with_unit(RoundingUnit::Ten);

        let first = calculator.calculate(&people, context);
        let second = calculator.calculate(&people, context);

        assert_eq!(first, second);
    }

    #[rstest]
    fn validation_errors_stop_the_calculation(calculator: SplitCalculator) {
        let result = calculator.calculate(&[], AllocationContext::yen_default());
        assert_eq!(result, Err(ValidationError::EmptyRoster));
    }
}
