use crate::{
    error::ValidationError,
    model::{Money, PersonId, Transfer},
};
use std::{cmp::Reverse, collections::BinaryHeap};

/// Greedy settlement service.
///
/// Repeatedly pairs the largest creditor with the largest debtor. This is the
/// usual minimum-cash-flow heuristic: it settles everyone with at most
/// `n - 1` transfers but does not always find the smallest possible count.
pub struct SettlementMatcher;

type Party = (Money, Reverse<usize>);

impl SettlementMatcher {
    /// Build transfers that bring every balance to zero.
    ///
    /// # Arguments
    /// * `balances` - `(person, balance)` in input order; positive = owed money.
    ///   The balances must sum to zero.
    ///
    /// # Returns
    /// Transfers in emission order, debtor to creditor
    ///
    /// # Errors
    /// `UnbalancedBalances` when the input does not net to zero,
    /// `AmountOverflow` when the net cannot be computed.
    pub fn settle(
        &self,
        balances: &[(PersonId, Money)],
    ) -> Result<Vec<Transfer>, ValidationError> {
        let net = balances
            .iter()
            .try_fold(Money::ZERO, |acc, (_, balance)| acc.checked_add(*balance))
            .ok_or(ValidationError::AmountOverflow)?;
        if !net.is_zero() {
            let err = ValidationError::UnbalancedBalances { net };
            tracing::warn!(
                member_count = balances.len(),
                net = %net,
                reject_reason = err.reject_reason(),
                "Settlement input rejected"
            );
            return Err(err);
        }

        // Ties on amount pop the lower input index first via `Reverse`.
        let mut creditors: BinaryHeap<Party> = BinaryHeap::new();
        let mut debtors: BinaryHeap<Party> = BinaryHeap::new();
        for (idx, (_, balance)) in balances.iter().enumerate() {
            if balance.is_positive() {
                creditors.push((*balance, Reverse(idx)));
            } else if balance.is_negative() {
                debtors.push((balance.abs(), Reverse(idx)));
            }
        }

        let mut transfers = Vec::with_capacity(balances.len().saturating_sub(1));
        while !creditors.is_empty() && !debtors.is_empty() {
            let (Some((credit, Reverse(creditor))), Some((debt, Reverse(debtor)))) =
                (creditors.pop(), debtors.pop())
            else {
                break;
            };

            let amount = credit.min(debt);
            transfers.push(Transfer {
                from: balances[debtor].0,
                to: balances[creditor].0,
                amount,
            });

            let credit_left = credit - amount;
            let debt_left = debt - amount;
            if credit_left.is_positive() {
                creditors.push((credit_left, Reverse(creditor)));
            }
            if debt_left.is_positive() {
                debtors.push((debt_left, Reverse(debtor)));
            }
        }

        // Zero net input empties both sides together.
        debug_assert!(creditors.is_empty() && debtors.is_empty());

        tracing::debug!(
            member_count = balances.len(),
            transfer_count = transfers.len(),
            "Settlement matching finished"
        );

        Ok(transfers)
    }
}
