use crate::model::{Money, PersonId};
use rust_decimal::Decimal;

/// Input rejected before any allocation work is done.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one person is required")]
    EmptyRoster,
    #[error("person {id} has a negative paid amount ({amount})")]
    NegativePaid { id: PersonId, amount: Money },
    #[error("person {id} has a non-positive ratio ({ratio})")]
    NonPositiveRatio { id: PersonId, ratio: Decimal },
    #[error("sum of ratios must be positive")]
    ZeroWeightSum,
    #[error("amount does not fit in the supported range")]
    AmountOverflow,
    #[error("balances must sum to zero (net {net})")]
    UnbalancedBalances { net: Money },
}

impl ValidationError {
    pub fn reject_reason(&self) -> &'static str {
        match self {
            Self::EmptyRoster => "empty_roster",
            Self::NegativePaid { .. } => "negative_paid",
            Self::NonPositiveRatio { .. } => "non_positive_ratio",
            Self::ZeroWeightSum => "zero_weight_sum",
            Self::AmountOverflow => "amount_overflow",
            Self::UnbalancedBalances { .. } => "unbalanced_balances",
        }
    }
}
