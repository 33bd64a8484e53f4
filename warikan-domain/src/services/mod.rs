pub mod allocation_calculator;
pub mod settlement_matcher;
pub mod settlement_rounding;
pub mod split_calculator;

pub use allocation_calculator::{Allocation, AllocationCalculator};
pub use settlement_matcher::SettlementMatcher;
pub use settlement_rounding::{
    AllocationContext, RemainderPolicy, RoundingMode, assign_remainder, remainder_holder,
    round_to_unit,
};
pub use split_calculator::{SplitCalculator, residual_balances};
