#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::ValidationError;
pub use model::{
    CalculationResult, InvalidRoundingUnit, Money, Person, PersonId, PersonShare, RoundingUnit,
    SettlementOutcome, Summary, Transfer,
};
pub use services::{
    AllocationCalculator, AllocationContext, RemainderPolicy, RoundingMode, SettlementMatcher,
    SplitCalculator,
};
