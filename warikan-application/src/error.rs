use warikan_domain::{Money, PersonId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("default person count must be between {min} and {max} (got {count})")]
    InvalidDefaultCount {
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("a split can hold at most {max} people")]
    TooManyPeople { max: usize },
    #[error("a split needs at least {min} people")]
    TooFewPeople { min: usize },
    #[error("person {0} is not part of this split")]
    UnknownPerson(PersonId),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentLinkError {
    #[error("invalid wallet scheme '{0}'")]
    InvalidScheme(String),
    #[error("payment amount must be positive (got {0})")]
    NonPositiveAmount(Money),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    PaymentLink(#[from] PaymentLinkError),
}
