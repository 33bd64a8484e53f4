#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod ports;
pub mod split_processor;

pub use error::{PaymentLinkError, SessionError, SplitError};
pub use model::{
    DefaultLabel, MAX_PEOPLE, MIN_PEOPLE, PaymentInstruction, SessionConfig, SplitSession,
};
pub use ports::{MemberDirectory, PaymentLinkBuilder};
pub use split_processor::SplitProcessor;
