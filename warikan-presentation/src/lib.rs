#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod settlement_presenter;
pub mod text_table;

pub use error_presenter::{format_session_error, format_split_error, format_validation_error};
pub use settlement_presenter::{SettlementPresenter, SettlementView, directory_from_names};
pub use text_table::{Alignment, TextTableBuilder};
