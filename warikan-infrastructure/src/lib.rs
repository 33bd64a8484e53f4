#![warn(clippy::uninlined_format_args)]

pub mod payment_link;

pub use payment_link::WalletPaymentLinkBuilder;
