use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use warikan_application::{PaymentLinkBuilder, PaymentLinkError};
use warikan_domain::Money;

/// `<scheme>://payment?amount=<integer>&note=<percent-encoded>`
///
/// The link is only opened by the client; nothing here waits for or checks
/// the payment.
#[derive(Debug, Clone)]
pub struct WalletPaymentLinkBuilder {
    scheme: String,
}

impl WalletPaymentLinkBuilder {
    pub fn new(scheme: impl Into<String>) -> Result<Self, PaymentLinkError> {
        let scheme = scheme.into();
        if !is_valid_scheme(&scheme) {
            tracing::warn!(scheme = %scheme, "Rejected wallet scheme");
            return Err(PaymentLinkError::InvalidScheme(scheme));
        }
        Ok(Self { scheme })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

// RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl PaymentLinkBuilder for WalletPaymentLinkBuilder {
    fn payment_link(&self, amount: Money, note: &str) -> Result<String, PaymentLinkError> {
        if !amount.is_positive() {
            return Err(PaymentLinkError::NonPositiveAmount(amount));
        }
        Ok(format!(
            "{}://payment?amount={}&note={}",
            self.scheme,
            amount.amount(),
            utf8_percent_encode(note, NON_ALPHANUMERIC)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("paypay", true)]
    #[case::with_symbols("my-wallet+v2.app", true)]
    #[case::empty("", false)]
    #[case::leading_digit("2pay", false)]
    #[case::with_colon("pay:pay", false)]
    #[case::with_space("pay pay", false)]
    fn scheme_validation(#[case] scheme: &str, #[case] ok: bool) {
        assert_eq!(WalletPaymentLinkBuilder::new(scheme).is_ok(), ok);
    }

    #[rstest]
    #[case::ascii_note(1500, "Dinner & drinks", "paypay://payment?amount=1500&note=Dinner%20%26%20drinks")]
    #[case::japanese_note(300, "割り勘", "paypay://payment?amount=300&note=%E5%89%B2%E3%82%8A%E5%8B%98")]
    #[case::empty_note(1, "", "paypay://payment?amount=1&note=")]
    fn builds_encoded_links(#[case] amount: i64, #[case] note: &str, #[case] expected: &str) {
        let builder = WalletPaymentLinkBuilder::new("paypay").expect("valid scheme");
        let link = builder
            .payment_link(Money::from_i64(amount), note)
            .expect("link builds");
        assert_eq!(link, expected);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-100)]
    fn rejects_non_positive_amounts(#[case] amount: i64) {
        let builder = WalletPaymentLinkBuilder::new("paypay").expect("valid scheme");
        assert_eq!(
            builder.payment_link(Money::from_i64(amount), "note"),
            Err(PaymentLinkError::NonPositiveAmount(Money::from_i64(amount)))
        );
    }
}
