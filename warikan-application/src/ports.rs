use crate::{error::PaymentLinkError, model::SplitSession};
use std::collections::HashMap;
use warikan_domain::{Money, PersonId};

/// Builds the wallet-app deep link a debtor opens to pay.
pub trait PaymentLinkBuilder: Send + Sync {
    fn payment_link(&self, amount: Money, note: &str) -> Result<String, PaymentLinkError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, id: PersonId) -> Option<&str>;
}

impl MemberDirectory for HashMap<PersonId, String> {
    fn display_name(&self, id: PersonId) -> Option<&str> {
        self.get(&id).map(String::as_str)
    }
}

impl MemberDirectory for SplitSession {
    fn display_name(&self, id: PersonId) -> Option<&str> {
        self.person(id).map(|person| person.name.as_str())
    }
}
