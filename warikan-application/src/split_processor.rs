use crate::{
    error::SplitError,
    model::{PaymentInstruction, SplitSession},
    ports::PaymentLinkBuilder,
};
use warikan_domain::{CalculationResult, Person, SplitCalculator, Transfer};

#[derive(Clone, Copy)]
pub struct SplitProcessor<'a> {
    link_builder: &'a dyn PaymentLinkBuilder,
}

impl<'a> SplitProcessor<'a> {
    pub fn new(link_builder: &'a dyn PaymentLinkBuilder) -> Self {
        Self { link_builder }
    }

    /// Calculates the current roster of `session`. The session is not modified.
    pub fn calculate(&self, session: &SplitSession) -> Result<CalculationResult, SplitError> {
        let people: Vec<Person> = session.people().cloned().collect();
        let result = SplitCalculator.calculate(&people, session.context())?;
        if result.is_settled() {
            tracing::info!(
                member_count = people.len(),
                total = %result.total_amount,
                "Everyone already paid their share"
            );
        }
        Ok(result)
    }

    /// One deep link per transaction, in transaction order.
    pub fn payment_instructions<F>(
        &self,
        result: &CalculationResult,
        note: F,
    ) -> Result<Vec<PaymentInstruction>, SplitError>
    where
        F: Fn(&Transfer) -> String,
    {
        result
            .transactions
            .iter()
            .map(|transfer| {
                let link = self
                    .link_builder
                    .payment_link(transfer.amount, &note(transfer))?;
                Ok(PaymentInstruction {
                    transfer: *transfer,
                    link,
                })
            })
            .collect()
    }
}
