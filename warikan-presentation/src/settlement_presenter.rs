use crate::text_table::{Alignment, TextTableBuilder};
use std::{borrow::Cow, collections::HashMap};
use warikan_application::{MemberDirectory, PaymentInstruction};
use warikan_domain::{CalculationResult, Money, PersonId, PersonShare, SettlementOutcome, Transfer};
use warikan_i18n as i18n;

pub struct SettlementPresenter;

pub struct SettlementView {
    pub summary: String,
    pub share_table: String,
    pub transfer_table: Option<String>,
}

impl SettlementPresenter {
    pub fn render(result: &CalculationResult) -> SettlementView {
        Self::render_with_members(result, &EmptyMemberDirectory)
    }

    pub fn render_with_members(
        result: &CalculationResult,
        member_directory: &dyn MemberDirectory,
    ) -> SettlementView {
        let summary = Self::build_summary(result, member_directory);
        let share_table = Self::build_share_table(&result.shares, member_directory);
        let transfer_table = (!result.transactions.is_empty())
            .then(|| Self::build_transfer_table(&result.transactions, member_directory));

        SettlementView {
            summary,
            share_table,
            transfer_table,
        }
    }

    pub fn build_summary(
        result: &CalculationResult,
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut lines = vec![
            format!("{}: {}", i18n::TOTAL, format_yen(result.total_amount)),
            format!(
                "{}: {}",
                i18n::PER_PERSON,
                format_yen(result.per_person_amount)
            ),
        ];

        if !result.summary.difference.is_zero() {
            lines.push(format!(
                "{}: {}",
                i18n::DIFFERENCE,
                format_signed(result.summary.difference)
            ));
            if let Some(holder) = result.summary.remainder_holder {
                lines.push(i18n::remainder_holder(format_member_label(
                    holder,
                    member_directory,
                )));
            }
        }

        lines.push(match result.summary.outcome {
            SettlementOutcome::AlreadySettled => i18n::NO_PAYMENTS_NEEDED.to_string(),
            SettlementOutcome::PaymentsNeeded { count } => i18n::payments_needed(count),
        });

        lines.join("\n")
    }

    pub fn build_share_table(
        shares: &[PersonShare],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[
                Alignment::Left,
                Alignment::Right,
                Alignment::Right,
                Alignment::Right,
            ])
            .headers(&[
                Cow::Borrowed(i18n::MEMBER),
                Cow::Borrowed(i18n::PAID),
                Cow::Borrowed(i18n::FAIR_SHARE),
                Cow::Borrowed(i18n::BALANCE),
            ]);

        for share in shares {
            builder = builder.row([
                format_member_label(share.id, member_directory),
                Cow::Owned(share.paid.amount().to_string()),
                Cow::Owned(share.fair_share.amount().to_string()),
                Cow::Owned(format_signed(share.balance)),
            ]);
        }

        builder.build()
    }

    pub fn build_transfer_table(
        transfers: &[Transfer],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(i18n::FROM),
                Cow::Borrowed(i18n::TO),
                Cow::Borrowed(i18n::AMOUNT),
            ]);

        for transfer in transfers {
            builder = builder.row([
                format_member_label(transfer.from, member_directory),
                format_member_label(transfer.to, member_directory),
                Cow::Owned(transfer.amount.amount().to_string()),
            ]);
        }

        builder.build()
    }

    /// Links are left unpadded so terminals can still detect them.
    pub fn build_payment_links(
        instructions: &[PaymentInstruction],
        member_directory: &dyn MemberDirectory,
    ) -> String {
        instructions
            .iter()
            .map(|instruction| {
                format!(
                    "{} → {} ({}): {}",
                    format_member_label(instruction.transfer.from, member_directory),
                    format_member_label(instruction.transfer.to, member_directory),
                    format_yen(instruction.transfer.amount),
                    instruction.link
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn format_signed(money: Money) -> String {
    if money.is_positive() {
        format!("+{}", money.amount())
    } else {
        money.amount().to_string()
    }
}

fn format_yen(money: Money) -> String {
    format!("¥{}", money.amount())
}

pub(crate) fn format_member_label(
    id: PersonId,
    member_directory: &dyn MemberDirectory,
) -> Cow<'_, str> {
    match member_directory.display_name(id) {
        Some(name) if !name.trim().is_empty() => Cow::Borrowed(name),
        _ => Cow::Owned(format!("{} ({id})", i18n::UNKNOWN_MEMBER)),
    }
}

struct EmptyMemberDirectory;

impl MemberDirectory for EmptyMemberDirectory {
    fn display_name(&self, _id: PersonId) -> Option<&str> {
        None
    }
}

/// Name lookup over a finished result when the session is gone.
pub fn directory_from_names<'a>(
    names: impl IntoIterator<Item = (PersonId, &'a str)>,
) -> HashMap<PersonId, String> {
    names
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use warikan_domain::Summary;

    fn share(id: u64, paid: i64, fair_share: i64) -> PersonShare {
        PersonShare {
            id: PersonId(id),
            paid: Money::from_i64(paid),
            fair_share: Money::from_i64(fair_share),
            balance: Money::from_i64(paid - fair_share),
        }
    }

    #[fixture]
    fn directory() -> HashMap<PersonId, String> {
        directory_from_names([(PersonId(1), "Alice"), (PersonId(2), "Bob")])
    }

    #[fixture]
    fn owed_result() -> CalculationResult {
        CalculationResult {
            total_amount: Money::from_i64(3000),
            per_person_amount: Money::from_i64(1500),
            shares: vec![share(1, 3000, 1500), share(2, 0, 1500)],
            transactions: vec![Transfer {
                from: PersonId(2),
                to: PersonId(1),
                amount: Money::from_i64(1500),
            }],
            summary: Summary {
                difference: Money::ZERO,
                remainder_holder: None,
                outcome: SettlementOutcome::PaymentsNeeded { count: 1 },
            },
        }
    }

    #[rstest]
    fn render_uses_member_names(
        owed_result: CalculationResult,
        directory: HashMap<PersonId, String>,
    ) {
        let view = SettlementPresenter::render_with_members(&owed_result, &directory);

        assert!(view.share_table.contains("Alice"));
        assert!(view.share_table.contains("+1500"));
        assert!(view.share_table.contains("-1500"));
        let transfers = view.transfer_table.expect("one transfer to show");
        assert!(transfers.contains("| Bob"));
        assert!(transfers.contains("1500 |"));
        assert!(view.summary.contains("¥3000"));
        assert!(view.summary.contains(&i18n::payments_needed(1)));
    }

    #[rstest]
    fn settled_result_has_no_transfer_table(mut owed_result: CalculationResult) {
        owed_result.shares = vec![share(1, 1500, 1500), share(2, 1500, 1500)];
        owed_result.transactions.clear();
        owed_result.summary.outcome = SettlementOutcome::AlreadySettled;

        let view = SettlementPresenter::render(&owed_result);

        assert!(view.transfer_table.is_none());
        assert!(view.summary.contains(i18n::NO_PAYMENTS_NEEDED));
    }

    #[rstest]
    fn summary_names_the_remainder_holder(
        mut owed_result: CalculationResult,
        directory: HashMap<PersonId, String>,
    ) {
        owed_result.summary.difference = Money::from_i64(150);
        owed_result.summary.remainder_holder = Some(PersonId(1));

        let summary = SettlementPresenter::build_summary(&owed_result, &directory);

        assert!(summary.contains("+150"));
        assert!(summary.contains(&i18n::remainder_holder("Alice")));
    }

    #[rstest]
    #[case::known(1, "Alice")]
    #[case::unknown(9, "#9")]
    fn member_label_falls_back_to_id(
        directory: HashMap<PersonId, String>,
        #[case] id: u64,
        #[case] expected: &str,
    ) {
        let label = format_member_label(PersonId(id), &directory);
        assert!(label.contains(expected));
    }

    #[rstest]
    fn blank_names_fall_back_to_unknown() {
        let directory = directory_from_names([(PersonId(1), "  ")]);
        let label = format_member_label(PersonId(1), &directory);
        assert!(label.starts_with(i18n::UNKNOWN_MEMBER));
    }

    #[rstest]
    fn payment_links_keep_the_raw_url(
        owed_result: CalculationResult,
        directory: HashMap<PersonId, String>,
    ) {
        let instructions = [PaymentInstruction {
            transfer: owed_result.transactions[0],
            link: "paypay://payment?amount=1500&note=x".to_string(),
        }];

        let rendered = SettlementPresenter::build_payment_links(&instructions, &directory);

        assert_eq!(
            rendered,
            "Bob → Alice (¥1500): paypay://payment?amount=1500&note=x"
        );
    }
}
