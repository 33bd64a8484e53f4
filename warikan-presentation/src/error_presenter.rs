use crate::settlement_presenter::format_member_label;
use warikan_application::{MemberDirectory, SessionError, SplitError};
use warikan_domain::ValidationError;
use warikan_i18n as i18n;

pub fn format_split_error(error: &SplitError, member_directory: &dyn MemberDirectory) -> String {
    match error {
        SplitError::Validation(error) => format_validation_error(error, member_directory),
        SplitError::Session(error) => format_session_error(error),
        SplitError::PaymentLink(error) => error.to_string(),
    }
}

pub fn format_validation_error(
    error: &ValidationError,
    member_directory: &dyn MemberDirectory,
) -> String {
    match error {
        ValidationError::EmptyRoster => i18n::EMPTY_ROSTER.to_string(),
        ValidationError::NegativePaid { id, .. } => {
            i18n::negative_paid(format_member_label(*id, member_directory))
        }
        ValidationError::NonPositiveRatio { id, .. } => {
            i18n::non_positive_ratio(format_member_label(*id, member_directory))
        }
        ValidationError::ZeroWeightSum => i18n::ZERO_WEIGHT_SUM.to_string(),
        ValidationError::AmountOverflow => i18n::AMOUNT_OVERFLOW.to_string(),
        ValidationError::UnbalancedBalances { net } => i18n::unbalanced_balances(net.amount()),
    }
}

pub fn format_session_error(error: &SessionError) -> String {
    match error {
        SessionError::TooManyPeople { max } => i18n::too_many_people(*max),
        SessionError::TooFewPeople { min } => i18n::too_few_people(*min),
        SessionError::UnknownPerson(_) | SessionError::InvalidDefaultCount { .. } => {
            error.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement_presenter::directory_from_names;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use warikan_application::PaymentLinkError;
    use warikan_domain::{Money, PersonId};

    #[rstest]
    #[case::negative_paid(
        ValidationError::NegativePaid { id: PersonId(1), amount: Money::from_i64(-5) },
        i18n::negative_paid("Alice")
    )]
    #[case::non_positive_ratio(
        ValidationError::NonPositiveRatio { id: PersonId(1), ratio: Decimal::ZERO },
        i18n::non_positive_ratio("Alice")
    )]
    #[case::empty(ValidationError::EmptyRoster, i18n::EMPTY_ROSTER.to_string())]
    #[case::zero_weight(ValidationError::ZeroWeightSum, i18n::ZERO_WEIGHT_SUM.to_string())]
    #[case::unbalanced(
        ValidationError::UnbalancedBalances { net: Money::from_i64(60) },
        i18n::unbalanced_balances(60)
    )]
    fn validation_errors_name_the_person(
        #[case] error: ValidationError,
        #[case] expected: String,
    ) {
        let directory = directory_from_names([(PersonId(1), "Alice")]);
        let message = format_split_error(&SplitError::from(error), &directory);
        assert_eq!(message, expected);
    }

    #[rstest]
    #[case::too_many(SessionError::TooManyPeople { max: 50 }, i18n::too_many_people(50))]
    #[case::too_few(SessionError::TooFewPeople { min: 2 }, i18n::too_few_people(2))]
    fn session_errors_use_localized_text(#[case] error: SessionError, #[case] expected: String) {
        assert_eq!(format_session_error(&error), expected);
    }

    #[test]
    fn unknown_person_keeps_the_id() {
        let message = format_session_error(&SessionError::UnknownPerson(PersonId(7)));
        assert!(message.contains("#7"));
    }

    #[test]
    fn link_errors_keep_their_message() {
        let error = SplitError::from(PaymentLinkError::InvalidScheme("1bad".to_string()));
        let message = format_split_error(&error, &HashMap::<PersonId, String>::new());
        assert!(message.contains("1bad"));
    }
}
