use proptest::prelude::*;
use warikan_application::{MAX_PEOPLE, MIN_PEOPLE, SessionConfig, SplitSession};
use warikan_domain::PersonId;

#[derive(Debug, Clone)]
enum Edit {
    Add,
    Remove(usize),
    Reset,
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        6 => Just(Edit::Add),
        3 => (0usize..MAX_PEOPLE).prop_map(Edit::Remove),
        1 => Just(Edit::Reset),
    ]
}

fn label(n: usize) -> String {
    format!("Person {n}")
}

proptest! {
    #[test]
    fn roster_size_stays_within_bounds(edits in prop::collection::vec(edit(), 0..200)) {
        let mut session = SplitSession::new(SessionConfig::default(), label);

        for edit in edits {
            match edit {
                Edit::Add => {
                    let before = session.len();
                    let added = session.add_default_person();
                    prop_assert_eq!(added.is_ok(), before < MAX_PEOPLE);
                }
                Edit::Remove(idx) => {
                    let before = session.len();
                    let target = session.people().nth(idx % before).map(|p| p.id);
                    if let Some(id) = target {
                        let removed = session.remove_person(id);
                        prop_assert_eq!(removed.is_ok(), before > MIN_PEOPLE);
                    }
                }
                Edit::Reset => session.reset(),
            }

            prop_assert!((MIN_PEOPLE..=MAX_PEOPLE).contains(&session.len()));
        }
    }

    #[test]
    fn ids_are_unique_and_in_insertion_order(adds in 0usize..40) {
        let mut session = SplitSession::new(SessionConfig::default(), label);
        for _ in 0..adds {
            session.add_default_person().expect("below capacity");
        }

        let ids: Vec<PersonId> = session.people().map(|p| p.id).collect();
        prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
