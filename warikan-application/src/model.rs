use crate::error::SessionError;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use warikan_domain::{AllocationContext, Money, Person, PersonId, Transfer};

pub const MIN_PEOPLE: usize = 2;
pub const MAX_PEOPLE: usize = 50;

/// Produces the display name of the n-th (1-based) default participant.
pub type DefaultLabel = fn(usize) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    default_person_count: usize,
    pub context: AllocationContext,
}

impl SessionConfig {
    pub fn new(
        default_person_count: usize,
        context: AllocationContext,
    ) -> Result<Self, SessionError> {
        if !(MIN_PEOPLE..=MAX_PEOPLE).contains(&default_person_count) {
            return Err(SessionError::InvalidDefaultCount {
                count: default_person_count,
                min: MIN_PEOPLE,
                max: MAX_PEOPLE,
            });
        }
        Ok(Self {
            default_person_count,
            context,
        })
    }

    pub fn default_person_count(&self) -> usize {
        self.default_person_count
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_person_count: MIN_PEOPLE,
            context: AllocationContext::yen_default(),
        }
    }
}

/// In-memory roster of one split. Insertion order is the calculation order.
#[derive(Debug, Clone)]
pub struct SplitSession {
    config: SessionConfig,
    label: DefaultLabel,
    people: IndexMap<PersonId, Person>,
    context: AllocationContext,
    next_id: u64,
}

impl SplitSession {
    pub fn new(config: SessionConfig, label: DefaultLabel) -> Self {
        let mut session = Self {
            config,
            label,
            people: IndexMap::with_capacity(MAX_PEOPLE),
            context: config.context,
            next_id: 1,
        };
        session.fill_defaults();
        session
    }

    /// Starts a session from explicit `(name, paid, ratio)` rows instead of
    /// the default roster.
    pub fn with_people<I, S>(
        config: SessionConfig,
        label: DefaultLabel,
        rows: I,
    ) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = (S, Money, Decimal)>,
        S: Into<String>,
    {
        let mut session = Self {
            config,
            label,
            people: IndexMap::with_capacity(MAX_PEOPLE),
            context: config.context,
            next_id: 1,
        };
        for (name, paid, ratio) in rows {
            let id = session.add_person(name)?;
            session.set_paid(id, paid)?;
            session.set_ratio(id, ratio)?;
        }
        if session.people.len() < MIN_PEOPLE {
            return Err(SessionError::TooFewPeople { min: MIN_PEOPLE });
        }
        Ok(session)
    }

    fn fill_defaults(&mut self) {
        for n in 1..=self.config.default_person_count {
            let id = self.allocate_id();
            self.people.insert(id, Person::new(id, (self.label)(n)));
        }
    }

    fn allocate_id(&mut self) -> PersonId {
        let id = PersonId(self.next_id);
        self.next_id += 1;
        id
    }

    fn person_mut(&mut self, id: PersonId) -> Result<&mut Person, SessionError> {
        self.people
            .get_mut(&id)
            .ok_or(SessionError::UnknownPerson(id))
    }

    pub fn add_person(&mut self, name: impl Into<String>) -> Result<PersonId, SessionError> {
        if self.people.len() >= MAX_PEOPLE {
            return Err(SessionError::TooManyPeople { max: MAX_PEOPLE });
        }
        let id = self.allocate_id();
        self.people.insert(id, Person::new(id, name));
        Ok(id)
    }

    /// Adds a person with the next default label.
    pub fn add_default_person(&mut self) -> Result<PersonId, SessionError> {
        let name = (self.label)(self.people.len() + 1);
        self.add_person(name)
    }

    pub fn remove_person(&mut self, id: PersonId) -> Result<Person, SessionError> {
        if !self.people.contains_key(&id) {
            return Err(SessionError::UnknownPerson(id));
        }
        if self.people.len() <= MIN_PEOPLE {
            return Err(SessionError::TooFewPeople { min: MIN_PEOPLE });
        }
        self.people
            .shift_remove(&id)
            .ok_or(SessionError::UnknownPerson(id))
    }

    pub fn set_name(&mut self, id: PersonId, name: impl Into<String>) -> Result<(), SessionError> {
        self.person_mut(id)?.name = name.into();
        Ok(())
    }

    /// Stores the value as given; the calculator validates it.
    pub fn set_paid(&mut self, id: PersonId, paid: Money) -> Result<(), SessionError> {
        self.person_mut(id)?.paid = paid;
        Ok(())
    }

    /// Stores the value as given; the calculator validates it.
    pub fn set_ratio(&mut self, id: PersonId, ratio: Decimal) -> Result<(), SessionError> {
        self.person_mut(id)?.ratio = ratio;
        Ok(())
    }

    /// Drops every edit and restores the initial roster.
    pub fn reset(&mut self) {
        self.people.clear();
        self.next_id = 1;
        self.context = self.config.context;
        self.fill_defaults();
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.values()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn context(&self) -> AllocationContext {
        self.context
    }

    pub fn set_context(&mut self, context: AllocationContext) {
        self.context = context;
    }
}

/// A settlement transfer paired with the deep link the debtor opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstruction {
    pub transfer: Transfer,
    pub link: String,
}
