use rust_decimal::Decimal;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(pub u64);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Integer currency units (e.g. yen).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn signum(self) -> i64 {
        self.0.signum()
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A participant of a split. Names are display labels only and may repeat.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub paid: Money,
    pub ratio: Decimal,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            paid: Money::ZERO,
            ratio: Decimal::ONE,
        }
    }

    pub fn with_paid(mut self, paid: Money) -> Self {
        self.paid = paid;
        self
    }

    pub fn with_ratio(mut self, ratio: Decimal) -> Self {
        self.ratio = ratio;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RoundingUnit {
    #[default]
    One,
    Ten,
    Hundred,
    Thousand,
}

impl RoundingUnit {
    pub const ALL: [RoundingUnit; 4] = [Self::One, Self::Ten, Self::Hundred, Self::Thousand];

    pub fn amount(self) -> i64 {
        match self {
            Self::One => 1,
            Self::Ten => 10,
            Self::Hundred => 100,
            Self::Thousand => 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rounding unit must be one of 1, 10, 100 or 1000 (got {0})")]
pub struct InvalidRoundingUnit(pub i64);

impl TryFrom<i64> for RoundingUnit {
    type Error = InvalidRoundingUnit;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.amount() == value)
            .ok_or(InvalidRoundingUnit(value))
    }
}

impl fmt::Display for RoundingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonShare {
    pub id: PersonId,
    pub paid: Money,
    pub fair_share: Money,
    /// `paid - fair_share`; positive means the person is owed money.
    pub balance: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: PersonId,
    pub to: PersonId,
    pub amount: Money,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// Everyone already paid their share; no transfer is needed.
    AlreadySettled,
    PaymentsNeeded { count: usize },
}

impl SettlementOutcome {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::AlreadySettled)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Sum of rounded shares minus the total, before the remainder was assigned.
    pub difference: Money,
    pub remainder_holder: Option<PersonId>,
    pub outcome: SettlementOutcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationResult {
    pub total_amount: Money,
    pub per_person_amount: Money,
    pub shares: Vec<PersonShare>,
    pub transactions: Vec<Transfer>,
    pub summary: Summary,
}

impl CalculationResult {
    pub fn share_of(&self, id: PersonId) -> Option<&PersonShare> {
        self.shares.iter().find(|share| share.id == id)
    }

    pub fn is_settled(&self) -> bool {
        self.summary.outcome.is_settled()
    }
}
