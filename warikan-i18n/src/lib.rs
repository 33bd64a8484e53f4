#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const PAID: &str = "支払額";
    pub const FAIR_SHARE: &str = "負担額";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const LINK: &str = "送金リンク";
    pub const TOTAL: &str = "合計";
    pub const PER_PERSON: &str = "1人あたり";
    pub const DIFFERENCE: &str = "端数";
    pub const NO_PAYMENTS_NEEDED: &str = "精算は不要です。全員が負担額どおりに支払っています。";
    pub const DEFAULT_PAYMENT_NOTE: &str = "割り勘";
    pub const UNKNOWN_MEMBER: &str = "不明";
    pub const EMPTY_ROSTER: &str = "メンバーを1人以上入力してください。";
    pub const ZERO_WEIGHT_SUM: &str = "比率の合計が0です。正の比率を入力してください。";
    pub const AMOUNT_OVERFLOW: &str = "金額が大きすぎます。";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const PAID: &str = "Paid";
    pub const FAIR_SHARE: &str = "Share";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const LINK: &str = "Payment link";
    pub const TOTAL: &str = "Total";
    pub const PER_PERSON: &str = "Per person";
    pub const DIFFERENCE: &str = "Rounding difference";
    pub const NO_PAYMENTS_NEEDED: &str = "No payments needed. Everyone paid their share.";
    pub const DEFAULT_PAYMENT_NOTE: &str = "Bill split";
    pub const UNKNOWN_MEMBER: &str = "Unknown";
    pub const EMPTY_ROSTER: &str = "Enter at least one member.";
    pub const ZERO_WEIGHT_SUM: &str = "The ratios add up to zero. Enter positive ratios.";
    pub const AMOUNT_OVERFLOW: &str = "The amount is too large.";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn default_person_label(n: usize) -> String {
    format!("{n}人目")
}

#[cfg(feature = "ja")]
pub fn negative_paid(name: impl std::fmt::Display) -> String {
    format!("{name} の支払額がマイナスです")
}

#[cfg(feature = "ja")]
pub fn non_positive_ratio(name: impl std::fmt::Display) -> String {
    format!("{name} の比率は0より大きくしてください")
}

#[cfg(feature = "ja")]
pub fn too_many_people(max: usize) -> String {
    format!("メンバーは最大{max}人までです")
}

#[cfg(feature = "ja")]
pub fn too_few_people(min: usize) -> String {
    format!("メンバーは最低{min}人必要です")
}

#[cfg(feature = "ja")]
pub fn payment_note(from: impl std::fmt::Display, to: impl std::fmt::Display) -> String {
    format!("{DEFAULT_PAYMENT_NOTE} {from}→{to}")
}

#[cfg(feature = "ja")]
pub fn payments_needed(count: usize) -> String {
    format!("{count}件の送金で精算できます")
}

#[cfg(feature = "ja")]
pub fn unbalanced_balances(net: impl std::fmt::Display) -> String {
    format!("収支の合計が0になりません (差額 {net})")
}

#[cfg(feature = "ja")]
pub fn remainder_holder(name: impl std::fmt::Display) -> String {
    format!("端数は{name}が負担します")
}

#[cfg(not(feature = "ja"))]
pub fn default_person_label(n: usize) -> String {
    format!("Person {n}")
}

#[cfg(not(feature = "ja"))]
pub fn negative_paid(name: impl std::fmt::Display) -> String {
    format!("{name} has a negative paid amount")
}

#[cfg(not(feature = "ja"))]
pub fn non_positive_ratio(name: impl std::fmt::Display) -> String {
    format!("The ratio of {name} must be greater than zero")
}

#[cfg(not(feature = "ja"))]
pub fn too_many_people(max: usize) -> String {
    format!("A split can have at most {max} members")
}

#[cfg(not(feature = "ja"))]
pub fn too_few_people(min: usize) -> String {
    format!("A split needs at least {min} members")
}

#[cfg(not(feature = "ja"))]
pub fn payment_note(from: impl std::fmt::Display, to: impl std::fmt::Display) -> String {
    format!("{DEFAULT_PAYMENT_NOTE}: {from} to {to}")
}

#[cfg(not(feature = "ja"))]
pub fn payments_needed(count: usize) -> String {
    if count == 1 {
        "Settled with 1 payment".to_string()
    } else {
        format!("Settled with {count} payments")
    }
}

#[cfg(not(feature = "ja"))]
pub fn unbalanced_balances(net: impl std::fmt::Display) -> String {
    format!("The balances do not add up to zero (off by {net})")
}

#[cfg(not(feature = "ja"))]
pub fn remainder_holder(name: impl std::fmt::Display) -> String {
    format!("{name} absorbs the rounding difference")
}

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}
