#![warn(clippy::uninlined_format_args)]

mod i18n;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, digit1, multispace1, u64},
    combinator::{opt, recognize},
    multi::many0,
    sequence::delimited,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingSetting {
    HalfUp,
    HalfEven,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Unit(u64),
    Rounding(RoundingSetting),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonEntry<'a> {
    pub name: &'a str,
    pub paid: u64,
    /// Decimal literal such as `1.5`; `None` means the default weight.
    pub ratio: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    Setting(Setting),
    Person(PersonEntry<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementWithLine<'a> {
    pub line: usize,
    pub statement: Statement<'a>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster<'a> {
    pub statements: Vec<StatementWithLine<'a>>,
}

impl<'a> Roster<'a> {
    pub fn people(&self) -> impl Iterator<Item = &PersonEntry<'a>> + '_ {
        self.statements.iter().filter_map(|stmt| match &stmt.statement {
            Statement::Person(entry) => Some(entry),
            Statement::Setting(_) => None,
        })
    }

    /// Last `unit := …` in the file, if any.
    pub fn unit(&self) -> Option<u64> {
        self.settings().fold(None, |acc, setting| match setting {
            Setting::Unit(unit) => Some(unit),
            Setting::Rounding(_) => acc,
        })
    }

    /// Last `rounding := …` in the file, if any.
    pub fn rounding(&self) -> Option<RoundingSetting> {
        self.settings().fold(None, |acc, setting| match setting {
            Setting::Rounding(mode) => Some(mode),
            Setting::Unit(_) => acc,
        })
    }

    fn settings(&self) -> impl Iterator<Item = Setting> + '_ {
        self.statements.iter().filter_map(|stmt| match stmt.statement {
            Statement::Setting(setting) => Some(setting),
            Statement::Person(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at line {line}: {detail}")]
    SyntaxError { line: usize, detail: String },
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || is_japanese_char(c))(input)
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' | // Hiragana
        '\u{30A0}'..='\u{30FF}' | // Katakana
        '\u{4E00}'..='\u{9FFF}' | // Kanji
        '\u{3400}'..='\u{4DBF}'   // Kanji extension
    )
}

fn sp(input: &str) -> IResult<&str, &str> {
    fn fullwidth_space(input: &str) -> IResult<&str, &str> {
        take_while1(|c: char| c == '\u{3000}')(input)
    }

    fn comment(input: &str) -> IResult<&str, &str> {
        delimited(tag("/*"), take_until("*/"), tag("*/")).parse(input)
    }

    fn line_comment(input: &str) -> IResult<&str, &str> {
        recognize((tag("//"), take_till(|c| c == '\n'))).parse(input)
    }

    recognize(many0(alt((
        multispace1,
        fullwidth_space,
        comment,
        line_comment,
    ))))
    .parse(input)
}

fn assign(input: &str) -> IResult<&str, &str> {
    (sp, tag(":="), sp).map(|(_, op, _)| op).parse(input)
}

fn yen(input: &str) -> IResult<&str, u64> {
    (
        opt(alt((char('¥'), char('￥')))),
        u64,
        opt(alt((tag("円"), tag("えん"), tag_no_case("yen")))),
    )
        .map(|(_, amount, _)| amount)
        .parse(input)
}

fn decimal(input: &str) -> IResult<&str, &str> {
    recognize((digit1, opt((char('.'), digit1)))).parse(input)
}

fn ratio(input: &str) -> IResult<&str, &str> {
    (alt((char('x'), char('X'), char('×'), char('*'))), sp, decimal)
        .map(|(_, _, value)| value)
        .parse(input)
}

fn paid(input: &str) -> IResult<&str, &str> {
    alt((tag_no_case("paid"), tag("支払い"), tag("払った"))).parse(input)
}

fn rounding_setting(input: &str) -> IResult<&str, RoundingSetting> {
    alt((
        alt((tag_no_case("half-up"), tag("四捨五入"))).map(|_| RoundingSetting::HalfUp),
        alt((tag_no_case("half-even"), tag("偶数丸め"))).map(|_| RoundingSetting::HalfEven),
        alt((tag_no_case("up"), tag("切り上げ"))).map(|_| RoundingSetting::Up),
        alt((tag_no_case("down"), tag("切り捨て"))).map(|_| RoundingSetting::Down),
    ))
    .parse(input)
}

// unit := 100 / rounding := half-up
fn setting(input: &str) -> IResult<&str, Setting> {
    alt((
        (alt((tag_no_case("unit"), tag("端数"))), assign, u64)
            .map(|(_, _, unit)| Setting::Unit(unit)),
        (alt((tag_no_case("rounding"), tag("丸め"))), assign, rounding_setting)
            .map(|(_, _, mode)| Setting::Rounding(mode)),
    ))
    .parse(input)
}

// {name} [paid] {amount} [x {ratio}]
fn person(input: &str) -> IResult<&str, PersonEntry<'_>> {
    (
        identifier,
        sp,
        opt((paid, sp)),
        yen,
        opt((sp, ratio).map(|(_, value)| value)),
    )
        .map(|(name, _, _, paid, ratio)| PersonEntry { name, paid, ratio })
        .parse(input)
}

fn statement(input: &str) -> IResult<&str, Statement<'_>> {
    alt((setting.map(Statement::Setting), person.map(Statement::Person))).parse(input)
}

fn statement_with_sp(input: &str) -> IResult<&str, Statement<'_>> {
    (sp, statement, sp).map(|(_, stmt, _)| stmt).parse(input)
}

/// Parses a roster file, one statement per line.
pub fn parse_roster(input: &str) -> Result<Roster<'_>, ParseError> {
    let mut statements = Vec::new();

    for (idx, line) in input.lines().enumerate() {
        let (rest, _) = sp(line).map_err(|e| ParseError::SyntaxError {
            line: idx + 1,
            detail: i18n::syntax_error_detail(e),
        })?;
        if rest.trim().is_empty() {
            continue;
        }
        match statement_with_sp(rest) {
            Ok((rest, stmt)) => {
                if !rest.trim().is_empty() {
                    return Err(ParseError::SyntaxError {
                        line: idx + 1,
                        detail: i18n::syntax_error_unparsed_detail(rest.trim()),
                    });
                }
                statements.push(StatementWithLine {
                    line: idx + 1,
                    statement: stmt,
                });
            }
            Err(e) => {
                return Err(ParseError::SyntaxError {
                    line: idx + 1,
                    detail: i18n::syntax_error_detail(e),
                });
            }
        }
    }

    Ok(Roster { statements })
}
