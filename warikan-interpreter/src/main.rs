mod bootstrap;

use bootstrap::{AppConfig, rounding_mode_from_setting};
use rust_decimal::Decimal;
use std::{borrow::Cow, env, fs, process};
use warikan_application::{MemberDirectory, SessionConfig, SplitProcessor, SplitSession};
use warikan_domain::{Money, PersonId, RoundingUnit};
use warikan_i18n as i18n;
use warikan_infrastructure::WalletPaymentLinkBuilder;
use warikan_parser::{ParseError, Roster, parse_roster};
use warikan_presentation::{SettlementPresenter, format_session_error, format_split_error};

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    bootstrap::init_logging();

    let Some(path) = env::args().nth(1) else {
        return Err("Usage: warikan <roster-file>".into());
    };

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let roster = parse_roster(&source).map_err(|err| match err {
        ParseError::SyntaxError { line, detail } => i18n::syntax_error(line, detail).to_string(),
    })?;

    let session = session_from_roster(&config.session, &roster)?;
    tracing::debug!(
        path = %path,
        member_count = session.len(),
        unit = %session.context().unit,
        "Roster loaded"
    );

    let link_builder =
        WalletPaymentLinkBuilder::new(config.wallet_scheme).map_err(|err| err.to_string())?;
    let processor = SplitProcessor::new(&link_builder);

    let output = render(&processor, &session)?;
    println!("{output}");

    Ok(())
}

/// The file's people replace the default roster; its settings override `base`.
fn session_from_roster(base: &SessionConfig, roster: &Roster<'_>) -> CliResult<SplitSession> {
    let mut context = base.context;
    if let Some(unit) = roster.unit() {
        let unit = i64::try_from(unit)
            .ok()
            .and_then(|unit| RoundingUnit::try_from(unit).ok())
            .ok_or_else(|| format!("Unsupported rounding unit {unit}"))?;
        context = context.with_unit(unit);
    }
    if let Some(rounding) = roster.rounding() {
        context = context.with_rounding_mode(rounding_mode_from_setting(rounding));
    }

    let rows = roster
        .people()
        .map(|entry| {
            let paid = i64::try_from(entry.paid)
                .map(Money::from_i64)
                .map_err(|_| i18n::AMOUNT_OVERFLOW.to_string())?;
            let ratio = match entry.ratio {
                Some(ratio) => ratio
                    .parse::<Decimal>()
                    .map_err(|err| format!("Invalid ratio '{ratio}' for {}: {err}", entry.name))?,
                None => Decimal::ONE,
            };
            Ok((entry.name, paid, ratio))
        })
        .collect::<Result<Vec<_>, String>>()?;

    let config = SessionConfig::new(base.default_person_count(), context)
        .map_err(|err| format_session_error(&err))?;

    SplitSession::with_people(config, i18n::default_person_label, rows)
        .map_err(|err| format_session_error(&err).into())
}

fn render(processor: &SplitProcessor<'_>, session: &SplitSession) -> CliResult<String> {
    let result = processor
        .calculate(session)
        .map_err(|err| format_split_error(&err, session))?;

    let view = SettlementPresenter::render_with_members(&result, session);
    let mut sections = vec![view.summary, view.share_table];

    if let Some(transfer_table) = view.transfer_table {
        sections.push(transfer_table);

        let name = |id: PersonId| session.display_name(id).unwrap_or(i18n::UNKNOWN_MEMBER);
        let instructions = processor
            .payment_instructions(&result, |transfer| {
                i18n::payment_note(name(transfer.from), name(transfer.to))
            })
            .map_err(|err| format_split_error(&err, session))?;
        sections.push(SettlementPresenter::build_payment_links(
            &instructions,
            session,
        ));
    }

    Ok(sections.join("\n\n"))
}
