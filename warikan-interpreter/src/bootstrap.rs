use std::env;
use tracing_subscriber::EnvFilter;
use warikan_application::{SessionConfig, SessionError};
use warikan_domain::{AllocationContext, InvalidRoundingUnit, RoundingMode, RoundingUnit};
use warikan_parser::RoundingSetting;

pub const DEFAULT_PEOPLE_VAR: &str = "WARIKAN_DEFAULT_PEOPLE";
pub const ROUNDING_UNIT_VAR: &str = "WARIKAN_ROUNDING_UNIT";
pub const ROUNDING_MODE_VAR: &str = "WARIKAN_ROUNDING_MODE";
pub const WALLET_SCHEME_VAR: &str = "WARIKAN_WALLET_SCHEME";

const DEFAULT_WALLET_SCHEME: &str = "paypay";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an integer (got '{value}')")]
    NotANumber { var: &'static str, value: String },
    #[error(transparent)]
    RoundingUnit(#[from] InvalidRoundingUnit),
    #[error("WARIKAN_ROUNDING_MODE must be half-up, half-even, up or down (got '{0}')")]
    RoundingMode(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Settings shared by every run, before the roster file is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub wallet_scheme: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_people = match lookup(DEFAULT_PEOPLE_VAR) {
            Some(value) => parse_number(DEFAULT_PEOPLE_VAR, &value)?,
            None => SessionConfig::default().default_person_count(),
        };

        let unit = match lookup(ROUNDING_UNIT_VAR) {
            Some(value) => RoundingUnit::try_from(parse_number::<i64>(ROUNDING_UNIT_VAR, &value)?)?,
            None => RoundingUnit::default(),
        };

        let rounding_mode = match lookup(ROUNDING_MODE_VAR) {
            Some(value) => {
                parse_rounding_mode(&value).ok_or_else(|| ConfigError::RoundingMode(value))?
            }
            None => RoundingMode::default(),
        };

        let context = AllocationContext::yen_default()
            .with_unit(unit)
            .with_rounding_mode(rounding_mode);

        let wallet_scheme = lookup(WALLET_SCHEME_VAR)
            .map(|scheme| scheme.trim().to_string())
            .unwrap_or_else(|| DEFAULT_WALLET_SCHEME.to_string());

        Ok(Self {
            session: SessionConfig::new(default_people, context)?,
            wallet_scheme,
        })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: value.to_string(),
    })
}

pub fn parse_rounding_mode(value: &str) -> Option<RoundingMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "half-up" => Some(RoundingMode::HalfUp),
        "half-even" => Some(RoundingMode::HalfEven),
        "up" => Some(RoundingMode::Up),
        "down" => Some(RoundingMode::Down),
        _ => None,
    }
}

pub fn rounding_mode_from_setting(setting: RoundingSetting) -> RoundingMode {
    match setting {
        RoundingSetting::HalfUp => RoundingMode::HalfUp,
        RoundingSetting::HalfEven => RoundingMode::HalfEven,
        RoundingSetting::Up => RoundingMode::Up,
        RoundingSetting::Down => RoundingMode::Down,
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
