//! Error types for reference data loading, configuration and simulation runs

use crate::reference::{CpcLabel, Level};
use thiserror::Error;

/// Failures while loading or validating the pay matrix and DA table
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid DA effective date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("DA rate {rate} effective {date} is negative")]
    NegativeDaRate { date: chrono::NaiveDate, rate: f64 },

    #[error("pay matrix has no rows")]
    EmptyMatrix,

    #[error("position 0 at level {level} (positions are 1-based)")]
    ZeroPosition { level: Level },

    #[error("duplicate entry for level {level}, position {position}")]
    DuplicatePosition { level: Level, position: u32 },

    #[error("positions for level {level} are not contiguous: expected {expected}, found {found}")]
    NonContiguousPositions { level: Level, expected: u32, found: u32 },

    #[error("basic pay decreases at level {level}, position {position}")]
    DecreasingPay { level: Level, position: u32 },
}

/// Rejected simulation inputs, reported before any month is simulated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    RetirementNotAfterCurrentAge { current_age: u32, retirement_age: u32 },

    #[error("promotion interval must be at least one year")]
    ZeroPromotionInterval,

    #[error("initial pay position must be at least 1")]
    ZeroPosition,

    #[error("life expectancy after retirement must be at least one year")]
    EmptyHorizon,

    #[error("{name} must lie in [0, 1], got {value}")]
    FractionOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be a finite non-negative number, got {value}")]
    NegativeAmount { name: &'static str, value: f64 },

    #[error("level {0} is not present in the base pay matrix")]
    UnknownLevel(Level),

    #[error("no basic pay for level {level}, position {position} in {cpc}")]
    MissingInitialPay { level: Level, position: u32, cpc: CpcLabel },

    #[error("retirement date {retirement} falls before joining date {joining}")]
    EmptyServicePeriod {
        joining: chrono::NaiveDate,
        retirement: chrono::NaiveDate,
    },

    #[error("cannot build a retirement date in year {year}")]
    InvalidRetirementDate { year: i32 },

    #[error("{name} {value} is outside the supported range 0..={max}")]
    AgeOutOfRange { name: &'static str, value: u32, max: u32 },

    #[error("life expectancy of {years} years exceeds the supported {max} years")]
    HorizonTooLong { years: u32, max: u32 },

    #[error("pay commission years must be strictly increasing, got {0:?}")]
    UnorderedCpcYears(Vec<i32>),

    #[error("too many pay commission cycles ({0})")]
    TooManyCycles(usize),
}

/// Failures while reading a simulation inputs file
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read inputs: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed inputs JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any failure a caller can see from a full run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),
}
