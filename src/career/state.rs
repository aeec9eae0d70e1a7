//! Career state tracking for a single simulation run

use chrono::{Datelike, NaiveDate};

use super::engine::CareerConfig;
use crate::cpc::CpcMatrixSet;
use crate::error::ConfigError;
use crate::reference::{CpcLabel, Level};

/// DA added every January and July
pub const DA_STEP: f64 = 0.03;

/// Mutable pay state, owned by the simulator for the duration of a run
#[derive(Debug, Clone)]
pub struct CareerState {
    /// First day of the month being simulated
    pub period: NaiveDate,

    pub level: Level,

    /// 1-based pay position (cell) within the level
    pub position: u32,

    /// Index of the active commission in the matrix set
    pub cycle_index: usize,

    pub cpc: CpcLabel,

    /// Half-yearly DA instalments since the last commission switch
    pub da_steps: u32,

    pub basic_pay: f64,

    pub nps_corpus: f64,
}

impl CareerState {
    /// State on the joining date, under the commission in force at joining
    pub fn at_joining(config: &CareerConfig, cycles: &CpcMatrixSet) -> Result<Self, ConfigError> {
        let joining = config.joining_date;
        let cycle_index = cycles
            .schedule()
            .active_at_joining(joining.year(), joining.month());

        if !cycles.base().contains_level(&config.initial_level) {
            return Err(ConfigError::UnknownLevel(config.initial_level.clone()));
        }

        let generated = cycles.cycle(cycle_index);

        let basic_pay = generated
            .matrix
            .basic_pay(&config.initial_level, config.initial_position)
            .ok_or_else(|| ConfigError::MissingInitialPay {
                level: config.initial_level.clone(),
                position: config.initial_position,
                cpc: generated.cycle.label,
            })?;

        Ok(Self {
            period: first_of_month(joining),
            level: config.initial_level.clone(),
            position: config.initial_position,
            cycle_index,
            cpc: generated.cycle.label,
            da_steps: 0,
            basic_pay,
            nps_corpus: 0.0,
        })
    }

    /// DA as a fraction of basic pay
    pub fn da_rate(&self) -> f64 {
        self.da_steps as f64 * DA_STEP
    }

    /// Move to the following calendar month
    pub fn advance_month(&mut self) {
        self.period = add_months(self.period, 1);
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Whole calendar months from `from` to `to`, ignoring days
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let from = from.year() as i64 * 12 + from.month0() as i64;
    let to = to.year() as i64 * 12 + to.month0() as i64;
    to - from
}

/// First day of the month `months` after the month of `date`
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(chrono::Months::new(months))
        .unwrap_or(date)
}
