//! Simulation inputs as supplied by the caller

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::career::{CareerConfig, IncrementMonth};
use crate::cpc::{CpcSchedule, DEFAULT_CPC_YEARS};
use crate::error::{ConfigError, InputError};
use crate::pension::PensionParams;
use crate::reference::{Level, PayMatrix};
use crate::swp::SwpParams;

/// All user-facing inputs of a run; rates and shares are fractions (0.08 = 8%)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInputs {
    #[serde(default = "default_joining_date")]
    pub joining_date: NaiveDate,

    #[serde(default = "default_current_age")]
    pub current_age: u32,

    #[serde(default = "default_retirement_age")]
    pub retirement_age: u32,

    /// Pay level at joining (default: lowest level of the base matrix)
    #[serde(default)]
    pub initial_level: Option<Level>,

    #[serde(default = "default_one")]
    pub initial_position: u32,

    #[serde(default = "default_increment_month")]
    pub increment_month: IncrementMonth,

    #[serde(default = "default_promotion_interval")]
    pub promotion_interval_years: u32,

    /// Fitment increase granted by each future pay commission
    #[serde(default = "default_pay_commission_increase")]
    pub pay_commission_increase: f64,

    /// Combined NPS contribution, fraction of basic + DA
    #[serde(default = "default_nps_contribution_rate")]
    pub nps_contribution_rate: f64,

    #[serde(default = "default_nps_return")]
    pub nps_return: f64,

    /// Share of the NPS corpus converted to an annuity
    #[serde(default = "default_annuity_pct")]
    pub annuity_pct: f64,

    #[serde(default = "default_annuity_rate")]
    pub annuity_rate: f64,

    /// Annual growth of the annuity corpus after retirement
    #[serde(default)]
    pub annuity_growth_rate: f64,

    /// Years of pension to project after retirement
    #[serde(default = "default_life_expectancy_years")]
    pub life_expectancy_years: u32,

    /// Share of the lumpsum reinvested in the withdrawal plan
    #[serde(default = "default_one_f64")]
    pub swp_reinvestment_pct: f64,

    #[serde(default = "default_swp_monthly_withdrawal")]
    pub swp_monthly_withdrawal: f64,

    #[serde(default = "default_swp_return")]
    pub swp_return: f64,

    /// Years in which future pay commissions take effect
    #[serde(default = "default_cpc_years")]
    pub cpc_years: Vec<i32>,

    /// Calendar year the current age refers to (default: this year)
    #[serde(default)]
    pub as_of_year: Option<i32>,
}

fn default_joining_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 12, 13).unwrap_or_default()
}
fn default_current_age() -> u32 { 34 }
fn default_retirement_age() -> u32 { 60 }
fn default_one() -> u32 { 1 }
fn default_one_f64() -> f64 { 1.0 }
fn default_increment_month() -> IncrementMonth { IncrementMonth::January }
fn default_promotion_interval() -> u32 { 4 }
fn default_pay_commission_increase() -> f64 { 0.25 }
fn default_nps_contribution_rate() -> f64 { 0.20 }
fn default_nps_return() -> f64 { 0.08 }
fn default_annuity_pct() -> f64 { 0.60 }
fn default_annuity_rate() -> f64 { 0.06 }
fn default_life_expectancy_years() -> u32 { 20 }
fn default_swp_monthly_withdrawal() -> f64 { 25_000.0 }
fn default_swp_return() -> f64 { 0.07 }
fn default_cpc_years() -> Vec<i32> { DEFAULT_CPC_YEARS.to_vec() }

impl Default for SimulationInputs {
    fn default() -> Self {
        Self {
            joining_date: default_joining_date(),
            current_age: default_current_age(),
            retirement_age: default_retirement_age(),
            initial_level: None,
            initial_position: default_one(),
            increment_month: default_increment_month(),
            promotion_interval_years: default_promotion_interval(),
            pay_commission_increase: default_pay_commission_increase(),
            nps_contribution_rate: default_nps_contribution_rate(),
            nps_return: default_nps_return(),
            annuity_pct: default_annuity_pct(),
            annuity_rate: default_annuity_rate(),
            annuity_growth_rate: 0.0,
            life_expectancy_years: default_life_expectancy_years(),
            swp_reinvestment_pct: default_one_f64(),
            swp_monthly_withdrawal: default_swp_monthly_withdrawal(),
            swp_return: default_swp_return(),
            cpc_years: default_cpc_years(),
            as_of_year: None,
        }
    }
}

/// Oldest age accepted for the current or retirement age
pub const MAX_AGE: u32 = 120;

/// Validated, immutable configuration for one run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub as_of_year: i32,
    pub schedule: CpcSchedule,
    pub pay_commission_increase: f64,
    pub career: CareerConfig,
    pub pension: PensionParams,
    pub swp: SwpParams,
}

impl SimulationInputs {
    /// Load inputs from a JSON file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, InputError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Year the current age refers to
    pub fn resolved_as_of_year(&self) -> i32 {
        self.as_of_year.unwrap_or_else(|| Local::now().year())
    }

    /// Retirement date: the joining month and day in the year the retirement age is reached
    ///
    /// A 29 February joining date retires on 28 February in non-leap years.
    pub fn retirement_date(&self) -> Result<NaiveDate, ConfigError> {
        for (name, value) in [
            ("current age", self.current_age),
            ("retirement age", self.retirement_age),
        ] {
            if value > MAX_AGE {
                return Err(ConfigError::AgeOutOfRange { name, value, max: MAX_AGE });
            }
        }
        if self.retirement_age <= self.current_age {
            return Err(ConfigError::RetirementNotAfterCurrentAge {
                current_age: self.current_age,
                retirement_age: self.retirement_age,
            });
        }
        let as_of_year = self.resolved_as_of_year();
        let year = i32::try_from(self.retirement_age - self.current_age)
            .ok()
            .and_then(|years| as_of_year.checked_add(years))
            .ok_or(ConfigError::InvalidRetirementDate { year: as_of_year })?;
        let month = self.joining_date.month();

        NaiveDate::from_ymd_opt(year, month, self.joining_date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, month, 28))
            .ok_or(ConfigError::InvalidRetirementDate { year })
    }

    /// Validate every input against the base pay matrix and build the run plan
    pub fn validate(&self, base: &PayMatrix) -> Result<RunPlan, ConfigError> {
        let retirement_date = self.retirement_date()?;

        if !(self.pay_commission_increase >= 0.0) || !self.pay_commission_increase.is_finite() {
            return Err(ConfigError::NegativeAmount {
                name: "pay commission increase",
                value: self.pay_commission_increase,
            });
        }
        if !(0.0..=1.0).contains(&self.nps_contribution_rate) {
            return Err(ConfigError::FractionOutOfRange {
                name: "NPS contribution rate",
                value: self.nps_contribution_rate,
            });
        }

        let initial_level = match &self.initial_level {
            Some(level) if base.contains_level(level) => level.clone(),
            Some(level) => return Err(ConfigError::UnknownLevel(level.clone())),
            None => base
                .levels()
                .first()
                .cloned()
                .ok_or_else(|| ConfigError::UnknownLevel(Level::new("")))?,
        };

        let career = CareerConfig {
            joining_date: self.joining_date,
            retirement_date,
            initial_level,
            initial_position: self.initial_position,
            increment_month: self.increment_month,
            promotion_interval_years: self.promotion_interval_years,
            nps_contribution_rate: self.nps_contribution_rate,
            nps_annual_return: self.nps_return,
        };
        career.validate()?;

        let pension = PensionParams {
            annuity_pct: self.annuity_pct,
            annuity_rate: self.annuity_rate,
            annuity_growth_rate: self.annuity_growth_rate,
            horizon_years: self.life_expectancy_years,
        };
        pension.validate()?;

        let swp = SwpParams {
            reinvestment_pct: self.swp_reinvestment_pct,
            monthly_withdrawal: self.swp_monthly_withdrawal,
            annual_return: self.swp_return,
        };
        swp.validate()?;

        Ok(RunPlan {
            as_of_year: self.resolved_as_of_year(),
            schedule: CpcSchedule::new(&self.cpc_years)?,
            pay_commission_increase: self.pay_commission_increase,
            career,
            pension,
            swp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn inputs() -> SimulationInputs {
        SimulationInputs {
            as_of_year: Some(2026),
            ..Default::default()
        }
    }

    #[test]
    fn test_json_defaults_match_reference_scenario() {
        let parsed: SimulationInputs = serde_json::from_str(r#"{"as_of_year": 2026}"#).unwrap();
        assert_eq!(parsed.joining_date, NaiveDate::from_ymd_opt(2016, 12, 13).unwrap());
        assert_eq!(parsed.current_age, 34);
        assert_eq!(parsed.retirement_age, 60);
        assert_eq!(parsed.increment_month, IncrementMonth::January);
        assert_eq!(parsed.cpc_years, vec![2026, 2036, 2046, 2056]);
        assert_eq!(parsed.pay_commission_increase, 0.25);
    }

    #[test]
    fn test_json_overrides() {
        let parsed: SimulationInputs = serde_json::from_str(
            r#"{"joining_date": "2020-07-01", "increment_month": "July", "initial_level": "13A"}"#,
        )
        .unwrap();
        assert_eq!(parsed.increment_month, IncrementMonth::July);
        assert_eq!(parsed.initial_level, Some(Level::from("13A")));
        assert_eq!(parsed.joining_date.month(), 7);
    }

    #[test]
    fn test_retirement_date_from_ages() {
        assert_eq!(
            inputs().retirement_date().unwrap(),
            NaiveDate::from_ymd_opt(2052, 12, 13).unwrap()
        );

        let leap = SimulationInputs {
            joining_date: NaiveDate::from_ymd_opt(2016, 2, 29).unwrap(),
            current_age: 33,
            ..inputs()
        };
        assert_eq!(leap.retirement_date().unwrap(), NaiveDate::from_ymd_opt(2053, 2, 28).unwrap());
    }

    #[test]
    fn test_rejects_retirement_not_after_current_age() {
        let bad = SimulationInputs { current_age: 60, ..inputs() };
        assert_eq!(
            bad.retirement_date(),
            Err(ConfigError::RetirementNotAfterCurrentAge { current_age: 60, retirement_age: 60 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_ages_and_years() {
        let bad = SimulationInputs { retirement_age: i32::MAX as u32, current_age: 0, ..inputs() };
        assert_eq!(
            bad.retirement_date(),
            Err(ConfigError::AgeOutOfRange { name: "retirement age", value: i32::MAX as u32, max: MAX_AGE })
        );

        let bad = SimulationInputs { current_age: u32::MAX, ..inputs() };
        assert!(matches!(bad.retirement_date(), Err(ConfigError::AgeOutOfRange { name: "current age", .. })));

        let bad = SimulationInputs { as_of_year: Some(i32::MAX), ..inputs() };
        assert_eq!(bad.retirement_date(), Err(ConfigError::InvalidRetirementDate { year: i32::MAX }));
    }

    #[test]
    fn test_from_json_path_reports_io_and_json_errors() {
        let missing = std::env::temp_dir().join("pension_system_missing_inputs.json");
        let _ = std::fs::remove_file(&missing);
        assert!(matches!(SimulationInputs::from_json_path(&missing), Err(InputError::Io(_))));

        let malformed = std::env::temp_dir().join(format!("pension_system_bad_inputs_{}.json", std::process::id()));
        std::fs::write(&malformed, r#"{"current_age": "thirty"}"#).unwrap();
        assert!(matches!(SimulationInputs::from_json_path(&malformed), Err(InputError::Json(_))));

        std::fs::write(&malformed, r#"{"current_age": 40, "as_of_year": 2026}"#).unwrap();
        let parsed = SimulationInputs::from_json_path(&malformed).unwrap();
        assert_eq!(parsed.current_age, 40);
        assert_eq!(parsed.retirement_age, 60);
        std::fs::remove_file(&malformed).unwrap();
    }

    #[test]
    fn test_validate_resolves_defaults() {
        let reference = ReferenceData::builtin().unwrap();
        let plan = inputs().validate(&reference.pay_matrix).unwrap();

        assert_eq!(plan.career.initial_level, Level::from("1"));
        assert_eq!(plan.career.month_count(), 433);
        assert_eq!(plan.career.service_months(), 432);
        assert_eq!(plan.pension.horizon_months(), 240);
        assert_eq!(plan.schedule.cycles().len(), 5);
    }

    #[test]
    fn test_validate_rejects_invalid_inputs() {
        let reference = ReferenceData::builtin().unwrap();
        let base = &reference.pay_matrix;

        let cases = [
            SimulationInputs { promotion_interval_years: 0, ..inputs() },
            SimulationInputs { initial_position: 0, ..inputs() },
            SimulationInputs { life_expectancy_years: 0, ..inputs() },
            SimulationInputs { life_expectancy_years: 400_000_000, ..inputs() },
            SimulationInputs { annuity_pct: 1.5, ..inputs() },
            SimulationInputs { swp_reinvestment_pct: -0.1, ..inputs() },
            SimulationInputs { nps_return: f64::NAN, ..inputs() },
            SimulationInputs { initial_level: Some(Level::from("99")), ..inputs() },
            SimulationInputs { cpc_years: vec![2036, 2026], ..inputs() },
            SimulationInputs { retirement_age: 30, ..inputs() },
        ];
        for case in cases {
            assert!(case.validate(base).is_err(), "expected rejection of {:?}", case);
        }
    }
}
