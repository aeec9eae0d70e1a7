//! Month-by-month pay progression from joining to retirement

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ledger::{CareerLedger, MonthlyRecord};
use super::state::{months_between, CareerState};
use crate::cpc::CpcMatrixSet;
use crate::error::ConfigError;
use crate::reference::{CpcLabel, Level};

/// Month in which the annual increment falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncrementMonth {
    January,
    July,
}

impl IncrementMonth {
    /// Calendar month number (1-12)
    pub fn number(&self) -> u32 {
        match self {
            IncrementMonth::January => 1,
            IncrementMonth::July => 7,
        }
    }
}

/// Configuration for a career simulation
#[derive(Debug, Clone)]
pub struct CareerConfig {
    pub joining_date: NaiveDate,
    pub retirement_date: NaiveDate,
    pub initial_level: Level,
    pub initial_position: u32,
    pub increment_month: IncrementMonth,
    pub promotion_interval_years: u32,
    /// Combined employee + government NPS contribution, fraction of basic + DA
    pub nps_contribution_rate: f64,
    /// Annual NPS return, compounded monthly
    pub nps_annual_return: f64,
}

impl CareerConfig {
    /// Calendar months from the joining month to the retirement month, inclusive
    pub fn month_count(&self) -> u32 {
        (months_between(self.joining_date, self.retirement_date) + 1).max(0) as u32
    }

    /// Completed months of service (joining month to retirement month, exclusive)
    pub fn service_months(&self) -> u32 {
        months_between(self.joining_date, self.retirement_date).max(0) as u32
    }

    /// Reject configurations that cannot produce a ledger
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.promotion_interval_years == 0 {
            return Err(ConfigError::ZeroPromotionInterval);
        }
        if self.initial_position == 0 {
            return Err(ConfigError::ZeroPosition);
        }
        if months_between(self.joining_date, self.retirement_date) < 0 {
            return Err(ConfigError::EmptyServicePeriod {
                joining: self.joining_date,
                retirement: self.retirement_date,
            });
        }
        for (name, value) in [
            ("NPS contribution rate", self.nps_contribution_rate),
            ("NPS return", self.nps_annual_return),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::NegativeAmount { name, value });
            }
        }
        Ok(())
    }
}

/// Walks a career month by month over a fixed set of commission matrices
pub struct CareerSimulator<'a> {
    cycles: &'a CpcMatrixSet,
    config: CareerConfig,
    /// `(1 + annual return)^(1/12)`
    monthly_growth: f64,
}

impl<'a> CareerSimulator<'a> {
    pub fn new(cycles: &'a CpcMatrixSet, config: CareerConfig) -> Self {
        let monthly_growth = (1.0 + config.nps_annual_return).powf(1.0 / 12.0);
        Self { cycles, config, monthly_growth }
    }

    pub fn config(&self) -> &CareerConfig {
        &self.config
    }

    /// Produce one record per month from joining to retirement
    pub fn simulate(&self) -> Result<CareerLedger, ConfigError> {
        self.config.validate()?;

        let mut state = CareerState::at_joining(&self.config, self.cycles)?;
        let mut ledger = CareerLedger::new(state.basic_pay);
        let months = self.config.month_count();

        log::info!(
            "simulating {} months from {} to {} starting at level {} position {} ({})",
            months,
            self.config.joining_date,
            self.config.retirement_date,
            state.level,
            state.position,
            state.cpc
        );

        for month in 0..months {
            if month > 0 {
                state.advance_month();
            }
            let record = self.simulate_month(&mut state);
            ledger.add_record(record);
        }

        Ok(ledger)
    }

    /// Apply this month's transitions and record the resulting state
    fn simulate_month(&self, state: &mut CareerState) -> MonthlyRecord {
        let year = state.period.year();
        let month = state.period.month();

        let cpc_applied = self.apply_pay_commission(state, year, month);

        if month == 1 || month == 7 {
            state.da_steps += 1;
        }

        // DA is paid on the month-opening pay, before any increment or promotion
        let da_rate = state.da_rate();
        let da_amount = state.basic_pay * da_rate;
        let total_emoluments = state.basic_pay + da_amount;

        if month == self.config.increment_month.number() {
            self.apply_increment(state);
        }

        if month == 1 && self.is_promotion_year(year) {
            self.apply_promotion(state);
        }

        let nps_contribution = total_emoluments * self.config.nps_contribution_rate;
        state.nps_corpus = (state.nps_corpus + nps_contribution) * self.monthly_growth;

        MonthlyRecord {
            period: state.period,
            month,
            year,
            level: state.level.clone(),
            position: state.position,
            cpc: state.cpc,
            basic_pay: state.basic_pay,
            da_rate,
            da_amount,
            total_emoluments,
            nps_contribution,
            nps_corpus: state.nps_corpus,
            cpc_applied,
        }
    }

    /// Switch to the next commission in January of its start year
    fn apply_pay_commission(&self, state: &mut CareerState, year: i32, month: u32) -> Option<CpcLabel> {
        if month != 1 {
            return None;
        }
        let next = self.cycles.get(state.cycle_index + 1)?;
        if next.cycle.start_year != Some(year) {
            return None;
        }

        state.cycle_index += 1;
        state.cpc = next.cycle.label;
        state.da_steps = 0;

        match next.matrix.basic_pay(&state.level, state.position) {
            Some(pay) => state.basic_pay = pay,
            None => log::debug!(
                "{}: no cell for level {} position {}, pay unchanged",
                next.cycle.label,
                state.level,
                state.position
            ),
        }

        log::debug!("{}-{:02}: switched to {}, basic pay {:.0}", year, month, state.cpc, state.basic_pay);
        Some(next.cycle.label)
    }

    /// Move one cell up the level; stays put at the top of the scale
    fn apply_increment(&self, state: &mut CareerState) {
        let matrix = &self.cycles.cycle(state.cycle_index).matrix;
        let next_position = state.position + 1;

        match matrix.basic_pay(&state.level, next_position) {
            Some(pay) => {
                state.position = next_position;
                state.basic_pay = pay;
            }
            None => log::debug!(
                "{}: level {} has no position {}, increment skipped",
                state.period,
                state.level,
                next_position
            ),
        }
    }

    fn is_promotion_year(&self, year: i32) -> bool {
        let elapsed = i64::from(year) - i64::from(self.config.joining_date.year());
        elapsed != 0 && elapsed % i64::from(self.config.promotion_interval_years) == 0
    }

    /// Move to the first cell of the next level, if there is one
    fn apply_promotion(&self, state: &mut CareerState) {
        let levels = self.cycles.levels();
        let Some(next_level) = levels
            .iter()
            .position(|level| *level == state.level)
            .and_then(|idx| levels.get(idx + 1))
        else {
            log::debug!("{}: already at top level {}, no promotion", state.period, state.level);
            return;
        };

        let matrix = &self.cycles.cycle(state.cycle_index).matrix;
        match matrix.basic_pay(next_level, 1) {
            Some(pay) => {
                log::debug!("{}: promoted from level {} to {}", state.period, state.level, next_level);
                state.level = next_level.clone();
                state.position = 1;
                state.basic_pay = pay;
            }
            None => log::debug!("{}: level {} has no first cell, promotion skipped", state.period, next_level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpc::{CpcMatrixGenerator, CpcSchedule};
    use crate::reference::{DaRateTable, PayMatrix, ReferenceData};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_cycles(years: &[i32]) -> CpcMatrixSet {
        let mut cells = Vec::new();
        for (level, start) in [("1", 100.0), ("2", 200.0), ("3", 300.0)] {
            for position in 1..=3u32 {
                cells.push((Level::from(level), position, start + 10.0 * (position - 1) as f64));
            }
        }
        let base = PayMatrix::from_entries(CpcLabel::BASE, cells).unwrap();
        let da = DaRateTable::empty();
        CpcMatrixGenerator::new(&da, 1.0).generate(base, &CpcSchedule::new(years).unwrap())
    }

    fn config(joining: NaiveDate, retirement: NaiveDate) -> CareerConfig {
        CareerConfig {
            joining_date: joining,
            retirement_date: retirement,
            initial_level: Level::from("1"),
            initial_position: 1,
            increment_month: IncrementMonth::January,
            promotion_interval_years: 4,
            nps_contribution_rate: 0.2,
            nps_annual_return: 0.08,
        }
    }

    #[test]
    fn test_ledger_covers_every_month_inclusive() {
        let cycles = small_cycles(&[]);
        let ledger = CareerSimulator::new(&cycles, config(date(2016, 12, 13), date(2018, 3, 13)))
            .simulate()
            .unwrap();

        assert_eq!(ledger.records.len(), 16);
        assert_eq!(ledger.records[0].period, date(2016, 12, 1));
        assert_eq!(ledger.records.last().unwrap().period, date(2018, 3, 1));
    }

    #[test]
    fn test_da_accrues_half_yearly_and_resets_on_switch() {
        let cycles = small_cycles(&[2018]);
        let ledger = CareerSimulator::new(&cycles, config(date(2016, 12, 13), date(2018, 8, 13)))
            .simulate()
            .unwrap();

        let da: Vec<f64> = ledger.records.iter().map(|r| r.da_rate).collect();
        // Dec-16: 0, Jan-17: 0.03, Jul-17: 0.06, Jan-18: reset then 0.03, Jul-18: 0.06
        approx::assert_abs_diff_eq!(da[0], 0.0);
        approx::assert_abs_diff_eq!(da[1], 0.03);
        approx::assert_abs_diff_eq!(da[7], 0.06);
        approx::assert_abs_diff_eq!(da[13], 0.03);
        approx::assert_abs_diff_eq!(da[19], 0.06);

        let switch = &ledger.records[13];
        assert_eq!(switch.cpc_applied, Some(CpcLabel::new(8)));
        assert_eq!(switch.cpc, CpcLabel::new(8));
        assert!(ledger.records.iter().filter(|r| r.cpc_applied.is_some()).count() == 1);

        for record in &ledger.records {
            let steps = record.da_rate / 0.03;
            assert!((steps - steps.round()).abs() < 1e-9, "{} is not a DA step multiple", record.da_rate);
        }
    }

    #[test]
    fn test_pay_commission_doubles_pay_with_full_fitment() {
        // Fitment increase of 100% with no DA doubles every cell
        let cycles = small_cycles(&[2018]);
        let ledger = CareerSimulator::new(&cycles, config(date(2017, 2, 1), date(2018, 2, 1)))
            .simulate()
            .unwrap();

        // Feb-17 level 1 pos 1 = 100; Jan-18 switch -> 200, then increment to pos 2 -> 220
        assert_eq!(ledger.records[0].basic_pay, 100.0);
        let january = &ledger.records[11];
        assert_eq!(january.period, date(2018, 1, 1));
        assert_eq!(january.basic_pay, 220.0);
        assert_eq!(january.position, 2);
        // DA is computed on the switched pay before the increment
        approx::assert_relative_eq!(january.da_amount, 6.0, epsilon = 1e-9);
        approx::assert_relative_eq!(january.total_emoluments, 206.0, epsilon = 1e-9);
    }

    #[test]
    fn test_increment_stops_at_last_position() {
        let cycles = small_cycles(&[]);
        let mut cfg = config(date(2016, 12, 13), date(2020, 12, 13));
        cfg.promotion_interval_years = 50;
        let ledger = CareerSimulator::new(&cycles, cfg).simulate().unwrap();

        let last = ledger.records.last().unwrap();
        assert_eq!(last.position, 3);
        assert_eq!(last.basic_pay, 120.0);
        assert!(ledger.records.windows(2).all(|w| w[1].position >= w[0].position));
    }

    #[test]
    fn test_july_increment_after_da_on_opening_pay() {
        let cycles = small_cycles(&[]);
        let mut cfg = config(date(2016, 12, 13), date(2018, 8, 13));
        cfg.increment_month = IncrementMonth::July;
        cfg.promotion_interval_years = 10;
        let ledger = CareerSimulator::new(&cycles, cfg).simulate().unwrap();

        // Jan-17: DA accrues, no increment
        let jan_2017 = &ledger.records[1];
        assert_eq!(jan_2017.period, date(2017, 1, 1));
        assert_eq!(jan_2017.position, 1);
        assert_eq!(jan_2017.basic_pay, 100.0);

        // Jul-17: DA 0.06 paid on the pre-increment 100, then position 2
        let jul_2017 = &ledger.records[7];
        assert_eq!(jul_2017.period, date(2017, 7, 1));
        assert_eq!(jul_2017.position, 2);
        assert_eq!(jul_2017.basic_pay, 110.0);
        approx::assert_relative_eq!(jul_2017.da_amount, 6.0, epsilon = 1e-9);
        approx::assert_relative_eq!(jul_2017.total_emoluments, 106.0, epsilon = 1e-9);

        let jan_2018 = &ledger.records[13];
        assert_eq!(jan_2018.position, 2);

        // Jul-18: DA 0.12 on 110, then the last position
        let jul_2018 = &ledger.records[19];
        assert_eq!(jul_2018.period, date(2018, 7, 1));
        assert_eq!(jul_2018.position, 3);
        approx::assert_relative_eq!(jul_2018.da_amount, 13.2, epsilon = 1e-9);

        let changes: Vec<u32> = ledger
            .records
            .windows(2)
            .filter(|w| w[1].position != w[0].position)
            .map(|w| w[1].month)
            .collect();
        assert_eq!(changes, vec![7, 7]);
    }

    #[test]
    fn test_very_long_promotion_interval_never_promotes() {
        let cycles = small_cycles(&[]);
        let mut cfg = config(date(2016, 12, 13), date(2018, 12, 13));
        cfg.promotion_interval_years = u32::MAX;
        let ledger = CareerSimulator::new(&cycles, cfg).simulate().unwrap();

        assert!(ledger.records.iter().all(|r| r.level == Level::from("1")));
        assert_eq!(ledger.summary().promotions, 0);
    }

    #[test]
    fn test_promotion_every_interval_and_caps_at_top_level() {
        let cycles = small_cycles(&[]);
        let mut cfg = config(date(2016, 12, 13), date(2030, 12, 13));
        cfg.promotion_interval_years = 2;
        let ledger = CareerSimulator::new(&cycles, cfg).simulate().unwrap();

        let jan_2018 = ledger.records.iter().find(|r| r.period == date(2018, 1, 1)).unwrap();
        assert_eq!(jan_2018.level, Level::from("2"));
        assert_eq!(jan_2018.position, 1);
        assert_eq!(jan_2018.basic_pay, 200.0);

        let jan_2020 = ledger.records.iter().find(|r| r.period == date(2020, 1, 1)).unwrap();
        assert_eq!(jan_2020.level, Level::from("3"));
        assert_eq!(jan_2020.position, 1);

        // Top level reached: later promotion years only increment
        let last = ledger.records.last().unwrap();
        assert_eq!(last.level, Level::from("3"));
        assert!(ledger.records.iter().all(|r| r.level <= Level::from("3")));
    }

    #[test]
    fn test_nps_corpus_compounds_monthly() {
        let cycles = small_cycles(&[]);
        let ledger = CareerSimulator::new(&cycles, config(date(2016, 12, 13), date(2017, 1, 13)))
            .simulate()
            .unwrap();

        let growth = 1.08f64.powf(1.0 / 12.0);
        let first = &ledger.records[0];
        approx::assert_relative_eq!(first.nps_contribution, 20.0);
        approx::assert_relative_eq!(first.nps_corpus, 20.0 * growth, epsilon = 1e-9);

        let second = &ledger.records[1];
        approx::assert_relative_eq!(second.nps_contribution, 100.0 * 1.03 * 0.2, epsilon = 1e-9);
        approx::assert_relative_eq!(
            second.nps_corpus,
            (first.nps_corpus + second.nps_contribution) * growth,
            epsilon = 1e-9
        );
        assert!(ledger.records.windows(2).all(|w| w[1].nps_corpus >= w[0].nps_corpus));
    }

    #[test]
    fn test_joining_after_commission_starts_under_it() {
        let cycles = small_cycles(&[2018, 2020]);
        let ledger = CareerSimulator::new(&cycles, config(date(2019, 3, 1), date(2021, 3, 1)))
            .simulate()
            .unwrap();

        let first = &ledger.records[0];
        assert_eq!(first.cpc, CpcLabel::new(8));
        assert_eq!(first.basic_pay, 200.0);
        let switch = ledger.records.iter().find(|r| r.cpc_applied.is_some()).unwrap();
        assert_eq!(switch.period, date(2020, 1, 1));
        assert_eq!(switch.cpc, CpcLabel::new(9));
    }

    #[test]
    fn test_rejects_invalid_configuration() {
        let cycles = small_cycles(&[]);

        let mut cfg = config(date(2016, 12, 13), date(2030, 12, 13));
        cfg.promotion_interval_years = 0;
        assert_eq!(
            CareerSimulator::new(&cycles, cfg).simulate().unwrap_err(),
            ConfigError::ZeroPromotionInterval
        );

        let cfg = config(date(2016, 12, 13), date(2016, 11, 13));
        assert!(matches!(
            CareerSimulator::new(&cycles, cfg).simulate(),
            Err(ConfigError::EmptyServicePeriod { .. })
        ));

        let mut cfg = config(date(2016, 12, 13), date(2030, 12, 13));
        cfg.initial_level = Level::from("9");
        assert_eq!(
            CareerSimulator::new(&cycles, cfg).simulate().unwrap_err(),
            ConfigError::UnknownLevel(Level::from("9"))
        );

        let mut cfg = config(date(2016, 12, 13), date(2030, 12, 13));
        cfg.initial_position = 4;
        assert!(matches!(
            CareerSimulator::new(&cycles, cfg).simulate(),
            Err(ConfigError::MissingInitialPay { position: 4, .. })
        ));
    }

    #[test]
    fn test_reference_career_on_bundled_matrix() {
        let reference = ReferenceData::builtin().unwrap();
        let cycles = CpcMatrixGenerator::new(&reference.da_rates, 0.25)
            .generate(reference.pay_matrix.clone(), &CpcSchedule::default());
        let ledger = CareerSimulator::new(&cycles, config(date(2016, 12, 13), date(2052, 12, 13))).simulate().unwrap();

        assert_eq!(ledger.records.len(), 433);
        assert_eq!(ledger.records.last().unwrap().period, date(2052, 12, 1));

        let summary = ledger.summary();
        assert!(summary.final_basic_pay > summary.initial_basic_pay);
        assert!(summary.final_nps_corpus > 0.0);

        let switches: Vec<String> = ledger
            .records
            .iter()
            .filter_map(|r| r.cpc_applied.map(|c| c.to_string()))
            .collect();
        // 11th CPC (2056) falls after retirement
        assert_eq!(switches, vec!["8CPC", "9CPC", "10CPC"]);
    }

    proptest::proptest! {
        #[test]
        fn prop_corpus_grows_and_promotion_stops_at_top(
            contribution_bp in 0u32..3000,
            return_bp in 0u32..1500,
            interval in 1u32..6,
            years in 1i32..30,
        ) {
            let cycles = small_cycles(&[2026, 2036]);
            let mut cfg = config(date(2016, 12, 13), date(2016 + years, 12, 13));
            cfg.nps_contribution_rate = contribution_bp as f64 / 10_000.0;
            cfg.nps_annual_return = return_bp as f64 / 10_000.0;
            cfg.promotion_interval_years = interval;

            let ledger = CareerSimulator::new(&cycles, cfg).simulate().unwrap();
            proptest::prop_assert_eq!(ledger.records.len() as i32, years * 12 + 1);

            for pair in ledger.records.windows(2) {
                proptest::prop_assert!(pair[1].nps_corpus >= pair[0].nps_corpus);
            }
            for record in &ledger.records {
                proptest::prop_assert!(record.level <= Level::from("3"));
                proptest::prop_assert!(record.position >= 1 && record.position <= 3);
            }
        }
    }
}
