//! Derivation of future pay matrices from the base matrix
//!
//! Each new commission multiplies the previous commission's matrix by a
//! fitment factor `(1 + DA at reference date) * (1 + fitment increase)`,
//! rounding every cell to the nearest rupee.

use super::schedule::{CpcCycle, CpcSchedule};
use crate::reference::{CpcLabel, DaRateTable, Level, PayMatrix};
use chrono::NaiveDate;
use serde::Serialize;

/// How a commission's matrix was derived from its predecessor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitmentFactor {
    /// July 1 of the year before the commission takes effect
    pub reference_date: Option<NaiveDate>,
    /// DA in force on the reference date (0 when none was notified)
    pub reference_da: f64,
    /// Fitment increase on top of DA merger
    pub increase: f64,
    /// `(1 + reference_da) * (1 + increase)`
    pub factor: f64,
}

/// A commission together with its full pay matrix
#[derive(Debug, Clone)]
pub struct GeneratedCycle {
    pub cycle: CpcCycle,
    /// `None` for the base commission
    pub fitment: Option<FitmentFactor>,
    pub matrix: PayMatrix,
}

/// One full pay matrix per commission, in chronological order
#[derive(Debug, Clone)]
pub struct CpcMatrixSet {
    schedule: CpcSchedule,
    cycles: Vec<GeneratedCycle>,
}

impl CpcMatrixSet {
    /// Calendar the matrices were generated for
    pub fn schedule(&self) -> &CpcSchedule {
        &self.schedule
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GeneratedCycle> {
        self.cycles.get(index)
    }

    /// Commission at `index`; panics if out of range
    pub(crate) fn cycle(&self, index: usize) -> &GeneratedCycle {
        &self.cycles[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedCycle> {
        self.cycles.iter()
    }

    /// Base commission's matrix
    pub fn base(&self) -> &PayMatrix {
        &self.cycles[0].matrix
    }

    /// Levels of the base matrix in promotion order
    pub fn levels(&self) -> &[Level] {
        self.base().levels()
    }

    pub fn by_label(&self, label: CpcLabel) -> Option<&GeneratedCycle> {
        self.cycles.iter().find(|c| c.cycle.label == label)
    }
}

/// Builds successive commission matrices from DA history and a fitment increase
#[derive(Debug, Clone, Copy)]
pub struct CpcMatrixGenerator<'a> {
    da_rates: &'a DaRateTable,
    increase: f64,
}

impl<'a> CpcMatrixGenerator<'a> {
    pub fn new(da_rates: &'a DaRateTable, increase: f64) -> Self {
        Self { da_rates, increase }
    }

    /// Fitment factor for a commission taking effect in January of `start_year`
    pub fn fitment_factor(&self, start_year: i32) -> FitmentFactor {
        let reference_date = NaiveDate::from_ymd_opt(start_year - 1, 7, 1);
        let reference_da = reference_date.map_or(0.0, |date| self.da_rates.rate_as_of(date));

        FitmentFactor {
            reference_date,
            reference_da,
            increase: self.increase,
            factor: (1.0 + reference_da) * (1.0 + self.increase),
        }
    }

    /// Matrix for commission `label`, derived from its immediate predecessor
    pub fn next_matrix(&self, prior: &PayMatrix, label: CpcLabel, fitment: &FitmentFactor) -> PayMatrix {
        let factor = fitment.factor;
        prior.revised(label, |pay| (pay * factor).round())
    }

    /// Generate every commission in `schedule`, starting from `base`
    pub fn generate(&self, base: PayMatrix, schedule: &CpcSchedule) -> CpcMatrixSet {
        let mut cycles: Vec<GeneratedCycle> = Vec::with_capacity(schedule.cycles().len());

        for &cycle in schedule.cycles() {
            let generated = match (cycles.last(), cycle.start_year) {
                (Some(prior), Some(start_year)) => {
                    let fitment = self.fitment_factor(start_year);
                    log::debug!(
                        "{}: reference DA {:.2} from {:?}, fitment factor {:.4}",
                        cycle.label,
                        fitment.reference_da,
                        fitment.reference_date,
                        fitment.factor
                    );
                    GeneratedCycle {
                        cycle,
                        matrix: self.next_matrix(&prior.matrix, cycle.label, &fitment),
                        fitment: Some(fitment),
                    }
                }
                _ => GeneratedCycle {
                    cycle,
                    fitment: None,
                    matrix: base.revised(cycle.label, |pay| pay),
                },
            };
            cycles.push(generated);
        }

        CpcMatrixSet {
            schedule: schedule.clone(),
            cycles,
        }
    }
}
