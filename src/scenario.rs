//! Scenario runner for UPS vs NPS comparisons
//!
//! Loads the reference tables once, then runs any number of input sets
//! against them without re-reading CSV files.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::career::{CareerLedger, CareerSimulator};
use crate::config::{RunPlan, SimulationInputs};
use crate::cpc::{CpcMatrixGenerator, CpcMatrixSet};
use crate::error::{ReferenceDataError, SimulationError};
use crate::pension::{PensionProjector, PensionResult, RetirementState};
use crate::reference::{CpcLabel, Level, ReferenceData};
use crate::swp::{SwpResult, SwpSimulator};

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub retirement_date: NaiveDate,
    pub cycles: CpcMatrixSet,
    pub ledger: CareerLedger,
    pub pension: PensionResult,
    /// Withdrawal plan on the NPS lumpsum
    pub nps_swp: SwpResult,
    /// Withdrawal plan on the UPS lumpsum
    pub ups_swp: SwpResult,
    pub summary: RunSummary,
}

/// Headline figures of a run, suitable for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub joining_date: NaiveDate,
    pub retirement_date: NaiveDate,
    pub service_months: u32,
    pub simulated_months: u32,
    pub promotions: u32,

    pub initial_basic_pay: f64,
    pub final_basic_pay: f64,
    pub final_da_rate: f64,
    pub final_level: Option<Level>,
    pub final_cpc: Option<CpcLabel>,

    pub ups_monthly_pension: f64,
    pub ups_lumpsum: f64,
    pub total_ups_paid: f64,

    pub nps_corpus_final: f64,
    pub total_nps_contributions: f64,
    pub nps_annuity_monthly: f64,
    pub nps_lumpsum: f64,
    pub total_nps_paid: f64,

    pub horizon_months: u32,
    pub nps_swp_months_survived: u32,
    pub nps_swp_remaining_corpus: f64,
    pub ups_swp_months_survived: u32,
    pub ups_swp_remaining_corpus: f64,
}

/// Pre-loaded runner for single and batch comparisons
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::builtin()?;
///
/// for fitment in [0.15, 0.25, 0.35] {
///     let inputs = SimulationInputs { pay_commission_increase: fitment, ..Default::default() };
///     let report = runner.run(&inputs)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    reference: ReferenceData,
}

impl ScenarioRunner {
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Runner over the tables compiled into the binary
    pub fn builtin() -> Result<Self, ReferenceDataError> {
        Ok(Self::new(ReferenceData::builtin()?))
    }

    /// Runner over CSV files in the default data directory
    pub fn from_csv() -> Result<Self, ReferenceDataError> {
        Ok(Self::new(ReferenceData::from_csv()?))
    }

    /// Runner over CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, ReferenceDataError> {
        Ok(Self::new(ReferenceData::from_csv_path(path)?))
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Validate `inputs` and run the full comparison
    pub fn run(&self, inputs: &SimulationInputs) -> Result<ComparisonReport, SimulationError> {
        let plan = inputs.validate(&self.reference.pay_matrix)?;
        self.run_plan(&plan)
    }

    /// Run an already validated plan
    pub fn run_plan(&self, plan: &RunPlan) -> Result<ComparisonReport, SimulationError> {
        let cycles = CpcMatrixGenerator::new(&self.reference.da_rates, plan.pay_commission_increase)
            .generate(self.reference.pay_matrix.clone(), &plan.schedule);

        let ledger = CareerSimulator::new(&cycles, plan.career.clone()).simulate()?;

        let service_months = plan.career.service_months();
        let retirement = RetirementState::from_ledger(&ledger, service_months);
        let pension = PensionProjector::new(plan.pension).project(&retirement);

        let horizon_months = plan.pension.horizon_months();
        let swp = SwpSimulator::new(plan.swp);
        let nps_swp = swp.simulate(pension.nps_lumpsum, horizon_months);
        let ups_swp = swp.simulate(pension.ups_lumpsum, horizon_months);

        let career = ledger.summary();
        let summary = RunSummary {
            joining_date: plan.career.joining_date,
            retirement_date: plan.career.retirement_date,
            service_months,
            simulated_months: career.total_months,
            promotions: career.promotions,
            initial_basic_pay: career.initial_basic_pay,
            final_basic_pay: career.final_basic_pay,
            final_da_rate: career.final_da_rate,
            final_level: career.final_level,
            final_cpc: career.final_cpc,
            ups_monthly_pension: pension.ups_monthly_pension,
            ups_lumpsum: pension.ups_lumpsum,
            total_ups_paid: pension.total_ups_paid,
            nps_corpus_final: pension.nps_corpus_final,
            total_nps_contributions: career.total_nps_contributions,
            nps_annuity_monthly: pension.nps_annuity_monthly,
            nps_lumpsum: pension.nps_lumpsum,
            total_nps_paid: pension.total_nps_paid,
            horizon_months,
            nps_swp_months_survived: nps_swp.months_survived,
            nps_swp_remaining_corpus: nps_swp.remaining_corpus,
            ups_swp_months_survived: ups_swp.months_survived,
            ups_swp_remaining_corpus: ups_swp.remaining_corpus,
        };

        log::info!(
            "retiring {}: UPS {:.0}/month vs NPS annuity {:.0}/month",
            summary.retirement_date,
            summary.ups_monthly_pension,
            summary.nps_annuity_monthly
        );

        Ok(ComparisonReport {
            retirement_date: plan.career.retirement_date,
            cycles,
            ledger,
            pension,
            nps_swp,
            ups_swp,
            summary,
        })
    }

    /// Run many input sets in parallel; results keep the input order
    pub fn run_scenarios(
        &self,
        inputs: &[SimulationInputs],
    ) -> Vec<Result<ComparisonReport, SimulationError>> {
        inputs.par_iter().map(|i| self.run(i)).collect()
    }
}
