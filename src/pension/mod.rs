//! Post-retirement projection of UPS pension and NPS annuity
//!
//! Both schemes are projected from the state on the retirement date:
//! - **UPS**: half of final basic pay, escalated by DA every six months,
//!   plus a lumpsum of one tenth of final basic per completed half year
//! - **NPS**: a share of the corpus buys an annuity (optionally growing),
//!   the rest is paid out as a lumpsum

pub mod ups;
pub mod nps;

pub use ups::UpsPayoutRow;
pub use nps::NpsPayoutRow;

use serde::Serialize;

use crate::career::CareerLedger;
use crate::error::ConfigError;

/// Longest pension horizon accepted, in years
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Pay and corpus on the retirement date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetirementState {
    pub final_basic_pay: f64,
    /// DA rate in the last month of service
    pub final_da_rate: f64,
    pub final_nps_corpus: f64,
    /// Completed months of service
    pub service_months: u32,
}

impl RetirementState {
    /// Final state taken from the last month of a ledger
    pub fn from_ledger(ledger: &CareerLedger, service_months: u32) -> Self {
        let summary = ledger.summary();
        Self {
            final_basic_pay: summary.final_basic_pay,
            final_da_rate: summary.final_da_rate,
            final_nps_corpus: summary.final_nps_corpus,
            service_months,
        }
    }
}

/// Payout assumptions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PensionParams {
    /// Share of the NPS corpus converted to an annuity
    pub annuity_pct: f64,
    /// Annual annuity rate
    pub annuity_rate: f64,
    /// Annual growth of the annuity corpus (0 keeps the annuity flat)
    pub annuity_growth_rate: f64,
    /// Years of pension to project
    pub horizon_years: u32,
}

impl PensionParams {
    pub fn horizon_months(&self) -> u32 {
        self.horizon_years.saturating_mul(12)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_years == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::HorizonTooLong {
                years: self.horizon_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        if !(0.0..=1.0).contains(&self.annuity_pct) {
            return Err(ConfigError::FractionOutOfRange {
                name: "annuity share",
                value: self.annuity_pct,
            });
        }
        for (name, value) in [
            ("annuity rate", self.annuity_rate),
            ("annuity growth rate", self.annuity_growth_rate),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::NegativeAmount { name, value });
            }
        }
        Ok(())
    }
}

impl Default for PensionParams {
    fn default() -> Self {
        Self {
            annuity_pct: 0.60,
            annuity_rate: 0.06,
            annuity_growth_rate: 0.0,
            horizon_years: 20,
        }
    }
}

/// Headline figures and month-wise schedules for both schemes
#[derive(Debug, Clone, Serialize)]
pub struct PensionResult {
    /// UPS pension in the first month, including DA at retirement
    pub ups_monthly_pension: f64,
    /// UPS pension before DA
    pub ups_base_pension: f64,
    /// NPS annuity in the first month, before any corpus growth
    pub nps_annuity_monthly: f64,
    pub nps_corpus_final: f64,
    pub ups_lumpsum: f64,
    pub nps_lumpsum: f64,
    pub total_ups_paid: f64,
    pub total_nps_paid: f64,
    pub ups_schedule: Vec<UpsPayoutRow>,
    pub nps_schedule: Vec<NpsPayoutRow>,
}

/// Projects pensions under both schemes from a retirement state
#[derive(Debug, Clone)]
pub struct PensionProjector {
    params: PensionParams,
}

impl PensionProjector {
    pub fn new(params: PensionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PensionParams {
        &self.params
    }

    pub fn project(&self, retirement: &RetirementState) -> PensionResult {
        let months = self.params.horizon_months();

        let ups_base_pension = ups::base_pension(retirement.final_basic_pay);
        let ups_schedule = ups::payout_schedule(ups_base_pension, retirement.final_da_rate, months);

        let annuity_corpus = nps::annuity_corpus(retirement.final_nps_corpus, self.params.annuity_pct);
        let nps_schedule = nps::payout_schedule(
            annuity_corpus,
            self.params.annuity_rate,
            self.params.annuity_growth_rate,
            months,
        );

        PensionResult {
            ups_monthly_pension: ups_base_pension * (1.0 + retirement.final_da_rate),
            ups_base_pension,
            nps_annuity_monthly: nps::monthly_annuity(annuity_corpus, self.params.annuity_rate),
            nps_corpus_final: retirement.final_nps_corpus,
            ups_lumpsum: ups::lumpsum(retirement.final_basic_pay, retirement.service_months),
            nps_lumpsum: nps::lumpsum(retirement.final_nps_corpus, self.params.annuity_pct),
            total_ups_paid: ups_schedule.iter().map(|r| r.pension).sum(),
            total_nps_paid: nps_schedule.iter().map(|r| r.payout).sum(),
            ups_schedule,
            nps_schedule,
        }
    }
}
