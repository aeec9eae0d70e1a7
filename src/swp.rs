//! Systematic withdrawal plan on a reinvested lumpsum
//!
//! The corpus grows at the monthly equivalent of an annual return, then pays a
//! fixed withdrawal. A month counts as survived only if the corpus covered the
//! full withdrawal.

use serde::Serialize;

use crate::error::ConfigError;

/// Monthly rate equivalent to an annual rate under monthly compounding
pub fn monthly_equivalent_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Withdrawal plan assumptions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwpParams {
    /// Share of the lumpsum reinvested
    pub reinvestment_pct: f64,
    pub monthly_withdrawal: f64,
    pub annual_return: f64,
}

impl SwpParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reinvestment_pct) {
            return Err(ConfigError::FractionOutOfRange {
                name: "SWP reinvestment share",
                value: self.reinvestment_pct,
            });
        }
        for (name, value) in [
            ("SWP monthly withdrawal", self.monthly_withdrawal),
            ("SWP return", self.annual_return),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::NegativeAmount { name, value });
            }
        }
        Ok(())
    }
}

impl Default for SwpParams {
    fn default() -> Self {
        Self {
            reinvestment_pct: 1.0,
            monthly_withdrawal: 25_000.0,
            annual_return: 0.07,
        }
    }
}

/// One month of the withdrawal plan
#[derive(Debug, Clone, Serialize)]
pub struct SwpRow {
    /// 1-based month after retirement
    pub month: u32,
    pub opening_corpus: f64,
    pub growth: f64,
    /// Amount actually paid (short of the target in the exhausting month)
    pub withdrawal: f64,
    pub closing_corpus: f64,
}

/// Outcome of a withdrawal plan
#[derive(Debug, Clone, Serialize)]
pub struct SwpResult {
    pub starting_corpus: f64,
    pub monthly_withdrawal: f64,
    pub horizon_months: u32,
    /// Months in which the full withdrawal was paid
    pub months_survived: u32,
    /// Corpus left at the end (0 once exhausted)
    pub remaining_corpus: f64,
    /// Whether every month of the horizon was fully paid
    pub outlives_horizon: bool,
    pub rows: Vec<SwpRow>,
}

/// Simulates a fixed monthly withdrawal against a compounding corpus
#[derive(Debug, Clone)]
pub struct SwpSimulator {
    params: SwpParams,
    monthly_rate: f64,
}

impl SwpSimulator {
    pub fn new(params: SwpParams) -> Self {
        Self {
            monthly_rate: monthly_equivalent_rate(params.annual_return),
            params,
        }
    }

    /// Reinvest the configured share of `lumpsum` and draw it down over `horizon_months`
    pub fn simulate(&self, lumpsum: f64, horizon_months: u32) -> SwpResult {
        let starting_corpus = lumpsum * self.params.reinvestment_pct;
        self.simulate_corpus(starting_corpus, horizon_months)
    }

    /// Draw down `starting_corpus` directly
    pub fn simulate_corpus(&self, starting_corpus: f64, horizon_months: u32) -> SwpResult {
        let withdrawal = self.params.monthly_withdrawal;
        let mut corpus = starting_corpus;
        let mut months_survived = 0;
        let mut rows = Vec::new();

        for month in 1..=horizon_months {
            if corpus <= 0.0 {
                break;
            }

            let growth = corpus * self.monthly_rate;
            let available = corpus + growth;
            let closing = available - withdrawal;

            if closing < 0.0 {
                rows.push(SwpRow {
                    month,
                    opening_corpus: corpus,
                    growth,
                    withdrawal: available,
                    closing_corpus: 0.0,
                });
                corpus = 0.0;
                break;
            }

            rows.push(SwpRow {
                month,
                opening_corpus: corpus,
                growth,
                withdrawal,
                closing_corpus: closing,
            });
            corpus = closing;
            months_survived += 1;
        }

        log::debug!(
            "SWP of {:.0} from {:.0}: {} of {} months funded",
            withdrawal,
            starting_corpus,
            months_survived,
            horizon_months
        );

        SwpResult {
            starting_corpus,
            monthly_withdrawal: withdrawal,
            horizon_months,
            months_survived,
            remaining_corpus: corpus.max(0.0),
            outlives_horizon: months_survived == horizon_months,
            rows,
        }
    }
}
