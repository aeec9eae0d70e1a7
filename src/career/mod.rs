//! Career simulation: pay progression and NPS accrual from joining to retirement

mod state;
mod engine;
mod ledger;

pub use state::{CareerState, DA_STEP, add_months, first_of_month, months_between};
pub use engine::{CareerSimulator, CareerConfig, IncrementMonth};
pub use ledger::{CareerLedger, CareerSummary, MonthlyRecord};
