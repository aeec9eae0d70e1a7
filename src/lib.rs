//! Pension System - Month-by-month salary and pension projection for government employees
//!
//! This library provides:
//! - Reference data: the 7th CPC pay matrix and the DA notification history
//! - Future pay commission matrices derived by fitment factor
//! - Career simulation with DA, increments, promotions and NPS accrual
//! - UPS pension vs NPS annuity projection after retirement
//! - Systematic withdrawal plans on the retirement lumpsums

pub mod error;
pub mod reference;
pub mod cpc;
pub mod career;
pub mod pension;
pub mod swp;
pub mod config;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{ConfigError, InputError, ReferenceDataError, SimulationError};
pub use reference::{CpcLabel, DaRateTable, Level, PayMatrix, ReferenceData};
pub use cpc::{CpcMatrixGenerator, CpcMatrixSet, CpcSchedule};
pub use career::{CareerConfig, CareerLedger, CareerSimulator, IncrementMonth, MonthlyRecord};
pub use pension::{PensionParams, PensionProjector, PensionResult, RetirementState};
pub use swp::{SwpParams, SwpResult, SwpSimulator};
pub use config::{RunPlan, SimulationInputs};
pub use scenario::{ComparisonReport, RunSummary, ScenarioRunner};
