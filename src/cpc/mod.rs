//! Pay commission cycles and per-cycle pay matrix generation

mod schedule;
mod generator;

pub use schedule::{CpcCycle, CpcSchedule, DEFAULT_CPC_YEARS};
pub use generator::{CpcMatrixGenerator, CpcMatrixSet, FitmentFactor, GeneratedCycle};
