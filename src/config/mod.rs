//! Run configuration: caller inputs with defaults and their validated form

mod inputs;

pub use inputs::{RunPlan, SimulationInputs};
