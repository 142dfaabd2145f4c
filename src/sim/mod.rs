pub mod source;
pub mod runner;
pub mod event;
pub mod presets;

pub use runner::{command_trace, simulate, simulate_with, CycleRecord, SimConfig, MAX_CYCLES};
pub use source::{ConstantInputs, InputSource, ScriptedInputs};
