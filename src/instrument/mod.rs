pub mod config;
pub mod latch;
pub mod evaluator;
pub mod controller;

pub use config::{AttitudeErrorMetric, ConfigBuilder, ConfigError, ControllerConfig};
pub use latch::ImagingLatch;
pub use evaluator::{evaluate, Decision, MissingInput};
pub use controller::{Controller, SimpleInstrumentController};
