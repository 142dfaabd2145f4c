pub mod messaging;
pub mod instrument;
pub mod sim;
pub mod io;

pub use instrument::{
    evaluate, ConfigBuilder, ConfigError, Controller, ControllerConfig, Decision,
    ImagingLatch, SimpleInstrumentController,
};
pub use messaging::{AccessMsg, AttGuidMsg, ControlInputs, DeviceCmdMsg, DeviceStatusMsg};
