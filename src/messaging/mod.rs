pub mod payloads;
pub mod slot;

pub use payloads::{AccessMsg, AttGuidMsg, ControlInputs, DeviceCmdMsg, DeviceStatusMsg};
pub use slot::MessageSlot;
