use crate::messaging::{AccessMsg, AttGuidMsg, ControlInputs, DeviceStatusMsg, MessageSlot};

/// Supplies the latest delivered inputs at each cycle time.
pub trait InputSource {
    fn inputs(&mut self, time: f64) -> ControlInputs;
}

// ---------------------------------------------------------------------------
// Constant inputs: messages written once before the run, read every cycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ConstantInputs {
    pub access: MessageSlot<AccessMsg>,
    pub att_guid: MessageSlot<AttGuidMsg>,
    pub device_status: MessageSlot<DeviceStatusMsg>,
}

impl ConstantInputs {
    pub fn new(access: AccessMsg, att_guid: AttGuidMsg) -> Self {
        Self {
            access: MessageSlot::written(access),
            att_guid: MessageSlot::written(att_guid),
            device_status: MessageSlot::new(),
        }
    }
}

impl InputSource for ConstantInputs {
    fn inputs(&mut self, _time: f64) -> ControlInputs {
        ControlInputs {
            access: self.access.read_latest(),
            att_guid: self.att_guid.read_latest(),
            device_status: self.device_status.read_latest(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted inputs: inputs as a function of time
// ---------------------------------------------------------------------------

pub struct ScriptedInputs<F: FnMut(f64) -> ControlInputs> {
    script: F,
}

impl<F: FnMut(f64) -> ControlInputs> ScriptedInputs<F> {
    pub fn new(script: F) -> Self {
        Self { script }
    }
}

impl<F: FnMut(f64) -> ControlInputs> InputSource for ScriptedInputs<F> {
    fn inputs(&mut self, time: f64) -> ControlInputs {
        (self.script)(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_inputs_repeat() {
        let mut src = ConstantInputs::new(AccessMsg { has_access: true }, AttGuidMsg::default());
        let a = src.inputs(0.0);
        let b = src.inputs(5.0);
        assert_eq!(a, b);
        assert_eq!(a.has_access(), Some(true));
        assert!(a.device_status.is_none());
    }

    #[test]
    fn scripted_inputs_follow_time() {
        let mut src = ScriptedInputs::new(|t| ControlInputs {
            access: Some(AccessMsg { has_access: t >= 2.0 }),
            ..ControlInputs::default()
        });
        assert_eq!(src.inputs(1.0).has_access(), Some(false));
        assert_eq!(src.inputs(2.0).has_access(), Some(true));
    }
}
