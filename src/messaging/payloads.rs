use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input payloads
// ---------------------------------------------------------------------------

/// Ground-location access, produced by the access-geometry computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessMsg {
    pub has_access: bool,
}

/// Attitude guidance error relative to the imaging reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttGuidMsg {
    pub sigma_br: Vector3<f64>,   // MRP attitude error, body relative to reference
    pub omega_br_b: Vector3<f64>, // rad/s, body rate error in body frame
}

impl AttGuidMsg {
    pub fn new(sigma_br: Vector3<f64>, omega_br_b: Vector3<f64>) -> Self {
        Self { sigma_br, omega_br_b }
    }
}

impl Default for AttGuidMsg {
    fn default() -> Self {
        Self {
            sigma_br: Vector3::zeros(),
            omega_br_b: Vector3::zeros(),
        }
    }
}

/// Health of the commanded device. `false` means the device must not be commanded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatusMsg {
    pub device_status: bool,
}

// ---------------------------------------------------------------------------
// Output payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCmdMsg {
    pub activate: bool,
}

impl DeviceCmdMsg {
    pub const IDLE: DeviceCmdMsg = DeviceCmdMsg { activate: false };

    /// Integer form used on the device bus (1 = activate).
    pub fn as_u8(&self) -> u8 {
        u8::from(self.activate)
    }
}

// ---------------------------------------------------------------------------
// Per-cycle input bundle
// ---------------------------------------------------------------------------

/// Latest delivered value of every controller input for one cycle.
/// `None` means nothing has been written on that input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInputs {
    pub access: Option<AccessMsg>,
    pub att_guid: Option<AttGuidMsg>,
    pub device_status: Option<DeviceStatusMsg>,
}

impl ControlInputs {
    pub fn new(access: AccessMsg, att_guid: AttGuidMsg) -> Self {
        Self {
            access: Some(access),
            att_guid: Some(att_guid),
            device_status: None,
        }
    }

    pub fn with_device_status(mut self, device_status: bool) -> Self {
        self.device_status = Some(DeviceStatusMsg { device_status });
        self
    }

    pub fn has_access(&self) -> Option<bool> {
        self.access.map(|a| a.has_access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_integer_form() {
        assert_eq!(DeviceCmdMsg { activate: true }.as_u8(), 1);
        assert_eq!(DeviceCmdMsg::IDLE.as_u8(), 0);
    }

    #[test]
    fn default_inputs_are_absent() {
        let inputs = ControlInputs::default();
        assert!(inputs.access.is_none());
        assert!(inputs.att_guid.is_none());
        assert_eq!(inputs.has_access(), None);
    }

    #[test]
    fn guidance_payload_deserializes_from_json() {
        let msg: AttGuidMsg =
            serde_json::from_str(r#"{"sigma_br":[0.01,0.01,0.01],"omega_br_b":[0.1,0.0,0.0]}"#)
                .unwrap();
        assert_eq!(msg.omega_br_b, Vector3::new(0.1, 0.0, 0.0));
    }
}
