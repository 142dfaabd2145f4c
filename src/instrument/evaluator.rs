use serde::Serialize;

use crate::messaging::{ControlInputs, DeviceCmdMsg};
use super::config::ControllerConfig;

// ---------------------------------------------------------------------------
// Decision record
// ---------------------------------------------------------------------------

/// Inputs that were absent for a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingInput {
    Access,
    AttitudeGuidance,
    AccessAndGuidance,
}

/// Outcome of one evaluation, with each gate kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    pub command: DeviceCmdMsg,
    pub imaged_after: bool,
    pub access_ok: bool,
    pub attitude_ok: bool,
    pub rate_ok: bool,
    pub device_ready: bool,
    pub degraded: Option<MissingInput>,
}

// ---------------------------------------------------------------------------
// Decision evaluator
// ---------------------------------------------------------------------------

/// Decide whether to command the device this cycle.
///
/// - access must be confirmed (an absent access message counts as no access)
/// - attitude error magnitude must be within tolerance, inclusive
/// - rate error must be within tolerance, unless the rate check is disabled
/// - the device must not report itself unavailable
/// - the latch must not already be set
///
/// An absent guidance message fails both the attitude and the rate gate.
pub fn evaluate(inputs: &ControlInputs, config: &ControllerConfig, imaged: bool) -> Decision {
    let access_ok = inputs.access.is_some_and(|a| a.has_access);

    let (attitude_ok, rate_ok) = match &inputs.att_guid {
        Some(guid) => {
            let att_err = config.attitude_metric().magnitude(&guid.sigma_br);
            let attitude_ok = att_err <= config.attitude_error_tolerance();
            let rate_ok = !config.use_rate_tolerance()
                || guid.omega_br_b.norm() <= config.rate_error_tolerance();
            (attitude_ok, rate_ok)
        }
        None => (false, false),
    };

    let device_ready = inputs.device_status.map_or(true, |s| s.device_status);

    let degraded = match (inputs.access.is_none(), inputs.att_guid.is_none()) {
        (true, true) => Some(MissingInput::AccessAndGuidance),
        (true, false) => Some(MissingInput::Access),
        (false, true) => Some(MissingInput::AttitudeGuidance),
        (false, false) => None,
    };

    let activate = access_ok && attitude_ok && rate_ok && device_ready && !imaged;

    Decision {
        command: DeviceCmdMsg { activate },
        imaged_after: imaged || activate,
        access_ok,
        attitude_ok,
        rate_ok,
        device_ready,
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::config::{AttitudeErrorMetric, ConfigBuilder};
    use crate::messaging::{AccessMsg, AttGuidMsg};
    use nalgebra::Vector3;

    fn inputs(access: bool, sigma: f64, omega: f64) -> ControlInputs {
        ControlInputs::new(
            AccessMsg { has_access: access },
            AttGuidMsg::new(Vector3::new(sigma, sigma, sigma), Vector3::new(omega, 0.0, 0.0)),
        )
    }

    fn rate_config(use_rate: bool, rate_tol: f64) -> ControllerConfig {
        ControllerConfig::new(0.1, rate_tol, use_rate).unwrap()
    }

    #[test]
    fn all_gates_pass_commands() {
        let d = evaluate(&inputs(true, 0.01, 0.001), &rate_config(true, 0.01), false);
        assert!(d.command.activate);
        assert!(d.imaged_after);
        assert_eq!(d.degraded, None);
    }

    #[test]
    fn latched_never_commands() {
        let d = evaluate(&inputs(true, 0.0, 0.0), &rate_config(true, 0.01), true);
        assert!(!d.command.activate);
        assert!(d.imaged_after, "latch is never cleared by the evaluator");
    }

    #[test]
    fn no_access_never_commands() {
        for &(sigma, omega, use_rate) in
            &[(0.0, 0.0, true), (0.0, 0.0, false), (0.01, 0.001, true), (0.5, 5.0, false)]
        {
            let d = evaluate(&inputs(false, sigma, omega), &rate_config(use_rate, 10.0), false);
            assert!(!d.command.activate);
            assert!(!d.imaged_after);
        }
    }

    #[test]
    fn attitude_tolerance_is_inclusive() {
        let cfg = ControllerConfig::new(5.0, 0.0, false).unwrap();
        let on_boundary = ControlInputs::new(
            AccessMsg { has_access: true },
            AttGuidMsg::new(Vector3::new(3.0, 4.0, 0.0), Vector3::zeros()),
        );
        assert!(evaluate(&on_boundary, &cfg, false).attitude_ok);

        let beyond = ControlInputs::new(
            AccessMsg { has_access: true },
            AttGuidMsg::new(Vector3::new(3.0, 4.0, 0.001), Vector3::zeros()),
        );
        let d = evaluate(&beyond, &cfg, false);
        assert!(!d.attitude_ok);
        assert!(!d.command.activate);
    }

    #[test]
    fn zero_tolerance_requires_exact_compliance() {
        let cfg = ControllerConfig::new(0.0, 0.0, true).unwrap();
        assert!(evaluate(&inputs(true, 0.0, 0.0), &cfg, false).command.activate);
        assert!(!evaluate(&inputs(true, 1e-12, 0.0), &cfg, false).command.activate);
        assert!(!evaluate(&inputs(true, 0.0, 1e-12), &cfg, false).command.activate);
    }

    #[test]
    fn disabled_rate_check_ignores_rate_error() {
        let cfg = rate_config(false, 0.0);
        for &omega in &[0.0, 1e-6, 0.1, 100.0, f64::MAX] {
            let d = evaluate(&inputs(true, 0.01, omega), &cfg, false);
            assert!(d.rate_ok);
            assert!(d.command.activate, "rate {omega} must not affect output");
        }
    }

    #[test]
    fn raising_rate_tolerance_past_error_enables_command() {
        let omega = 0.1;
        let below = evaluate(&inputs(true, 0.01, omega), &rate_config(true, 0.09), false);
        assert!(!below.rate_ok);
        assert!(!below.command.activate);

        let at = evaluate(&inputs(true, 0.01, omega), &rate_config(true, omega), false);
        assert!(at.rate_ok);
        assert!(at.command.activate);
    }

    #[test]
    fn missing_access_is_degraded_no_access() {
        let mut i = inputs(true, 0.0, 0.0);
        i.access = None;
        let d = evaluate(&i, &rate_config(false, 0.0), false);
        assert!(!d.access_ok);
        assert!(!d.command.activate);
        assert_eq!(d.degraded, Some(MissingInput::Access));
    }

    #[test]
    fn missing_guidance_is_degraded_no_command() {
        let mut i = inputs(true, 0.0, 0.0);
        i.att_guid = None;
        let d = evaluate(&i, &rate_config(false, 0.0), false);
        assert!(!d.command.activate);
        assert_eq!(d.degraded, Some(MissingInput::AttitudeGuidance));

        let d = evaluate(&ControlInputs::default(), &rate_config(false, 0.0), false);
        assert_eq!(d.degraded, Some(MissingInput::AccessAndGuidance));
    }

    #[test]
    fn unavailable_device_blocks_command() {
        let cfg = rate_config(false, 0.0);
        let d = evaluate(&inputs(true, 0.0, 0.0).with_device_status(false), &cfg, false);
        assert!(!d.device_ready);
        assert!(!d.command.activate);

        let d = evaluate(&inputs(true, 0.0, 0.0).with_device_status(true), &cfg, false);
        assert!(d.command.activate);
    }

    #[test]
    fn principal_angle_metric_changes_threshold_units() {
        // |sigma| = 0.05 -> ~0.2 rad principal angle
        let sigma = Vector3::new(0.05, 0.0, 0.0);
        let i = ControlInputs::new(
            AccessMsg { has_access: true },
            AttGuidMsg::new(sigma, Vector3::zeros()),
        );
        let norm_cfg = ConfigBuilder::new().attitude_error_tolerance(0.1).build().unwrap();
        assert!(evaluate(&i, &norm_cfg, false).attitude_ok);

        let angle_cfg = ConfigBuilder::new()
            .attitude_error_tolerance(0.1)
            .attitude_metric(AttitudeErrorMetric::PrincipalAngle)
            .build()
            .unwrap();
        assert!(!evaluate(&i, &angle_cfg, false).attitude_ok);
    }
}
