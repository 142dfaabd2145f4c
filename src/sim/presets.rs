use nalgebra::Vector3;

use crate::instrument::{ConfigError, ControllerConfig};
use crate::messaging::{AccessMsg, AttGuidMsg};
use super::source::ConstantInputs;

/// Ground reset applied between the second and third second of the 1 Hz run.
pub const HARNESS_RESETS: [f64; 1] = [2.5];

/// Attitude error tolerance shared by every preset.
const ATT_ERR_TOLERANCE: f64 = 0.1;

pub const NAMES: [&str; 4] = [
    "rate-disabled",
    "rate-disabled-noncompliant",
    "rate-compliant",
    "rate-noncompliant",
];

/// A controller configuration paired with constant qualifying-access inputs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub config: ControllerConfig,
    pub inputs: ConstantInputs,
    pub expect_imaging: bool,
}

fn scenario(
    name: &'static str,
    use_rate: bool,
    rate_tolerance: f64,
    omega_mag: f64,
    expect_imaging: bool,
) -> Result<Scenario, ConfigError> {
    Ok(Scenario {
        name,
        config: ControllerConfig::new(ATT_ERR_TOLERANCE, rate_tolerance, use_rate)?,
        inputs: ConstantInputs::new(
            AccessMsg { has_access: true },
            AttGuidMsg::new(Vector3::new(0.01, 0.01, 0.01), Vector3::new(omega_mag, 0.0, 0.0)),
        ),
        expect_imaging,
    })
}

pub fn rate_disabled() -> Result<Scenario, ConfigError> {
    scenario("rate-disabled", false, 0.0, 0.0, true)
}

pub fn rate_disabled_noncompliant() -> Result<Scenario, ConfigError> {
    scenario("rate-disabled-noncompliant", false, 0.01, 0.1, true)
}

pub fn rate_compliant() -> Result<Scenario, ConfigError> {
    scenario("rate-compliant", true, 0.01, 0.001, true)
}

pub fn rate_noncompliant() -> Result<Scenario, ConfigError> {
    scenario("rate-noncompliant", true, 0.01, 0.1, false)
}

pub fn all() -> Result<Vec<Scenario>, ConfigError> {
    Ok(vec![
        rate_disabled()?,
        rate_disabled_noncompliant()?,
        rate_compliant()?,
        rate_noncompliant()?,
    ])
}

pub fn by_name(name: &str) -> Result<Option<Scenario>, ConfigError> {
    Ok(all()?.into_iter().find(|s| s.name == name))
}
