use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },

    #[error("missing required parameter {0}")]
    Missing(&'static str),

    #[error("malformed controller configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot read controller configuration: {0}")]
    Io(#[from] std::io::Error),
}

fn check_tolerance(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Attitude error metric
// ---------------------------------------------------------------------------

/// How the 3-component MRP error is reduced to the scalar compared against
/// `attitude_error_tolerance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttitudeErrorMetric {
    /// Euclidean norm of sigma_BR (dimensionless).
    #[default]
    MrpNorm,
    /// Principal rotation angle, 4 * atan(|sigma_BR|), in radians.
    PrincipalAngle,
}

impl AttitudeErrorMetric {
    pub fn magnitude(&self, sigma_br: &Vector3<f64>) -> f64 {
        match self {
            AttitudeErrorMetric::MrpNorm => sigma_br.norm(),
            AttitudeErrorMetric::PrincipalAngle => 4.0 * sigma_br.norm().atan(),
        }
    }
}

// ---------------------------------------------------------------------------
// Controller configuration (read-only once built)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerConfig {
    attitude_error_tolerance: f64,
    rate_error_tolerance: f64,
    use_rate_tolerance: bool,
    attitude_metric: AttitudeErrorMetric,
}

impl ControllerConfig {
    pub fn new(
        attitude_error_tolerance: f64,
        rate_error_tolerance: f64,
        use_rate_tolerance: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            attitude_error_tolerance: check_tolerance(
                "attitude_error_tolerance",
                attitude_error_tolerance,
            )?,
            rate_error_tolerance: check_tolerance("rate_error_tolerance", rate_error_tolerance)?,
            use_rate_tolerance,
            attitude_metric: AttitudeErrorMetric::MrpNorm,
        })
    }

    pub fn with_metric(mut self, metric: AttitudeErrorMetric) -> Self {
        self.attitude_metric = metric;
        self
    }

    /// Parse and validate a JSON parameter set.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        raw.validate()
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn attitude_error_tolerance(&self) -> f64 {
        self.attitude_error_tolerance
    }

    pub fn rate_error_tolerance(&self) -> f64 {
        self.rate_error_tolerance
    }

    pub fn use_rate_tolerance(&self) -> bool {
        self.use_rate_tolerance
    }

    pub fn attitude_metric(&self) -> AttitudeErrorMetric {
        self.attitude_metric
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            attitude_error_tolerance: 0.1,
            rate_error_tolerance: 0.01,
            use_rate_tolerance: true,
            attitude_metric: AttitudeErrorMetric::MrpNorm,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    attitude_error_tolerance: Option<f64>,
    rate_error_tolerance: Option<f64>,
    #[serde(default)]
    use_rate_tolerance: bool,
    #[serde(default)]
    attitude_metric: AttitudeErrorMetric,
}

impl RawConfig {
    fn validate(self) -> Result<ControllerConfig, ConfigError> {
        let att = self
            .attitude_error_tolerance
            .ok_or(ConfigError::Missing("attitude_error_tolerance"))?;
        // An enabled rate check needs an explicit tolerance
        let rate = match (self.rate_error_tolerance, self.use_rate_tolerance) {
            (Some(rate), _) => rate,
            (None, true) => return Err(ConfigError::Missing("rate_error_tolerance")),
            (None, false) => 0.0,
        };
        Ok(ControllerConfig::new(att, rate, self.use_rate_tolerance)?
            .with_metric(self.attitude_metric))
    }
}

// ---------------------------------------------------------------------------
// Config builder
// ---------------------------------------------------------------------------

pub struct ConfigBuilder {
    attitude_error_tolerance: Option<f64>,
    rate_error_tolerance: Option<f64>,
    use_rate_tolerance: bool,
    attitude_metric: AttitudeErrorMetric,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            attitude_error_tolerance: None,
            rate_error_tolerance: None,
            use_rate_tolerance: false,
            attitude_metric: AttitudeErrorMetric::MrpNorm,
        }
    }

    pub fn attitude_error_tolerance(mut self, v: f64) -> Self {
        self.attitude_error_tolerance = Some(v);
        self
    }

    /// Sets the rate tolerance and enables the rate check.
    pub fn rate_error_tolerance(mut self, v: f64) -> Self {
        self.rate_error_tolerance = Some(v);
        self.use_rate_tolerance = true;
        self
    }

    pub fn use_rate_tolerance(mut self, v: bool) -> Self {
        self.use_rate_tolerance = v;
        self
    }

    pub fn attitude_metric(mut self, v: AttitudeErrorMetric) -> Self {
        self.attitude_metric = v;
        self
    }

    pub fn build(self) -> Result<ControllerConfig, ConfigError> {
        RawConfig {
            attitude_error_tolerance: self.attitude_error_tolerance,
            rate_error_tolerance: self.rate_error_tolerance,
            use_rate_tolerance: self.use_rate_tolerance,
            attitude_metric: self.attitude_metric,
        }
        .validate()
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
