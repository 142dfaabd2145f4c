use log::{debug, info, warn};

use crate::messaging::{ControlInputs, DeviceCmdMsg};
use super::config::ControllerConfig;
use super::evaluator::{evaluate, Decision};
use super::latch::ImagingLatch;

/// Trait for per-cycle device controllers.
///
/// Implement this to plug a controller into the fixed-cadence runner.
pub trait Controller {
    /// Produce this cycle's device command from the latest inputs.
    fn update(&mut self, inputs: &ControlInputs) -> DeviceCmdMsg;

    /// External reset of any latched state.
    fn reset(&mut self) {}

    /// Whether the controller is currently latched, for diagnostics.
    fn is_latched(&self) -> bool {
        false
    }

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

// ---------------------------------------------------------------------------
// Simple instrument controller: access + pointing gate with an imaging latch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimpleInstrumentController {
    config: ControllerConfig,
    latch: ImagingLatch,
    last_decision: Option<Decision>,
    degraded_cycles: u64,
}

impl SimpleInstrumentController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            latch: ImagingLatch::new(),
            last_decision: None,
            degraded_cycles: 0,
        }
    }

    /// Evaluate one cycle and latch on a positive command.
    pub fn step(&mut self, inputs: &ControlInputs) -> Decision {
        let decision = evaluate(inputs, &self.config, self.latch.is_imaged());

        if let Some(missing) = decision.degraded {
            self.degraded_cycles += 1;
            warn!("{}: input unavailable ({missing:?}), holding device idle", self.name());
        }

        if decision.command.activate {
            self.latch.mark_imaged();
            info!("{}: commanding device activation", self.name());
        }

        debug!(
            "{}: access={} attitude={} rate={} device={} imaged={} -> activate={}",
            self.name(),
            decision.access_ok,
            decision.attitude_ok,
            decision.rate_ok,
            decision.device_ready,
            self.latch.is_imaged(),
            decision.command.activate,
        );

        self.last_decision = Some(decision);
        decision
    }

    pub fn is_imaged(&self) -> bool {
        self.latch.is_imaged()
    }

    /// Clear the imaging latch, typically on ground confirmation of downlink.
    pub fn reset(&mut self) {
        if self.latch.is_imaged() {
            info!("{}: imaging latch reset", self.name());
        }
        self.latch.reset();
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Number of cycles evaluated with a missing access or guidance input.
    pub fn degraded_cycles(&self) -> u64 {
        self.degraded_cycles
    }
}

impl Controller for SimpleInstrumentController {
    fn update(&mut self, inputs: &ControlInputs) -> DeviceCmdMsg {
        self.step(inputs).command
    }

    fn reset(&mut self) {
        SimpleInstrumentController::reset(self);
    }

    fn is_latched(&self) -> bool {
        self.is_imaged()
    }

    fn name(&self) -> &str {
        "SimpleInstrumentController"
    }
}
