use serde::Serialize;

use crate::instrument::{Controller, ControllerConfig, SimpleInstrumentController};
use crate::messaging::{ControlInputs, DeviceCmdMsg};
use super::source::InputSource;

// ---------------------------------------------------------------------------
// Run configuration and per-cycle record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub dt: f64,
    pub max_time: f64,
}

/// Upper bound on cycles in one run.
pub const MAX_CYCLES: u64 = 10_000_000;

impl SimConfig {
    pub fn is_valid(&self) -> bool {
        self.dt > 0.0 && self.dt.is_finite() && self.max_time >= 0.0 && self.max_time.is_finite()
    }

    /// Cycles requested before the `MAX_CYCLES` cap, or `None` past the cap.
    fn requested_cycles(&self) -> Option<u64> {
        let steps = (self.max_time / self.dt + 1e-9).floor();
        if steps >= MAX_CYCLES as f64 {
            return None;
        }
        (steps as u64).checked_add(1).filter(|&n| n <= MAX_CYCLES)
    }

    /// Whether the run would need more than `MAX_CYCLES` cycles.
    pub fn exceeds_cycle_cap(&self) -> bool {
        self.is_valid() && self.requested_cycles().is_none()
    }

    /// Number of cycles executed: t = 0, dt, 2dt, ... up to and including max_time,
    /// capped at `MAX_CYCLES`. Invalid cadence or run length gives 0.
    pub fn cycle_count(&self) -> u64 {
        if !self.is_valid() {
            return 0;
        }
        self.requested_cycles().unwrap_or(MAX_CYCLES)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 1.0,       // 1 Hz control cycle
            max_time: 4.0,
        }
    }
}

/// What the recorder saw on one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleRecord {
    pub cycle: u64,
    pub time: f64,
    pub inputs: ControlInputs,
    pub command: DeviceCmdMsg,
    pub imaged: bool,
    pub reset_applied: bool,
}

// ---------------------------------------------------------------------------
// Fixed-cadence run
// ---------------------------------------------------------------------------

/// Drive a controller at a fixed cadence.
///
/// `resets` are times at which the external authority clears the latch; each is
/// applied once, before the first cycle whose time is at or after it.
pub fn simulate_with(
    config: &SimConfig,
    controller: &mut dyn Controller,
    source: &mut dyn InputSource,
    resets: &[f64],
) -> Vec<CycleRecord> {
    let mut pending: Vec<f64> = resets.iter().copied().filter(|t| t.is_finite()).collect();
    pending.sort_by(f64::total_cmp);
    let mut next_reset = 0;

    let n = config.cycle_count();
    let mut records = Vec::with_capacity(n.min(200_000) as usize);

    for cycle in 0..n {
        let time = cycle as f64 * config.dt;

        let mut reset_applied = false;
        while next_reset < pending.len() && pending[next_reset] <= time + 1e-9 {
            controller.reset();
            reset_applied = true;
            next_reset += 1;
        }

        let inputs = source.inputs(time);
        let command = controller.update(&inputs);

        records.push(CycleRecord {
            cycle,
            time,
            inputs,
            command,
            imaged: controller.is_latched(),
            reset_applied,
        });
    }

    records
}

/// Run the simple instrument controller built from `controller_config`.
pub fn simulate(
    controller_config: &ControllerConfig,
    config: &SimConfig,
    source: &mut dyn InputSource,
    resets: &[f64],
) -> Vec<CycleRecord> {
    let mut controller = SimpleInstrumentController::new(controller_config.clone());
    simulate_with(config, &mut controller, source, resets)
}

/// Device command as the 0/1 integer stream seen by a message recorder.
pub fn command_trace(records: &[CycleRecord]) -> Vec<u8> {
    records.iter().map(|r| r.command.as_u8()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
