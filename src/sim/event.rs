use serde::Serialize;

use super::runner::CycleRecord;

// ---------------------------------------------------------------------------
// Controller events
// ---------------------------------------------------------------------------

/// Kinds of events seen across a controller run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventKind {
    AccessAcquired,
    AccessLost,
    Activated,
    LatchReset,
    DegradedInput,
}

/// A discrete event at one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerEvent {
    pub cycle: u64,
    pub time: f64,
    pub kind: EventKind,
}

/// Trait for passive event detectors.
/// Implementations inspect consecutive records and report events.
pub trait EventDetector {
    fn check(&mut self, prev: Option<&CycleRecord>, current: &CycleRecord) -> Option<EventKind>;
}

/// Detects access window edges. Absent access counts as no access.
pub struct AccessEdgeDetector;

impl EventDetector for AccessEdgeDetector {
    fn check(&mut self, prev: Option<&CycleRecord>, current: &CycleRecord) -> Option<EventKind> {
        let was = prev.is_some_and(|p| p.inputs.has_access() == Some(true));
        let is = current.inputs.has_access() == Some(true);
        match (was, is) {
            (false, true) => Some(EventKind::AccessAcquired),
            (true, false) => Some(EventKind::AccessLost),
            _ => None,
        }
    }
}

/// Detects cycles that issued an activation command.
pub struct ActivationDetector;

impl EventDetector for ActivationDetector {
    fn check(&mut self, _prev: Option<&CycleRecord>, current: &CycleRecord) -> Option<EventKind> {
        current.command.activate.then_some(EventKind::Activated)
    }
}

/// Detects an external reset that actually cleared a set latch.
pub struct LatchResetDetector;

impl EventDetector for LatchResetDetector {
    fn check(&mut self, prev: Option<&CycleRecord>, current: &CycleRecord) -> Option<EventKind> {
        let was_latched = prev.is_some_and(|p| p.imaged);
        (current.reset_applied && was_latched).then_some(EventKind::LatchReset)
    }
}

/// Detects the first cycle of each run of missing access or guidance input.
pub struct DegradedInputDetector {
    in_outage: bool,
}

impl DegradedInputDetector {
    pub fn new() -> Self {
        Self { in_outage: false }
    }
}

impl Default for DegradedInputDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDetector for DegradedInputDetector {
    fn check(&mut self, _prev: Option<&CycleRecord>, current: &CycleRecord) -> Option<EventKind> {
        let missing = current.inputs.access.is_none() || current.inputs.att_guid.is_none();
        let fired = missing && !self.in_outage;
        self.in_outage = missing;
        fired.then_some(EventKind::DegradedInput)
    }
}

/// Run the standard detectors over a recorded run, in cycle order.
pub fn detect_events(records: &[CycleRecord]) -> Vec<ControllerEvent> {
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(DegradedInputDetector::new()),
        Box::new(AccessEdgeDetector),
        Box::new(LatchResetDetector),
        Box::new(ActivationDetector),
    ];

    let mut events = Vec::new();
    let mut prev: Option<&CycleRecord> = None;
    for rec in records {
        for det in detectors.iter_mut() {
            if let Some(kind) = det.check(prev, rec) {
                events.push(ControllerEvent { cycle: rec.cycle, time: rec.time, kind });
            }
        }
        prev = Some(rec);
    }
    events
}
