use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::instrument::ControllerConfig;
use crate::sim::event::{detect_events, ControllerEvent};
use crate::sim::CycleRecord;

/// Summary statistics computed from a controller run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub cycles: usize,
    pub duration_s: f64,
    pub activations: usize,
    pub activation_times: Vec<f64>,
    pub access_cycles: usize,
    pub degraded_cycles: usize,
    pub resets_applied: usize,
    pub final_imaged: bool,
    pub events: Vec<ControllerEvent>,
}

impl RunSummary {
    /// Compute summary from recorded cycles.
    pub fn from_records(records: &[CycleRecord]) -> Self {
        let activation_times: Vec<f64> = records
            .iter()
            .filter(|r| r.command.activate)
            .map(|r| r.time)
            .collect();

        RunSummary {
            cycles: records.len(),
            duration_s: records.last().map_or(0.0, |r| r.time),
            activations: activation_times.len(),
            activation_times,
            access_cycles: records
                .iter()
                .filter(|r| r.inputs.has_access() == Some(true))
                .count(),
            degraded_cycles: records
                .iter()
                .filter(|r| r.inputs.access.is_none() || r.inputs.att_guid.is_none())
                .count(),
            resets_applied: records.iter().filter(|r| r.reset_applied).count(),
            final_imaged: records.last().is_some_and(|r| r.imaged),
            events: detect_events(records),
        }
    }
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    controller: &'a ControllerConfig,
    run: &'a RunSummary,
}

/// Write run summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    config: &ControllerConfig,
    summary: &RunSummary,
) -> io::Result<()> {
    let doc = SummaryDocument { controller: config, run: summary };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)
}

/// Write run summary JSON to a file.
pub fn write_summary_file(
    path: impl AsRef<Path>,
    config: &ControllerConfig,
    summary: &RunSummary,
) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, config, summary)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::presets::{self, HARNESS_RESETS};
    use crate::sim::{simulate, SimConfig};

    fn harness_run() -> (ControllerConfig, Vec<CycleRecord>) {
        let mut s = presets::rate_compliant().unwrap();
        let records = simulate(&s.config, &SimConfig::default(), &mut s.inputs, &HARNESS_RESETS);
        (s.config, records)
    }

    #[test]
    fn summary_counts_activations() {
        let (_, records) = harness_run();
        let s = RunSummary::from_records(&records);
        assert_eq!(s.cycles, 5);
        assert_eq!(s.activations, 2);
        assert_eq!(s.activation_times, vec![0.0, 3.0]);
        assert_eq!(s.resets_applied, 1);
        assert_eq!(s.degraded_cycles, 0);
        assert!(s.final_imaged);
    }

    #[test]
    fn empty_run_summary() {
        let s = RunSummary::from_records(&[]);
        assert_eq!(s.cycles, 0);
        assert!(!s.final_imaged);
        assert!(s.events.is_empty());
    }

    #[test]
    fn json_output_is_valid() {
        let (config, records) = harness_run();
        let summary = RunSummary::from_records(&records);

        let mut buf = Vec::new();
        write_summary(&mut buf, &config, &summary).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["run"]["activations"], 2);
        assert_eq!(value["controller"]["use_rate_tolerance"], true);
        assert_eq!(value["controller"]["attitude_metric"], "mrp_norm");
    }
}
