use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use imaging_controller::instrument::{ControllerConfig, SimpleInstrumentController};
use imaging_controller::io::{self, RunSummary};
use imaging_controller::messaging::AccessMsg;
use imaging_controller::sim::{self, presets, ConstantInputs, SimConfig, MAX_CYCLES};

/// Run the imaging controller at a fixed cadence against constant inputs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Controller parameters as JSON (overrides the scenario's parameters)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset scenario providing parameters and inputs
    #[arg(long, default_value = "rate-compliant")]
    scenario: String,

    /// Override the attitude error (MRP, applied to each component)
    #[arg(long)]
    sigma: Option<f64>,

    /// Override the body rate error magnitude, rad/s
    #[arg(long)]
    omega: Option<f64>,

    /// Report no access for the whole run
    #[arg(long)]
    no_access: bool,

    /// Control cycle period, s
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Run length, s
    #[arg(long, default_value_t = 4.0)]
    max_time: f64,

    /// Time of an external latch reset, s (repeatable)
    #[arg(long = "reset-at")]
    reset_at: Vec<f64>,

    /// Write the per-cycle log as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let Some(scenario) = presets::by_name(&args.scenario)? else {
        bail!(
            "unknown scenario '{}' (available: {})",
            args.scenario,
            presets::NAMES.join(", ")
        );
    };

    // -----------------------------------------------------------------------
    // Configuration: validated before the loop starts
    // -----------------------------------------------------------------------
    let config = match &args.config {
        Some(path) => ControllerConfig::from_json_file(path)
            .with_context(|| format!("invalid controller configuration {}", path.display()))?,
        None => scenario.config.clone(),
    };

    let sim_config = SimConfig { dt: args.dt, max_time: args.max_time };
    if !(sim_config.dt > 0.0 && sim_config.dt.is_finite()) {
        bail!("cycle period must be positive and finite, got {}", sim_config.dt);
    }
    if !(sim_config.max_time >= 0.0 && sim_config.max_time.is_finite()) {
        bail!("run length must be non-negative and finite, got {}", sim_config.max_time);
    }
    if sim_config.exceeds_cycle_cap() {
        bail!(
            "run of {} s at dt={} s exceeds {} cycles",
            sim_config.max_time,
            sim_config.dt,
            MAX_CYCLES
        );
    }

    let mut guid = scenario.inputs.att_guid.read_latest().unwrap_or_default();
    if let Some(sigma) = args.sigma {
        guid.sigma_br = nalgebra::Vector3::repeat(sigma);
    }
    if let Some(omega) = args.omega {
        guid.omega_br_b = nalgebra::Vector3::new(omega, 0.0, 0.0);
    }
    let mut inputs = ConstantInputs::new(AccessMsg { has_access: !args.no_access }, guid);

    info!(
        "scenario {}: att_tol={} rate_tol={} use_rate={} metric={:?}",
        scenario.name,
        config.attitude_error_tolerance(),
        config.rate_error_tolerance(),
        config.use_rate_tolerance(),
        config.attitude_metric(),
    );

    // -----------------------------------------------------------------------
    // Run
    // -----------------------------------------------------------------------
    let mut controller = SimpleInstrumentController::new(config.clone());
    let records = sim::simulate_with(&sim_config, &mut controller, &mut inputs, &args.reset_at);
    let summary = RunSummary::from_records(&records);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  IMAGING CONTROLLER RUN — {}", scenario.name);
    println!("====================================================================");
    println!(
        "  att tol: {:>8.4}   rate tol: {:>8.4} rad/s   rate check: {}",
        config.attitude_error_tolerance(),
        config.rate_error_tolerance(),
        if config.use_rate_tolerance() { "on" } else { "off" }
    );
    println!();
    println!(
        "  {:>7}  {:>6}  {:>9}  {:>9}  {:>8}  {:>6}",
        "t (s)", "access", "|sigma|", "|omega|", "activate", "imaged"
    );
    println!("  {}", "─".repeat(56));
    for r in &records {
        let g = r.inputs.att_guid;
        println!(
            "  {:>7.2}  {:>6}  {:>9.5}  {:>9.5}  {:>8}  {:>6}{}",
            r.time,
            r.inputs.has_access().map_or("-".to_string(), |a| a.to_string()),
            g.map_or(f64::NAN, |g| g.sigma_br.norm()),
            g.map_or(f64::NAN, |g| g.omega_br_b.norm()),
            r.command.as_u8(),
            r.imaged,
            if r.reset_applied { "   (reset)" } else { "" },
        );
    }
    println!();
    println!(
        "  Activations: {}   Degraded cycles: {}   Final latch: {}",
        summary.activations, summary.degraded_cycles, summary.final_imaged
    );
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        io::write_cycles_file(path, &records)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("cycle log written to {}", path.display());
    }
    if let Some(path) = &args.json {
        io::write_summary_file(path, &config, &summary)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}
