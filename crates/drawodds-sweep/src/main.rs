use std::path::PathBuf;

use clap::Parser;

use drawodds_core::model::KeepMode;
use drawodds_sweep::config::{ResolvedOutputs, SweepConfig};
use drawodds_sweep::logging::init_logging;
use drawodds_sweep::runner::SweepRunner;

/// Parameter sweep over the draw-probability model.
#[derive(Debug, Parser)]
#[command(
    name = "drawodds-sweep",
    author,
    version,
    about = "Tabulate and chart the probability of drawing a target card"
)]
struct Cli {
    /// Path to the YAML sweep description.
    #[arg(short, long, value_name = "FILE", default_value = "sweeps/keep.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the opening-hand policy (keep | no_keep).
    #[arg(long, value_name = "POLICY")]
    policy: Option<KeepMode>,

    /// Exit after validating the configuration (no sweep is run).
    #[arg(long)]
    validate_only: bool,

    /// Cross-check the zero-hit ratio against the hypergeometric pmf first.
    #[arg(long)]
    verify: bool,

    /// Skip chart rendering.
    #[arg(long)]
    no_plot: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SweepConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(policy) = cli.policy {
        config.model.policy = Some(policy);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let variant = config.model.variant()?;
    let rows = config.targets.max - config.targets.min + 1;
    let columns = config.axis.max - config.axis.min + 1;

    println!(
        "Loaded sweep '{run_id}' for {variant}: {rows} target count{} × {columns} {} value{}",
        if rows == 1 { "" } else { "s" },
        config.axis.param.as_str(),
        if columns == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs)?;
    let runner = SweepRunner::new(config, outputs)?
        .with_verification(cli.verify)
        .with_plot(!cli.no_plot);

    if cli.validate_only {
        println!("Validation-only mode: sweep skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Sweep complete for '{run_id}': {} rows at {}",
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    println!(
        "Cache: {} hits, {} misses",
        summary.cache.hits, summary.cache.misses
    );
    if let Some(report) = summary.verification.as_ref() {
        println!(
            "Hypergeometric check: {} cases, max abs error {:.3e}",
            report.checked, report.max_abs_error
        );
    }
    if let Some(plot_path) = summary.plot_path.as_ref() {
        println!("Surface plot: {}", plot_path.display());
    }
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
