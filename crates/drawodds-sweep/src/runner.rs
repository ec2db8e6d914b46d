use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use drawodds_core::model::ModelVariant;
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::cache::{CacheStats, ProbabilityCache};
use crate::config::{ResolvedOutputs, SweepConfig, ValidationError};
use crate::logging::telemetry_dir;
use crate::plot::render_surface_plot;
use crate::surface::{Surface, SurfaceSpec};
use crate::verify::{DEFAULT_TOLERANCE, VerificationReport, VerifyError, verify_zero_hit_ratio};

/// Primary entry point for evaluating a configured sweep.
pub struct SweepRunner {
    config: SweepConfig,
    outputs: ResolvedOutputs,
    variant: ModelVariant,
    verify: bool,
    render_plot: bool,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub surface: Surface,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub telemetry_path: Option<PathBuf>,
    pub cache: CacheStats,
    pub verification: Option<VerificationReport>,
}

impl SweepRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: SweepConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let variant = config.model.variant()?;
        Ok(Self {
            config,
            outputs,
            variant,
            verify: false,
            render_plot: true,
        })
    }

    /// Cross-check the ratio engine against statrs before sweeping.
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_plot(mut self, render_plot: bool) -> Self {
        self.render_plot = render_plot;
        self
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Evaluate the surface and write JSONL rows, the Markdown summary and the plot.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        let verification = if self.verify {
            let report = verify_zero_hit_ratio()?;
            if !report.within(DEFAULT_TOLERANCE) {
                return Err(RunnerError::Verification {
                    max_abs_error: report.max_abs_error,
                    tolerance: DEFAULT_TOLERANCE,
                });
            }
            event!(
                target: "drawodds_sweep::verify",
                Level::INFO,
                checked = report.checked,
                max_abs_error = report.max_abs_error,
            );
            Some(report)
        } else {
            None
        };

        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut cache = ProbabilityCache::new(self.config.cache.capacity);
        let surface = Surface::compute(&self.surface_spec(), &mut cache);
        let cache_stats = cache.stats();

        event!(
            target: "drawodds_sweep::surface",
            Level::INFO,
            run_id = %self.config.run_id,
            variant = %self.variant,
            param = surface.param.as_str(),
            cells = surface.cell_count(),
            cache_hits = cache_stats.hits,
            cache_misses = cache_stats.misses,
        );

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let rows_written = write_surface_rows(&mut writer, &self.config.run_id, &surface)?;
        writer.flush()?;

        let markdown = render_summary(&self.config.run_id, &surface, cache_stats, verification);
        fs::write(&self.outputs.summary_md, markdown)?;

        let plot_path = if self.render_plot {
            match render_surface_plot(&surface, &self.outputs.plots_dir) {
                Ok(path) => Some(path),
                Err(err) => {
                    event!(
                        target: "drawodds_sweep::plot",
                        Level::WARN,
                        error = %err,
                    );
                    eprintln!("WARN: {err}");
                    None
                }
            }
        } else {
            None
        };

        let telemetry_path = self
            .config
            .logging
            .enable_structured
            .then(|| telemetry_dir(&self.outputs).join("telemetry.jsonl"));

        Ok(RunSummary {
            surface,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            plot_path,
            telemetry_path,
            cache: cache_stats,
            verification,
        })
    }

    fn surface_spec(&self) -> SurfaceSpec {
        SurfaceSpec {
            variant: self.variant,
            param: self.config.axis.param,
            targets: self.config.targets.values(),
            axis: self.config.axis.range().values(),
            fixed_mulligans: self.config.fixed.mulligans,
            fixed_later_draws: self.config.fixed.later_draws,
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct SurfaceRow<'a> {
    run_id: &'a str,
    variant: &'static str,
    policy: &'static str,
    targets: i64,
    mulligans: i64,
    later_draws: i64,
    probability: f64,
}

fn write_surface_rows<W: Write>(
    writer: &mut W,
    run_id: &str,
    surface: &Surface,
) -> Result<usize, RunnerError> {
    let mut rows_written = 0usize;
    for cell in surface.cells() {
        let row = SurfaceRow {
            run_id,
            variant: surface.variant.as_str(),
            policy: surface.variant.policy().as_str(),
            targets: cell.targets,
            mulligans: cell.mulligans,
            later_draws: cell.later_draws,
            probability: cell.probability,
        };
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }
    Ok(rows_written)
}

fn render_summary(
    run_id: &str,
    surface: &Surface,
    cache: CacheStats,
    verification: Option<VerificationReport>,
) -> String {
    let mut output = String::new();
    output.push_str("# Draw Probability Surface\n\n");
    let _ = writeln!(output, "- Run: `{run_id}`");
    let _ = writeln!(
        output,
        "- Model: {} ({})",
        surface.variant,
        surface.variant.policy().label()
    );
    let _ = writeln!(output, "- {}: {}", surface.fixed_label(), surface.fixed);
    let _ = writeln!(
        output,
        "- Cache: {} hits, {} misses, {} entries",
        cache.hits, cache.misses, cache.entries
    );
    if let Some(report) = verification {
        let _ = writeln!(
            output,
            "- Hypergeometric check: {} cases, max abs error {:.3e}",
            report.checked, report.max_abs_error
        );
    }
    output.push('\n');
    output.push_str(&surface.render_markdown_table());
    output
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ValidationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error(
        "zero-hit ratio deviates from the hypergeometric pmf by {max_abs_error:e} (tolerance {tolerance:e})"
    )]
    Verification { max_abs_error: f64, tolerance: f64 },
}
