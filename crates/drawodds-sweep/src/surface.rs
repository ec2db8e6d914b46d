use std::fmt::Write as _;
use std::ops::RangeInclusive;

use drawodds_core::model::ModelVariant;
use drawodds_core::query::ProbabilityQuery;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use crate::cache::ProbabilityCache;

/// Draw count varied along the surface's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParam {
    Mulligans,
    LaterDraws,
}

impl SweepParam {
    pub const fn as_str(self) -> &'static str {
        match self {
            SweepParam::Mulligans => "mulligans",
            SweepParam::LaterDraws => "later_draws",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SweepParam::Mulligans => "Mulligan draws",
            SweepParam::LaterDraws => "Later draws",
        }
    }

    /// `(mulligans, later_draws)` with `value` placed on this axis.
    pub const fn place(self, value: i64, fixed_mulligans: i64, fixed_later_draws: i64) -> (i64, i64) {
        match self {
            SweepParam::Mulligans => (value, fixed_later_draws),
            SweepParam::LaterDraws => (fixed_mulligans, value),
        }
    }
}

/// Inputs of one 2-D sweep: target counts down, one draw count across.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub variant: ModelVariant,
    pub param: SweepParam,
    pub targets: RangeInclusive<i64>,
    pub axis: RangeInclusive<i64>,
    pub fixed_mulligans: i64,
    pub fixed_later_draws: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceCell {
    pub targets: i64,
    pub mulligans: i64,
    pub later_draws: i64,
    pub probability: f64,
}

/// Probabilities for every (target count, axis value) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Surface {
    pub variant: ModelVariant,
    pub param: SweepParam,
    pub fixed: i64,
    pub targets: Vec<i64>,
    pub axis: Vec<i64>,
    pub rows: Vec<Vec<SurfaceCell>>,
}

impl Surface {
    pub fn compute(spec: &SurfaceSpec, cache: &mut ProbabilityCache) -> Self {
        let targets: Vec<i64> = spec.targets.clone().collect();
        let axis: Vec<i64> = spec.axis.clone().collect();

        let mut rows = Vec::with_capacity(targets.len());
        for &n in &targets {
            let row: Vec<SurfaceCell> = axis
                .iter()
                .map(|&value| {
                    let (mulligans, later_draws) =
                        spec.param
                            .place(value, spec.fixed_mulligans, spec.fixed_later_draws);
                    let query = ProbabilityQuery::new(spec.variant, n, mulligans, later_draws);
                    SurfaceCell {
                        targets: n,
                        mulligans,
                        later_draws,
                        probability: cache.probability(query),
                    }
                })
                .collect();
            event!(
                target: "drawodds_sweep::surface_row",
                Level::DEBUG,
                variant = %spec.variant,
                targets = n,
                columns = row.len(),
                last = row.last().map(|cell| cell.probability).unwrap_or(0.0),
            );
            rows.push(row);
        }

        let fixed = match spec.param {
            SweepParam::Mulligans => spec.fixed_later_draws,
            SweepParam::LaterDraws => spec.fixed_mulligans,
        };

        Self {
            variant: spec.variant,
            param: spec.param,
            fixed,
            targets,
            axis,
            rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn cells(&self) -> impl Iterator<Item = &SurfaceCell> {
        self.rows.iter().flatten()
    }

    pub fn cell(&self, targets: i64, axis_value: i64) -> Option<&SurfaceCell> {
        let row = self.targets.iter().position(|&n| n == targets)?;
        let column = self.axis.iter().position(|&v| v == axis_value)?;
        self.rows.get(row)?.get(column)
    }

    /// Label of the draw count held constant across the surface.
    pub fn fixed_label(&self) -> &'static str {
        match self.param {
            SweepParam::Mulligans => SweepParam::LaterDraws.label(),
            SweepParam::LaterDraws => SweepParam::Mulligans.label(),
        }
    }

    /// Markdown grid: target counts as row headers, axis values as columns,
    /// probabilities as percentages.
    pub fn render_markdown_table(&self) -> String {
        let mut table = String::new();
        let _ = write!(table, "| Targets \\ {} |", self.param.label());
        for value in &self.axis {
            let _ = write!(table, " {value} |");
        }
        table.push('\n');
        table.push_str("|---|");
        for _ in &self.axis {
            table.push_str("---:|");
        }
        table.push('\n');

        for (n, row) in self.targets.iter().zip(&self.rows) {
            let _ = write!(table, "| {n} |");
            for cell in row {
                let _ = write!(table, " {:.1}% |", cell.probability * 100.0);
            }
            table.push('\n');
        }
        table
    }
}
