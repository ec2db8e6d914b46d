use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

use crate::surface::Surface;

const SERIES_COLORS: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render plot: {0}")]
    Render(String),
}

/// Color of the series at `index`; wraps around the palette.
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Draw one line per target count into `<dir>/surface.png`.
pub fn render_surface_plot(surface: &Surface, dir: impl AsRef<Path>) -> Result<PathBuf, PlotError> {
    let dir = dir.as_ref();
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|e| PlotError::Io {
            context: "creating plots directory",
            source: e,
        })?;
    }

    let output_path = dir.join("surface.png");
    let snapshot = surface.clone();

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));

    let plot_attempt = std::panic::catch_unwind(move || {
        let root = BitMapBackend::new(&output_path, (960, 540)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| PlotError::Render(e.to_string()))?;

        let x_min = snapshot.axis.first().copied().unwrap_or(0);
        let x_max = snapshot.axis.last().copied().unwrap_or(0).max(x_min + 1);

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(
                format!("P(at least one target) - {}", snapshot.variant),
                ("sans-serif", 22),
            )
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(x_min..x_max, 0.0f64..1.0f64)
            .map_err(|e| PlotError::Render(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc(snapshot.param.label())
            .y_desc("Probability")
            .y_label_formatter(&|p| format!("{:.0}%", p * 100.0))
            .draw()
            .map_err(|e| PlotError::Render(e.to_string()))?;

        for (index, (targets, row)) in snapshot.targets.iter().zip(&snapshot.rows).enumerate() {
            let color = series_color(index);
            let points: Vec<(i64, f64)> = snapshot
                .axis
                .iter()
                .zip(row)
                .map(|(&x, cell)| (x, cell.probability))
                .collect();
            chart
                .draw_series(std::iter::once(PathElement::new(
                    points,
                    color.stroke_width(2),
                )))
                .map_err(|e| PlotError::Render(e.to_string()))?
                .label(format!("{targets} targets"))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| PlotError::Render(e.to_string()))?;

        drop(chart);

        root.present()
            .map_err(|e| PlotError::Render(e.to_string()))?;

        drop(root);

        Ok(output_path)
    });

    std::panic::set_hook(prev_hook);

    match plot_attempt {
        Ok(result) => result,
        Err(_) => Err(PlotError::Render(
            "plotters panicked while rendering (missing font support?)".into(),
        )),
    }
}
