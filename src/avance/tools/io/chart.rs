use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::SegmentValue;
use plotters::element::Pie;
use plotters::prelude::*;
use tracing::{info, instrument};

use crate::avance::tools::error::{Result, ToolError};
use crate::avance::tools::frequency::FrequencyTable;

const PIE_SIZE: (u32, u32) = (800, 800);
const BAR_SIZE: (u32, u32) = (1000, 600);
const PIE_START_ANGLE: f64 = 140.0;

/// Chart flavours offered over a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
}

impl ChartKind {
    /// File name prefix of the rendered image.
    pub fn file_prefix(self) -> &'static str {
        match self {
            ChartKind::Pie => "distribucion",
            ChartKind::Bar => "frecuencia",
        }
    }

    pub fn title(self, column: &str) -> String {
        match self {
            ChartKind::Pie => format!("Distribución de {column}"),
            ChartKind::Bar => format!("Frecuencia de Valores en {column}"),
        }
    }
}

/// Location of the image for `column`: `<folder>/<prefix>_<column>.png`.
/// Path separators in the column name are replaced so the image stays inside
/// `folder`.
pub fn chart_path(folder: &Path, kind: ChartKind, column: &str) -> PathBuf {
    let column: String = column
        .chars()
        .map(|ch| if matches!(ch, '/' | '\\') { '_' } else { ch })
        .collect();
    folder.join(format!("{}_{column}.png", kind.file_prefix()))
}

/// Renders `summary` as a PNG inside `folder` and returns the image path.
#[instrument(
    level = "info",
    skip(summary),
    fields(column = %summary.column, folder = %folder.display())
)]
pub fn render_chart(summary: &FrequencyTable, kind: ChartKind, folder: &Path) -> Result<PathBuf> {
    if summary.is_empty() {
        return Err(ToolError::RenderFailed(format!(
            "column '{}' has no values to plot",
            summary.column
        )));
    }
    if !folder.is_dir() {
        return Err(ToolError::InvalidDirectory(folder.to_path_buf()));
    }

    let path = chart_path(folder, kind, &summary.column);
    let outcome = match kind {
        ChartKind::Pie => draw_pie(summary, &path),
        ChartKind::Bar => draw_bar(summary, &path),
    };
    outcome.map_err(|err| ToolError::RenderFailed(err.to_string()))?;

    info!(path = %path.display(), "chart saved");
    Ok(path)
}

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

fn slice_colors(count: usize) -> Vec<RGBColor> {
    (0..count)
        .map(|idx| {
            let (r, g, b) = Palette99::pick(idx).rgb();
            RGBColor(r, g, b)
        })
        .collect()
}

fn draw_pie(summary: &FrequencyTable, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&ChartKind::Pie.title(&summary.column), ("sans-serif", 30))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;
    let sizes: Vec<f64> = summary.entries.iter().map(|e| e.count as f64).collect();
    let labels: Vec<String> = summary.entries.iter().map(|e| e.value.to_string()).collect();
    let colors = slice_colors(sizes.len());

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(PIE_START_ANGLE);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    pie.percentages(("sans-serif", radius * 0.07).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

fn draw_bar(summary: &FrequencyTable, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, BAR_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = summary.entries.iter().map(|e| e.value.to_string()).collect();
    let max_count = summary.entries.iter().map(|e| e.count).max().unwrap_or(0) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Bar.title(&summary.column), ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0u32..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Valores")
        .y_desc("Frecuencia")
        .x_labels(labels.len())
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(idx) => labels.get(*idx).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.filled())
            .margin(8)
            .data(
                summary
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(idx, entry)| (idx, entry.count as u32)),
            ),
    )?;

    root.present()?;
    Ok(())
}
