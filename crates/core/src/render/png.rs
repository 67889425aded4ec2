use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartKind, Dataset, Rgba};
use crate::models::settings::Settings;
use crate::models::ui::Theme;
use super::traits::ChartSurface;

/// Upper bound on date labels along the x axis; the rest are skipped.
const MAX_X_LABELS: usize = 8;

/// Renders charts into a PNG file with `plotters`.
///
/// The file at `path` is the "canvas": drawing writes it, destroying the
/// handle deletes it.
pub struct PngSurface {
    path: PathBuf,
    width: u32,
    height: u32,
    theme: Theme,
    drawn: usize,
}

/// Handle to a chart currently written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PngChart {
    pub path: PathBuf,
    pub kind: ChartKind,
    /// Sequence number of the draw that produced this file
    pub id: usize,
}

impl PngSurface {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
            theme: Theme::Light,
            drawn: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut surface = Self::new(&settings.output_path, settings.chart_width, settings.chart_height);
        surface.theme = settings.theme;
        surface
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Number of charts drawn over the surface's lifetime.
    pub fn charts_drawn(&self) -> usize {
        self.drawn
    }
}

impl ChartSurface for PngSurface {
    type Handle = PngChart;

    fn draw(&mut self, config: &ChartConfig) -> Result<PngChart, CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let colors = ThemeColors::for_theme(self.theme);

        {
            let root = BitMapBackend::new(&self.path, (self.width, self.height)).into_drawing_area();
            root.fill(&colors.background).map_err(render_err)?;

            match config.kind {
                ChartKind::Pie => draw_pie(&root, config, &colors)?,
                ChartKind::Line | ChartKind::Bar => draw_cartesian(&root, config, &colors)?,
            }

            root.present().map_err(render_err)?;
        }

        self.drawn += 1;
        debug!(path = %self.path.display(), kind = %config.kind, "chart written");
        Ok(PngChart {
            path: self.path.clone(),
            kind: config.kind,
            id: self.drawn,
        })
    }

    fn destroy(&mut self, handle: PngChart) {
        if let Err(e) = std::fs::remove_file(&handle.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %handle.path.display(), error = %e, "failed to remove previous chart");
            }
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

struct ThemeColors {
    background: RGBColor,
    foreground: RGBColor,
    grid: RGBColor,
}

impl ThemeColors {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: WHITE,
                foreground: RGBColor(0x33, 0x33, 0x33),
                grid: RGBColor(0xdd, 0xdd, 0xdd),
            },
            Theme::Dark => Self {
                background: RGBColor(0x1e, 0x1e, 0x1e),
                foreground: RGBColor(0xee, 0xee, 0xee),
                grid: RGBColor(0x44, 0x44, 0x44),
            },
        }
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> CoreError {
    CoreError::Render(e.to_string())
}

fn to_rgb(color: Rgba) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn first_dataset(config: &ChartConfig) -> Result<&Dataset, CoreError> {
    config
        .datasets
        .first()
        .ok_or_else(|| CoreError::Render("Chart has no dataset".into()))
}

fn draw_cartesian(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    config: &ChartConfig,
    colors: &ThemeColors,
) -> Result<(), CoreError> {
    let dataset = first_dataset(config)?;
    let is_bar = config.kind == ChartKind::Bar;
    let n = dataset.data.len();

    let (min_price, max_price) = dataset
        .data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    let (y_min, y_max) = if n == 0 {
        (0.0, 1.0)
    } else {
        let padding = (max_price - min_price).max(1e-8) * 0.1;
        let lower = if is_bar { 0.0 } else { (min_price - padding).max(0.0) };
        (lower, max_price + padding)
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&dataset.label, ("sans-serif", 28).into_font().color(&colors.foreground))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5f64..(n.max(1) as f64 - 0.5), y_min..y_max)
        .map_err(render_err)?;

    // Ticks land on point indices; anything between two points stays blank.
    let labels = &config.labels;
    let x_formatter = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    };
    let y_formatter = |y: &f64| format!("{y:.2}");

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(n.clamp(1, MAX_X_LABELS))
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(("sans-serif", 12).into_font().color(&colors.foreground))
            .axis_desc_style(("sans-serif", 14).into_font().color(&colors.foreground))
            .axis_style(colors.foreground.stroke_width(1))
            .bold_line_style(colors.grid.stroke_width(1))
            .light_line_style(colors.grid.mix(0.4).stroke_width(1));
        if let Some(scales) = &config.options.scales {
            mesh.x_desc(scales.x_title.as_str()).y_desc(scales.y_title.as_str());
        }
        mesh.draw().map_err(render_err)?;
    }

    let points: Vec<(f64, f64)> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(i, &price)| (i as f64, price))
        .collect();
    let border = to_rgb(dataset.border_color);
    let fill_color = dataset.background_color.first().copied().unwrap_or(dataset.border_color);
    let fill = to_rgb(fill_color).mix(fill_color.a);

    let series = if is_bar {
        chart.draw_series(points.iter().map(|&(x, y)| {
            Rectangle::new([(x - 0.35, y_min), (x + 0.35, y)], fill.filled())
        }))
    } else if dataset.fill {
        chart.draw_series(
            AreaSeries::new(points.iter().copied(), y_min, fill.filled())
                .border_style(border.stroke_width(2)),
        )
    } else {
        chart.draw_series(LineSeries::new(points.iter().copied(), border.stroke_width(2)))
    }
    .map_err(render_err)?;
    series
        .label(dataset.label.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], border.filled()));

    if is_bar {
        chart
            .draw_series(points.iter().map(|&(x, y)| {
                Rectangle::new([(x - 0.35, y_min), (x + 0.35, y)], border.stroke_width(1))
            }))
            .map_err(render_err)?;
    } else if dataset.point_radius > 0 {
        let radius = dataset.point_radius as i32;
        chart
            .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), radius, border.filled())))
            .map_err(render_err)?;
    }

    if config.options.legend_display {
        chart
            .configure_series_labels()
            .background_style(colors.background.mix(0.8).filled())
            .border_style(colors.foreground.stroke_width(1))
            .label_font(("sans-serif", 14).into_font().color(&colors.foreground))
            .draw()
            .map_err(render_err)?;
    }

    Ok(())
}

fn draw_pie(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    config: &ChartConfig,
    colors: &ThemeColors,
) -> Result<(), CoreError> {
    let dataset = first_dataset(config)?;
    let area = root
        .titled(&dataset.label, ("sans-serif", 28).into_font().color(&colors.foreground))
        .map_err(render_err)?;

    let slices = dataset.data.len().min(config.labels.len());
    let sizes = &dataset.data[..slices];
    let total: f64 = sizes.iter().sum();
    if slices == 0 || total <= 0.0 || dataset.background_color.is_empty() {
        return Ok(());
    }

    let slice_colors: Vec<RGBColor> = (0..slices)
        .map(|i| to_rgb(dataset.background_color[i % dataset.background_color.len()]))
        .collect();
    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(&center, &radius, sizes, &slice_colors, &config.labels[..slices]);
    pie.label_style(("sans-serif", 14).into_font().color(&colors.foreground));
    area.draw(&pie).map_err(render_err)?;

    Ok(())
}
