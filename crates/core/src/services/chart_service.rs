use tracing::debug;

use crate::errors::CoreError;
use crate::models::chart::{ChartConfig, ChartKind, ChartOptions, Dataset, Rgba, Scales};
use crate::models::price::PricePoint;
use crate::render::traits::ChartSurface;

/// Slice colors for pie charts, assigned by index modulo the palette length.
pub const PALETTE: [Rgba; 8] = [
    Rgba::rgb(0x2a, 0xa1, 0x98),
    Rgba::rgb(0x26, 0x8b, 0xd2),
    Rgba::rgb(0xb5, 0x89, 0x00),
    Rgba::rgb(0xcb, 0x4b, 0x16),
    Rgba::rgb(0xd3, 0x36, 0x82),
    Rgba::rgb(0x6c, 0x71, 0xc4),
    Rgba::rgb(0x85, 0x99, 0x00),
    Rgba::rgb(0xdc, 0x32, 0x2f),
];

/// How many of the most recent points a pie chart shows.
pub const PIE_SLICE_COUNT: usize = 5;

pub const LINE_BORDER: Rgba = Rgba::rgb(0x2a, 0xa1, 0x98);
pub const LINE_FILL: Rgba = Rgba::rgba(42, 161, 152, 0.14);

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD)";

/// Shapes normalized price series into chart configurations.
///
/// The core decides what is drawn; surfaces only draw it.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the chart configuration for `series` drawn as `kind`.
    ///
    /// - Pie: last [`PIE_SLICE_COUNT`] points, one palette color per slice, no scales.
    /// - Line: full series, filled area, "Date" / "Price (USD)" axes.
    /// - Bar: full series, no fill, same axes.
    pub fn build_config(&self, series: &[PricePoint], kind: ChartKind, coin: &str) -> ChartConfig {
        let shown = match kind {
            ChartKind::Pie => &series[series.len().saturating_sub(PIE_SLICE_COUNT)..],
            ChartKind::Line | ChartKind::Bar => series,
        };

        let labels = shown.iter().map(|p| p.date.clone()).collect();
        let data = shown.iter().map(|p| p.price).collect();

        let background_color = match kind {
            ChartKind::Pie => (0..shown.len()).map(|i| PALETTE[i % PALETTE.len()]).collect(),
            ChartKind::Line | ChartKind::Bar => vec![LINE_FILL],
        };

        let scales = match kind {
            ChartKind::Pie => None,
            ChartKind::Line | ChartKind::Bar => Some(Scales {
                x_title: X_AXIS_TITLE.to_string(),
                y_title: Y_AXIS_TITLE.to_string(),
            }),
        };

        ChartConfig {
            kind,
            labels,
            datasets: vec![Dataset {
                label: series_label(coin),
                data,
                background_color,
                border_color: LINE_BORDER,
                fill: kind == ChartKind::Line,
                point_radius: 3,
            }],
            options: ChartOptions {
                responsive: true,
                legend_display: true,
                tooltip_enabled: true,
                scales,
            },
        }
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}

/// Dataset label: coin id with its first character upper-cased, plus " Price (USD)".
pub fn series_label(coin: &str) -> String {
    let mut chars = coin.chars();
    let name: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{name} Price (USD)")
}

/// Owns the drawing surface and the single live chart drawn on it.
pub struct ChartRenderer<S: ChartSurface> {
    surface: S,
    current: Option<S::Handle>,
    chart_service: ChartService,
}

impl<S: ChartSurface> ChartRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
            chart_service: ChartService::new(),
        }
    }

    /// Replace whatever is on screen with `series` drawn as `kind`.
    ///
    /// The previous chart is destroyed first, even if the new draw then fails,
    /// so two charts are never live at once.
    pub fn render(&mut self, series: &[PricePoint], kind: ChartKind, coin: &str) -> Result<(), CoreError> {
        if let Some(previous) = self.current.take() {
            self.surface.destroy(previous);
        }

        let config = self.chart_service.build_config(series, kind, coin);
        let handle = self.surface.draw(&config)?;
        debug!(coin, %kind, points = config.labels.len(), "chart drawn");
        self.current = Some(handle);
        Ok(())
    }

    /// Destroy the live chart, if any.
    pub fn clear(&mut self) {
        if let Some(previous) = self.current.take() {
            self.surface.destroy(previous);
        }
    }

    pub fn has_chart(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&S::Handle> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
