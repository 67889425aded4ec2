use crate::errors::CoreError;
use crate::models::chart::ChartConfig;
use crate::models::ui::Theme;

/// A drawing target that turns a declarative [`ChartConfig`] into a visible chart.
///
/// Each successful `draw` hands back a handle to the live drawing. `destroy`
/// releases it; callers destroy the old handle before drawing a new one, so at
/// most one drawing is live per surface.
pub trait ChartSurface {
    /// Identifies one live drawing.
    type Handle;

    /// Draw a new chart and return its handle.
    fn draw(&mut self, config: &ChartConfig) -> Result<Self::Handle, CoreError>;

    /// Release a drawing created by `draw`.
    fn destroy(&mut self, handle: Self::Handle);

    /// Switch colors for subsequent draws. Surfaces without theming ignore it.
    fn set_theme(&mut self, _theme: Theme) {}
}
