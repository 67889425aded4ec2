use crate::models::ui::{Theme, ViewState};

/// The indicator elements a front end exposes to the controller.
///
/// Injected at construction; the controller never looks elements up itself.
pub trait StatusView {
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Show `Some(message)` in the error element, or hide it with `None`.
    fn set_error(&mut self, message: Option<&str>);

    /// Apply a theme and update the toggle glyph.
    fn set_theme(&mut self, theme: Theme);

    /// Follow the view state machine. Most views only need the indicators.
    fn set_state(&mut self, _state: ViewState) {}
}

/// A view with nothing to show, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatusView;

impl StatusView for NullStatusView {
    fn set_loading(&mut self, _loading: bool) {}

    fn set_error(&mut self, _message: Option<&str>) {}

    fn set_theme(&mut self, _theme: Theme) {}
}
