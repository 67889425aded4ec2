use coin_chart_core::models::ui::Theme;
use coin_chart_core::ui::status::StatusView;

/// Status indicators rendered as lines on stderr.
///
/// Only transitions are printed, so repeated "hide" calls stay silent.
#[derive(Debug, Default)]
pub struct TerminalStatus {
    loading: bool,
    theme: Option<Theme>,
}

impl TerminalStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusView for TerminalStatus {
    fn set_loading(&mut self, loading: bool) {
        if loading && !self.loading {
            eprintln!("Loading...");
        }
        self.loading = loading;
    }

    fn set_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("{message}");
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        if self.theme.is_some_and(|current| current != theme) {
            let name = match theme {
                Theme::Light => "light",
                Theme::Dark => "dark",
            };
            eprintln!("Theme: {name} (toggle: {})", theme.toggle_glyph());
        }
        self.theme = Some(theme);
    }
}
