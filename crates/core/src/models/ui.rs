use serde::{Deserialize, Serialize};

/// Coins offered by the selector. Any other CoinGecko id is accepted as well.
pub const DEFAULT_COINS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "solana",
    "cardano",
    "dogecoin",
    "ripple",
    "litecoin",
    "polkadot",
];

/// Visual theme of the page / terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Glyph shown on the toggle control: what a click switches to.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// CSS class applied to the page body, if any.
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark-mode"),
        }
    }
}

/// Where the view is in its fetch/render cycle.
///
/// Idle → Loading → Displayed | Error. A settled state returns to Idle when
/// the next action starts, then moves on to Loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Displayed,
    Error,
}

impl ViewState {
    /// `Displayed` or `Error`: the outcome of the last action.
    pub fn is_settled(self) -> bool {
        matches!(self, ViewState::Displayed | ViewState::Error)
    }
}
