pub mod errors;
pub mod models;
pub mod providers;
pub mod render;
pub mod services;
pub mod ui;

use models::{
    chart::ChartKind,
    price::{PriceCache, PricePoint},
    settings::Settings,
    ui::{Theme, ViewState},
};
use providers::{coingecko::CoinGeckoProvider, traits::PriceHistoryProvider};
use render::traits::ChartSurface;
use services::{chart_service::ChartRenderer, price_service::PriceService};
use tracing::{debug, warn};
use ui::status::StatusView;

use errors::{CoreError, LOAD_FAILED_MESSAGE};

/// Main entry point for the Coin Chart core library.
///
/// Owns everything a session needs: the price cache, the price service, the
/// renderer with its single live chart, and the injected status view.
/// Dropping it ends the session and discards the cache.
#[must_use]
pub struct CoinChart<S: ChartSurface, V: StatusView> {
    cache: PriceCache,
    price_service: PriceService,
    renderer: ChartRenderer<S>,
    view: V,
    theme: Theme,
    state: ViewState,
}

impl<S: ChartSurface, V: StatusView> std::fmt::Debug for CoinChart<S, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinChart")
            .field("cached_coins", &self.cache.len())
            .field("cached_points", &self.cache.total_points())
            .field("has_chart", &self.renderer.has_chart())
            .field("theme", &self.theme)
            .field("state", &self.state)
            .finish()
    }
}

impl<S: ChartSurface, V: StatusView> CoinChart<S, V> {
    /// Create a session that talks to the CoinGecko API described by `settings`.
    pub fn new(settings: &Settings, surface: S, view: V) -> Self {
        let provider = CoinGeckoProvider::from_settings(settings);
        Self::with_provider(settings, Box::new(provider), surface, view)
    }

    /// Create a session with an explicit price provider.
    pub fn with_provider(
        settings: &Settings,
        provider: Box<dyn PriceHistoryProvider>,
        surface: S,
        view: V,
    ) -> Self {
        Self::build(PriceService::new(provider, settings), settings.theme, surface, view)
    }

    /// Create a session around a ready-made price service.
    pub fn with_price_service(price_service: PriceService, theme: Theme, surface: S, view: V) -> Self {
        Self::build(price_service, theme, surface, view)
    }

    // ── Fetching ────────────────────────────────────────────────────

    /// Get the price history for `coin`, driving the loading and error indicators.
    ///
    /// The error indicator is cleared when the attempt starts; the loading
    /// indicator is on for the duration of the call and off once it settles,
    /// whatever the outcome. On failure the user-facing message is shown and
    /// the error is returned for logging.
    pub async fn get_price_history(&mut self, coin: &str) -> Result<Vec<PricePoint>, CoreError> {
        if self.state.is_settled() {
            self.set_state(ViewState::Idle);
        }
        self.view.set_error(None);
        self.view.set_loading(true);
        self.set_state(ViewState::Loading);

        let result = self.price_service.get_price_history(&mut self.cache, coin).await;

        self.view.set_loading(false);
        if let Err(e) = &result {
            warn!(coin, error = %e, "could not load price data");
            self.view.set_error(Some(LOAD_FAILED_MESSAGE));
            self.set_state(ViewState::Error);
        }
        result
    }

    /// The user action: load `coin` (cache first) and draw it as `kind`.
    ///
    /// On a failed load the chart already on screen is left alone.
    pub async fn show(&mut self, coin: &str, kind: ChartKind) -> Result<(), CoreError> {
        let series = self.get_price_history(coin).await?;
        self.render(&series, kind, coin)
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Draw `series` as `kind`, replacing the current chart.
    pub fn render(&mut self, series: &[PricePoint], kind: ChartKind, coin: &str) -> Result<(), CoreError> {
        match self.renderer.render(series, kind, coin) {
            Ok(()) => {
                self.set_state(ViewState::Displayed);
                Ok(())
            }
            Err(e) => {
                warn!(coin, %kind, error = %e, "could not draw chart");
                self.set_state(ViewState::Error);
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.renderer.has_chart()
    }

    #[must_use]
    pub fn current_chart(&self) -> Option<&S::Handle> {
        self.renderer.current()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    // ── Theme ───────────────────────────────────────────────────────

    /// Flip between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.view.set_theme(self.theme);
        self.renderer.surface_mut().set_theme(self.theme);
        self.theme
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    // ── State & View ────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    // ── Cache Management ────────────────────────────────────────────

    #[must_use]
    pub fn is_cached(&self, coin: &str) -> bool {
        self.cache.contains(coin)
    }

    /// Cached coin ids, sorted.
    #[must_use]
    pub fn cached_coins(&self) -> Vec<String> {
        self.cache.coins()
    }

    /// Get the number of coins cached.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Cached series for `coin`, without any network access.
    #[must_use]
    pub fn cached_series(&self, coin: &str) -> Option<&[PricePoint]> {
        self.cache.get(coin)
    }

    /// Drop all cached price data. The next request per coin hits the API again.
    pub fn cache_clear(&mut self) {
        self.cache.clear();
    }

    // ── Internal ────────────────────────────────────────────────────

    fn set_state(&mut self, next: ViewState) {
        debug!(from = ?self.state, to = ?next, "view state");
        self.state = next;
        self.view.set_state(next);
    }

    fn build(price_service: PriceService, theme: Theme, surface: S, mut view: V) -> Self {
        view.set_loading(false);
        view.set_error(None);
        view.set_theme(theme);
        view.set_state(ViewState::Idle);

        let mut renderer = ChartRenderer::new(surface);
        renderer.surface_mut().set_theme(theme);

        Self {
            cache: PriceCache::new(),
            price_service,
            renderer,
            view,
            theme,
            state: ViewState::Idle,
        }
    }
}
