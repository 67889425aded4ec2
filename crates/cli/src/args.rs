use clap::Parser;

use coin_chart_core::errors::CoreError;
use coin_chart_core::models::chart::ChartKind;
use coin_chart_core::models::settings::Settings;
use coin_chart_core::models::ui::Theme;

// cargo run --bin coin-chart -- --coin ethereum --kind bar
// cargo run --bin coin-chart -- --interactive --dark --out charts/current.png
// cargo run --bin coin-chart -- --config coin-chart.json --emit-config

#[derive(Debug, Parser)]
#[clap(name = "coin-chart", version, about = "Fetch crypto price history and render it as a chart", long_about = None)]
pub struct Args {
    /// CoinGecko coin id to load at start-up
    #[clap(short, long, default_value = "bitcoin")]
    pub coin: String,

    /// Chart kind: line | bar | pie
    #[clap(short, long, default_value = "line")]
    pub kind: ChartKind,

    /// JSON settings file. Command-line flags override its values
    #[clap(long)]
    pub config: Option<String>,

    /// Where to write the chart image
    #[clap(short, long)]
    pub out: Option<String>,

    /// Base URL of the price API
    #[clap(long)]
    pub api_base: Option<String>,

    /// Round prices to this many decimals
    #[clap(long)]
    pub decimals: Option<u32>,

    /// Minutes east of UTC used for date labels (defaults to the system offset)
    #[clap(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,

    /// Request timeout in seconds (no timeout by default)
    #[clap(long)]
    pub timeout: Option<u64>,

    #[clap(long)]
    pub width: Option<u32>,

    #[clap(long)]
    pub height: Option<u32>,

    /// Start in dark mode
    #[clap(long)]
    pub dark: bool,

    /// Keep reading commands from stdin after the initial load
    #[clap(short, long)]
    pub interactive: bool,

    /// Print the chart configuration as JSON after each successful draw
    #[clap(long)]
    pub emit_config: bool,
}

impl Args {
    /// Settings from the config file (or defaults) with flag overrides applied.
    pub fn settings(&self) -> Result<Settings, CoreError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from_file(path)?,
            None => Settings::default(),
        };

        if let Some(out) = &self.out {
            settings.output_path = out.clone();
        }
        if let Some(api_base) = &self.api_base {
            settings.api_base = api_base.clone();
        }
        if self.decimals.is_some() {
            settings.price_decimals = self.decimals;
        }
        if self.utc_offset.is_some() {
            settings.utc_offset_minutes = self.utc_offset;
        }
        if self.timeout.is_some() {
            settings.request_timeout_secs = self.timeout;
        }
        if let Some(width) = self.width {
            settings.chart_width = width;
        }
        if let Some(height) = self.height {
            settings.chart_height = height;
        }
        if self.dark {
            settings.theme = Theme::Dark;
        }

        settings.validate()?;
        Ok(settings)
    }
}
