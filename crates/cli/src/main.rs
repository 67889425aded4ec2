use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use coin_chart_core::models::chart::ChartKind;
use coin_chart_core::models::ui::DEFAULT_COINS;
use coin_chart_core::render::png::PngSurface;
use coin_chart_core::services::chart_service::ChartService;
use coin_chart_core::CoinChart;

mod args;
mod commands;
mod terminal;

use args::Args;
use commands::{parse_command, Command, HELP};
use terminal::TerminalStatus;

type App = CoinChart<PngSurface, TerminalStatus>;

/// The coin / chart-kind selectors.
struct Selection {
    coin: String,
    kind: ChartKind,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("coin_chart=info".parse()?))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings().context("invalid settings")?;
    debug!(?settings, "settings loaded");

    let surface = PngSurface::from_settings(&settings);
    let mut app: App = CoinChart::new(&settings, surface, TerminalStatus::new());
    let mut selection = Selection {
        coin: args.coin.clone(),
        kind: args.kind,
    };

    // Initial load, like a page showing the default coin.
    let loaded = show(&mut app, &selection, args.emit_config).await;
    if !args.interactive {
        return loaded;
    }

    eprintln!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        match command {
            Command::Fetch { coin, kind } => {
                if let Some(coin) = coin {
                    selection.coin = coin;
                }
                if let Some(kind) = kind {
                    selection.kind = kind;
                }
                // Failures are already reported through the status view.
                let _ = show(&mut app, &selection, args.emit_config).await;
            }
            Command::SelectCoin(coin) => selection.coin = coin,
            Command::SelectKind(kind) => selection.kind = kind,
            Command::Coins => {
                let cached = app.cached_coins();
                for coin in DEFAULT_COINS {
                    let marker = if cached.iter().any(|c| c == coin) { "*" } else { " " };
                    println!("{marker} {coin}");
                }
                for coin in cached.iter().filter(|c| !DEFAULT_COINS.contains(&c.as_str())) {
                    println!("* {coin}");
                }
            }
            Command::Theme => {
                app.toggle_theme();
            }
            Command::Help => eprintln!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

/// Load the selected coin and draw it, reporting where the chart went.
async fn show(app: &mut App, selection: &Selection, emit_config: bool) -> anyhow::Result<()> {
    app.show(&selection.coin, selection.kind)
        .await
        .with_context(|| format!("could not show {} as a {} chart", selection.coin, selection.kind))?;

    if let Some(chart) = app.current_chart() {
        info!(coin = %selection.coin, kind = %selection.kind, path = %chart.path.display(), "chart ready");
        println!("{}", chart.path.display());
    }

    if emit_config {
        if let Some(series) = app.cached_series(&selection.coin) {
            let config = ChartService::new().build_config(series, selection.kind, &selection.coin);
            println!("{}", config.to_json()?);
        }
    }
    Ok(())
}
