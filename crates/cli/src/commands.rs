use coin_chart_core::models::chart::ChartKind;

pub const HELP: &str = "\
Commands:
  fetch [coin] [kind]   load the selected coin (or the given one) and draw it
  coin <id>             select a coin
  kind <line|bar|pie>   select a chart kind
  coins                 list suggested coins and what is cached
  theme                 toggle dark mode
  help                  show this help
  quit                  exit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Fetch {
        coin: Option<String>,
        kind: Option<ChartKind>,
    },
    SelectCoin(String),
    SelectKind(ChartKind),
    Coins,
    Theme,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    match (verb.to_lowercase().as_str(), rest.as_slice()) {
        ("fetch" | "f", []) => Ok(Command::Fetch { coin: None, kind: None }),
        ("fetch" | "f", [coin]) => Ok(Command::Fetch {
            coin: Some(coin.to_string()),
            kind: None,
        }),
        ("fetch" | "f", [coin, kind]) => Ok(Command::Fetch {
            coin: Some(coin.to_string()),
            kind: Some(parse_kind(kind)?),
        }),
        ("coin", [coin]) => Ok(Command::SelectCoin(coin.to_string())),
        ("kind", [kind]) => Ok(Command::SelectKind(parse_kind(kind)?)),
        ("coins", []) => Ok(Command::Coins),
        ("theme" | "t", []) => Ok(Command::Theme),
        ("help" | "?", []) => Ok(Command::Help),
        ("quit" | "exit" | "q", []) => Ok(Command::Quit),
        (verb, _) => Err(format!("unrecognized command '{verb}' (try 'help')")),
    }
}

fn parse_kind(kind: &str) -> Result<ChartKind, String> {
    kind.parse().map_err(|e: coin_chart_core::errors::CoreError| e.to_string())
}
