// ═══════════════════════════════════════════════════════════════════
// Model Tests — PriceCache, ChartKind, ChartConfig, Theme, Settings
// ═══════════════════════════════════════════════════════════════════

use chrono::{FixedOffset, Local, TimeZone};

use coin_chart_core::errors::CoreError;
use coin_chart_core::models::chart::{ChartKind, Rgba};
use coin_chart_core::models::price::{PriceCache, PricePoint};
use coin_chart_core::models::settings::{DateLocale, Settings, DEFAULT_API_BASE, LOOKBACK_DAYS, VS_CURRENCY};
use coin_chart_core::models::ui::{Theme, ViewState, DEFAULT_COINS};
use coin_chart_core::services::chart_service::ChartService;

fn point(date: &str, price: f64) -> PricePoint {
    PricePoint {
        date: date.to_string(),
        price,
    }
}

// ═══════════════════════════════════════════════════════════════════
// PriceCache
// ═══════════════════════════════════════════════════════════════════

mod price_cache {
    use super::*;

    #[test]
    fn new_cache_is_empty() {
        let cache = PriceCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.total_points(), 0);
        assert!(cache.get("bitcoin").is_none());
    }

    #[test]
    fn insert_and_get_keeps_order() {
        let mut cache = PriceCache::new();
        cache.insert("bitcoin", vec![point("1/1/2025", 1.0), point("1/2/2025", 2.0)]);

        let stored = cache.get("bitcoin").unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].date, "1/1/2025");
        assert_eq!(stored[1].price, 2.0);
        assert!(cache.contains("bitcoin"));
    }

    #[test]
    fn keys_are_exact_coin_ids() {
        let mut cache = PriceCache::new();
        cache.insert("bitcoin", vec![point("1/1/2025", 1.0)]);
        assert!(!cache.contains("ethereum"));
        assert!(!cache.contains("Bitcoin"));
    }

    #[test]
    fn insert_replaces_existing_series() {
        let mut cache = PriceCache::new();
        cache.insert("bitcoin", vec![point("1/1/2025", 1.0)]);
        cache.insert("bitcoin", vec![point("1/5/2025", 5.0), point("1/6/2025", 6.0)]);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("bitcoin").unwrap()[0].price, 5.0);
    }

    #[test]
    fn counts_and_sorted_coins() {
        let mut cache = PriceCache::new();
        cache.insert("solana", vec![point("a", 1.0)]);
        cache.insert("bitcoin", vec![point("a", 1.0), point("b", 2.0)]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.total_points(), 3);
        assert_eq!(cache.coins(), vec!["bitcoin".to_string(), "solana".to_string()]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = PriceCache::new();
        cache.insert("bitcoin", vec![point("a", 1.0)]);
        cache.clear();
        assert!(cache.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// ChartKind & ChartConfig
// ═══════════════════════════════════════════════════════════════════

mod chart_kind {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("line".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!(" BAR ".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("Pie".parse::<ChartKind>().unwrap(), ChartKind::Pie);
    }

    #[test]
    fn unknown_kind_is_validation_error() {
        match "radar".parse::<ChartKind>() {
            Err(CoreError::ValidationError(msg)) => assert!(msg.contains("radar")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), kind);
        }
    }
}

mod chart_config {
    use super::*;

    #[test]
    fn rgba_css_notation() {
        assert_eq!(Rgba::rgb(0x2a, 0xa1, 0x98).to_css(), "#2aa198");
        assert_eq!(Rgba::rgba(42, 161, 152, 0.14).to_css(), "rgba(42,161,152,0.14)");
    }

    #[test]
    fn json_has_chart_js_shape() {
        let series = vec![point("1/1/2025", 100.0), point("1/2/2025", 200.0)];
        let config = ChartService::new().build_config(&series, ChartKind::Line, "bitcoin");
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "line");
        assert_eq!(json["labels"][1], "1/2/2025");
        assert_eq!(json["datasets"][0]["label"], "Bitcoin Price (USD)");
        assert_eq!(json["datasets"][0]["borderColor"], "#2aa198");
        assert_eq!(json["datasets"][0]["backgroundColor"][0], "rgba(42,161,152,0.14)");
        assert_eq!(json["datasets"][0]["fill"], true);
        assert_eq!(json["options"]["scales"]["y_title"], "Price (USD)");
    }

    #[test]
    fn pie_json_omits_scales() {
        let series = vec![point("1/1/2025", 100.0)];
        let config = ChartService::new().build_config(&series, ChartKind::Pie, "bitcoin");
        let json: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert!(json["options"].get("scales").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Theme & ViewState
// ═══════════════════════════════════════════════════════════════════

mod theme {
    use super::*;

    #[test]
    fn default_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(ViewState::default(), ViewState::Idle);
    }

    #[test]
    fn only_outcomes_are_settled() {
        assert!(ViewState::Displayed.is_settled());
        assert!(ViewState::Error.is_settled());
        assert!(!ViewState::Idle.is_settled());
        assert!(!ViewState::Loading.is_settled());
    }

    #[test]
    fn toggle_flips_and_swaps_glyph() {
        let dark = Theme::Light.toggled();
        assert_eq!(dark, Theme::Dark);
        assert_eq!(dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggle_glyph(), "🌙");
        assert_eq!(Theme::Dark.toggle_glyph(), "☀️");
    }

    #[test]
    fn only_dark_has_a_class() {
        assert_eq!(Theme::Light.class_name(), None);
        assert_eq!(Theme::Dark.class_name(), Some("dark-mode"));
    }

    #[test]
    fn default_coins_start_with_bitcoin() {
        assert_eq!(DEFAULT_COINS[0], "bitcoin");
        assert!(DEFAULT_COINS.contains(&"ethereum"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Settings & DateLocale
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults_match_the_api_contract() {
        let settings = Settings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(VS_CURRENCY, "usd");
        assert_eq!(LOOKBACK_DAYS, 15);
        assert_eq!(settings.price_decimals, None);
        assert_eq!(settings.request_timeout_secs, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json_str(r#"{ "price_decimals": 2, "theme": "dark" }"#).unwrap();
        assert_eq!(settings.price_decimals, Some(2));
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Settings::from_json_str("{ nope"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for json in [
            r#"{ "api_base": "" }"#,
            r#"{ "chart_width": 0 }"#,
            r#"{ "utc_offset_minutes": 100000 }"#,
            r#"{ "date_pattern": "%Q" }"#,
        ] {
            assert!(
                matches!(Settings::from_json_str(json), Err(CoreError::ValidationError(_))),
                "expected validation error for {json}"
            );
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coin-chart.json");
        std::fs::write(&path, r#"{ "output_path": "out/chart.png" }"#).unwrap();

        let settings = Settings::load_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.output_path, "out/chart.png");
    }

    #[test]
    fn missing_file_is_file_io_error() {
        assert!(matches!(
            Settings::load_from_file("/definitely/not/here.json"),
            Err(CoreError::FileIO(_))
        ));
    }

    #[test]
    fn request_fields_in_file_are_ignored() {
        let settings =
            Settings::from_json_str(r#"{ "vs_currency": "eur", "lookback_days": 90, "price_decimals": 1 }"#)
                .unwrap();
        assert_eq!(settings, Settings { price_decimals: Some(1), ..Settings::default() });
    }

    #[test]
    fn explicit_offset_drives_locale() {
        let settings = Settings {
            utc_offset_minutes: Some(-5 * 60),
            ..Settings::default()
        };
        // 2025-01-02T03:00Z is still Jan 1st five hours west of UTC.
        let locale = settings.date_locale();
        assert_eq!(locale.format_millis(1_735_786_800_000).unwrap(), "1/1/2025");
    }
}

mod date_locale {
    use super::*;

    #[test]
    fn utc_formats_epoch() {
        assert_eq!(DateLocale::utc().format_millis(0).unwrap(), "1/1/1970");
        assert_eq!(DateLocale::utc().format_millis(86_400_000).unwrap(), "1/2/1970");
    }

    #[test]
    fn custom_pattern_and_offset() {
        let locale = DateLocale::new(FixedOffset::east_opt(9 * 3600).unwrap(), "%Y-%m-%d");
        // 1970-01-01T20:00Z is already Jan 2nd at UTC+9.
        assert_eq!(locale.format_millis(20 * 3_600_000).unwrap(), "1970-01-02");
    }

    #[test]
    fn local_zone_resolves_offset_per_timestamp() {
        // Mid-January and mid-July 2025: on opposite sides of any DST change.
        let locale = DateLocale::local("%Y-%m-%d %z");
        for ts in [1_736_942_400_000_i64, 1_752_580_800_000] {
            let expected = Local.timestamp_millis_opt(ts).unwrap().format("%Y-%m-%d %z").to_string();
            assert_eq!(locale.format_millis(ts).unwrap(), expected);
        }
    }

    #[test]
    fn unset_offset_follows_system_zone() {
        let locale = Settings::default().date_locale();
        assert_eq!(locale, DateLocale::local("%-m/%-d/%Y"));
    }

    #[test]
    fn out_of_range_timestamp_is_none() {
        assert!(DateLocale::utc().format_millis(i64::MAX).is_none());
    }
}
