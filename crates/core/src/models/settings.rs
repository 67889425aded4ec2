use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use super::ui::Theme;
use crate::errors::CoreError;

pub const DEFAULT_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Fixed lookback window requested from the price API.
pub const LOOKBACK_DAYS: u32 = 15;

/// Quote currency of every request. Chart labels assume it.
pub const VS_CURRENCY: &str = "usd";

/// Application settings. Every field has a default, so a partial JSON file works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the price-history API (no trailing slash).
    pub api_base: String,

    /// Round prices to this many decimals when normalizing. `None` passes them through.
    pub price_decimals: Option<u32>,

    /// chrono format string for point labels.
    pub date_pattern: String,

    /// Offset from UTC used to pick the calendar day. `None` → system time zone.
    pub utc_offset_minutes: Option<i32>,

    /// Optional request timeout. `None` means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,

    pub chart_width: u32,
    pub chart_height: u32,

    /// Where the PNG surface writes the current chart.
    pub output_path: String,

    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            price_decimals: None,
            date_pattern: "%-m/%-d/%Y".to_string(),
            utc_offset_minutes: None,
            request_timeout_secs: None,
            chart_width: 1000,
            chart_height: 600,
            output_path: "coin-chart.png".to_string(),
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk.
    pub fn load_from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings that can never produce a usable request or chart.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_base.trim().is_empty() {
            return Err(CoreError::ValidationError("api_base must not be empty".into()));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(CoreError::ValidationError(format!(
                "Chart size {}x{} is not drawable",
                self.chart_width, self.chart_height
            )));
        }
        if let Some(minutes) = self.utc_offset_minutes {
            if offset_from_minutes(minutes).is_none() {
                return Err(CoreError::ValidationError(format!(
                    "UTC offset of {minutes} minutes is out of range"
                )));
            }
        }
        let bad_pattern = StrftimeItems::new(&self.date_pattern).any(|item| matches!(item, Item::Error));
        if bad_pattern {
            return Err(CoreError::ValidationError(format!(
                "Invalid date pattern '{}'",
                self.date_pattern
            )));
        }
        Ok(())
    }

    /// The date locale these settings describe.
    pub fn date_locale(&self) -> DateLocale {
        match self.utc_offset_minutes.and_then(offset_from_minutes) {
            Some(offset) => DateLocale::new(offset, &self.date_pattern),
            None => DateLocale::local(&self.date_pattern),
        }
    }
}

/// How timestamps become human-readable date labels.
#[derive(Debug, Clone, PartialEq)]
pub struct DateLocale {
    /// `None` follows the system time zone, DST changes included.
    offset: Option<FixedOffset>,
    pattern: String,
}

impl DateLocale {
    pub fn new(offset: FixedOffset, pattern: &str) -> Self {
        Self {
            offset: Some(offset),
            pattern: pattern.to_string(),
        }
    }

    /// System time zone, resolved separately for every timestamp.
    pub fn local(pattern: &str) -> Self {
        Self {
            offset: None,
            pattern: pattern.to_string(),
        }
    }

    /// UTC with the default `m/d/yyyy` pattern.
    pub fn utc() -> Self {
        Self::new(Utc.fix(), "%-m/%-d/%Y")
    }

    /// Format a millisecond timestamp as a calendar date.
    /// Returns `None` when the timestamp is outside chrono's representable range
    /// or the pattern cannot be rendered.
    pub fn format_millis(&self, timestamp_ms: i64) -> Option<String> {
        let utc = DateTime::from_timestamp_millis(timestamp_ms)?;
        let mut out = String::new();
        match self.offset {
            Some(offset) => write!(out, "{}", utc.with_timezone(&offset).format(&self.pattern)),
            None => write!(out, "{}", utc.with_timezone(&Local).format(&self.pattern)),
        }
        .ok()?;
        Some(out)
    }
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

