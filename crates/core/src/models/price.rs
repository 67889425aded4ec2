use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw `[timestamp, price]` pair as returned by the price API.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Unix timestamp in milliseconds
    pub timestamp_ms: i64,
    pub price: f64,
}

/// A single normalized price data point (display date → price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Calendar date formatted for the active locale, e.g. "1/15/2025"
    pub date: String,
    pub price: f64,
}

/// Session-scoped cache of normalized price history, keyed by coin id.
///
/// Entries are written only after a complete, successful fetch and are never
/// expired. The cache lives exactly as long as the value that owns it.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    entries: HashMap<String, Vec<PricePoint>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached series for `coin`, if it was fetched before.
    pub fn get(&self, coin: &str) -> Option<&[PricePoint]> {
        self.entries.get(coin).map(Vec::as_slice)
    }

    pub fn contains(&self, coin: &str) -> bool {
        self.entries.contains_key(coin)
    }

    /// Store a full series for `coin`, replacing anything already there.
    pub fn insert(&mut self, coin: &str, points: Vec<PricePoint>) {
        self.entries.insert(coin.to_string(), points);
    }

    /// Number of coins cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of cached price points across all coins.
    pub fn total_points(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }

    /// Cached coin ids, sorted for deterministic output.
    pub fn coins(&self) -> Vec<String> {
        let mut coins: Vec<String> = self.entries.keys().cloned().collect();
        coins.sort();
        coins
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
