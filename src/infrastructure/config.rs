use js_sys::Reflect;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wasm_bindgen::JsValue;

use crate::application::FeedTimings;
use crate::domain::{
    errors::{AppError, DomainResult},
    feed::FeedStats,
    logging::LogLevel,
    market_data::{DEFAULT_JITTER_AMPLITUDE, SeriesGenerator},
};

/// Page global that may carry a JSON override of [`FeedConfig`]
pub const CONFIG_GLOBAL: &str = "PRICE_FEED_CONFIG";

/// One entry of the mocked API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairQuote {
    pub symbol: String,
    pub price: f64,
}

impl PairQuote {
    pub fn new(symbol: &str, price: f64) -> Self {
        Self { symbol: symbol.to_string(), price }
    }
}

/// Everything the demo page can be tuned with. Missing fields keep defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Milliseconds; the browser timer caps them at `MAX_TIMER_DELAY`
    pub startup_delay_ms: u32,
    pub selection_delay_ms: u32,
    pub jitter_amplitude: f64,
    pub pairs: Vec<PairQuote>,
    pub title: String,
    pub description: String,
    pub account_label: String,
    pub updates_per_second: u32,
    pub ms_per_update: u32,
    pub background_image: String,
    pub log_level: LogLevel,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            startup_delay_ms: 10,
            selection_delay_ms: 400,
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
            pairs: vec![PairQuote::new("NGN/USD", 1234.56), PairQuote::new("NGN/USDC", 1120.75)],
            title: "MagicBlock Real-Time Oracle".to_string(),
            description: "This is an example showing how to integrate and use an Oracle (Pyth Price Feeds) from a Magicblock Ephemeral Rollup.".to_string(),
            account_label: "71wt...51sr".to_string(),
            updates_per_second: 12,
            ms_per_update: 150,
            background_image: "/bg.jpg".to_string(),
            log_level: LogLevel::Debug,
        }
    }
}

impl FeedConfig {
    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn timings(&self) -> FeedTimings {
        FeedTimings {
            startup_delay: Duration::from_millis(u64::from(self.startup_delay_ms)),
            selection_delay: Duration::from_millis(u64::from(self.selection_delay_ms)),
        }
    }

    pub fn stats(&self) -> FeedStats {
        FeedStats {
            updates_per_second: self.updates_per_second,
            ms_per_update: self.ms_per_update,
        }
    }

    pub fn generator(&self) -> SeriesGenerator {
        SeriesGenerator::new(self.jitter_amplitude)
    }
}

static CONFIG: OnceCell<FeedConfig> = OnceCell::new();

/// Install the page configuration. Later calls are ignored.
pub fn init_config(config: FeedConfig) {
    let _ = CONFIG.set(config);
}

pub fn config() -> &'static FeedConfig {
    CONFIG.get_or_init(FeedConfig::default)
}

/// Raw JSON from the page global, if the host page defined one.
///
/// Accepts either a JSON string or a plain object.
pub fn read_page_config() -> Option<String> {
    let value = Reflect::get(&js_sys::global(), &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    if let Some(text) = value.as_string() {
        return Some(text);
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

/// Defaults when the page defines no override, an error when it is unparsable.
pub fn load_config() -> DomainResult<FeedConfig> {
    match read_page_config() {
        Some(json) => FeedConfig::from_json(&json),
        None => Ok(FeedConfig::default()),
    }
}

/// Like [`load_config`], but falls back to defaults and hands back the reason.
pub fn load_config_or_default() -> (FeedConfig, Option<AppError>) {
    match load_config() {
        Ok(config) => (config, None),
        Err(e) => (FeedConfig::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::PriceFeedSource;
    use crate::infrastructure::mock_feed::MockOracleFeed;

    #[test]
    fn defaults_match_demo_page() {
        let config = FeedConfig::default();
        assert_eq!(config.timings().startup_delay, Duration::from_millis(10));
        assert_eq!(config.timings().selection_delay, Duration::from_millis(400));
        assert_eq!(config.stats(), FeedStats::default());
        let snapshot = MockOracleFeed::from_config(&config).load_snapshot().unwrap();
        assert_eq!(snapshot.first().value(), "NGN/USD");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FeedConfig::from_json(r#"{"selection_delay_ms": 50, "log_level": "warn"}"#).unwrap();
        assert_eq!(config.selection_delay_ms, 50);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.startup_delay_ms, 10);
        assert_eq!(config.pairs.len(), 2);
    }

    #[test]
    fn bad_json_is_a_config_error() {
        assert!(matches!(FeedConfig::from_json("{"), Err(AppError::Config(_))));
        assert!(FeedConfig::from_json(r#"{"startup_delay_ms": "soon"}"#).is_err());
    }

    #[test]
    fn delays_beyond_timer_range_are_rejected() {
        let too_long = FeedConfig::from_json(r#"{"selection_delay_ms": 5000000000}"#);
        assert!(matches!(too_long, Err(AppError::Config(_))));
        assert!(FeedConfig::from_json(r#"{"startup_delay_ms": -1}"#).is_err());

        let longest = FeedConfig::from_json(r#"{"startup_delay_ms": 4294967295}"#).unwrap();
        assert_eq!(longest.timings().startup_delay, Duration::from_millis(u32::MAX as u64));
    }

    #[test]
    fn custom_pairs_feed_the_snapshot() {
        let config = FeedConfig::from_json(r#"{"pairs": [{"symbol": "GHS/USD", "price": 15.2}]}"#).unwrap();
        let snapshot = MockOracleFeed::from_config(&config).load_snapshot().unwrap();
        assert_eq!(snapshot.first().value(), "GHS/USD");

        let empty = FeedConfig::from_json(r#"{"pairs": []}"#).unwrap();
        assert!(MockOracleFeed::from_config(&empty).load_snapshot().is_err());
    }
}
