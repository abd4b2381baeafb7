use crate::domain::{
    errors::DomainResult,
    logging::LogComponent,
    market_data::{MarketSnapshot, PriceFeedSource},
};
use crate::infrastructure::config::{FeedConfig, PairQuote};
use crate::log_debug;

/// Stand-in for the oracle backend: answers with a fixed list of quotes
#[derive(Debug, Clone)]
pub struct MockOracleFeed {
    quotes: Vec<PairQuote>,
}

impl Default for MockOracleFeed {
    fn default() -> Self {
        Self::from_config(&FeedConfig::default())
    }
}

impl MockOracleFeed {
    pub fn new(quotes: Vec<PairQuote>) -> Self {
        Self { quotes }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(config.pairs.clone())
    }
}

impl PriceFeedSource for MockOracleFeed {
    fn name(&self) -> &'static str {
        "mock oracle"
    }

    fn load_snapshot(&self) -> DomainResult<MarketSnapshot> {
        log_debug!(
            LogComponent::Infrastructure("MockOracleFeed"),
            "Serving {} mocked quotes",
            self.quotes.len()
        );
        MarketSnapshot::from_quotes(self.quotes.iter().map(|q| (q.symbol.as_str(), q.price)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{Instrument, Price};

    #[test]
    fn default_feed_serves_ngn_pairs() {
        let snapshot = MockOracleFeed::default().load_snapshot().unwrap();
        let labels: Vec<&str> = snapshot.instruments().iter().map(|i| i.value()).collect();
        assert_eq!(labels, ["NGN/USD", "NGN/USDC"]);
        assert_eq!(snapshot.price_of(&Instrument::from("NGN/USD")), Some(Price::from(1234.56)));
    }

    #[test]
    fn duplicate_quotes_are_rejected() {
        let feed = MockOracleFeed::new(vec![PairQuote::new("A/B", 1.0), PairQuote::new("A/B", 2.0)]);
        assert!(feed.load_snapshot().is_err());
    }
}
