use crate::domain::errors::DomainResult;
use crate::domain::market_data::MarketSnapshot;

/// Source of the instrument list and its price snapshot
pub trait PriceFeedSource {
    /// Human-readable name used in log lines
    fn name(&self) -> &'static str;

    /// Load the snapshot. Called once per page view.
    fn load_snapshot(&self) -> DomainResult<MarketSnapshot>;
}

/// Source of uniformly distributed draws in `[0, 1)`
pub trait JitterSource {
    fn next_unit(&mut self) -> f64;
}
