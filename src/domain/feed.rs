//! Page state for the price display and the presentation values derived from it.

use serde::Serialize;

use crate::domain::{
    errors::{AppError, DomainResult},
    market_data::{Instrument, MarketSnapshot, Price, SampleSeries},
};

pub const LOADING_TEXT: &str = "Loading...";
pub const LOADING_CHART_TEXT: &str = "Loading chart...";

/// Two-state loading indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedPhase {
    #[default]
    Loading,
    Loaded,
}

/// What the headline price slot shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Headline {
    Loading,
    Price(String),
}

impl Headline {
    pub fn text(&self) -> &str {
        match self {
            Headline::Loading => LOADING_TEXT,
            Headline::Price(formatted) => formatted,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Headline::Loading)
    }
}

/// Static feed statistics shown on two of the summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub updates_per_second: u32,
    pub ms_per_update: u32,
}

impl Default for FeedStats {
    fn default() -> Self {
        Self { updates_per_second: 12, ms_per_update: 150 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    #[serde(skip)]
    pub loading: bool,
}

/// State owned by one price display view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceFeedState {
    phase: FeedPhase,
    snapshot: Option<MarketSnapshot>,
    selected: Option<Instrument>,
    series: Option<SampleSeries>,
}

impl PriceFeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FeedPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FeedPhase::Loading
    }

    pub fn instruments(&self) -> &[Instrument] {
        self.snapshot.as_ref().map(|s| s.instruments()).unwrap_or(&[])
    }

    pub fn selected(&self) -> Option<&Instrument> {
        self.selected.as_ref()
    }

    pub fn selected_price(&self) -> Option<Price> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot.price_of(self.selected.as_ref()?)
    }

    pub fn begin_loading(&mut self) {
        self.phase = FeedPhase::Loading;
    }

    /// Install the snapshot, select its first instrument and finish loading.
    pub fn apply_snapshot(&mut self, snapshot: MarketSnapshot) {
        self.selected = Some(snapshot.first().clone());
        self.snapshot = Some(snapshot);
        self.series = None;
        self.phase = FeedPhase::Loaded;
    }

    /// Returns `Ok(true)` when the selection actually changed.
    ///
    /// Re-selecting the current instrument and selecting while loading are
    /// both no-ops. Unknown instruments are rejected.
    pub fn select(&mut self, instrument: &Instrument) -> DomainResult<bool> {
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| AppError::Validation("No instruments loaded yet".to_string()))?;
        if !snapshot.contains(instrument) {
            return Err(AppError::Validation(format!("Unknown instrument {instrument}")));
        }
        if self.is_loading() || self.selected.as_ref() == Some(instrument) {
            return Ok(false);
        }
        self.selected = Some(instrument.clone());
        Ok(true)
    }

    /// Store a freshly generated series and finish loading.
    ///
    /// Returns `false` and leaves state untouched if the series belongs to an
    /// instrument that is no longer selected.
    pub fn apply_series(&mut self, series: SampleSeries) -> bool {
        if self.selected.as_ref() != Some(series.instrument()) {
            return false;
        }
        self.series = Some(series);
        self.phase = FeedPhase::Loaded;
        true
    }

    pub fn headline(&self) -> Headline {
        if self.is_loading() {
            return Headline::Loading;
        }
        match self.selected_price() {
            Some(price) => Headline::Price(price.format_usd()),
            None => Headline::Loading,
        }
    }

    /// Series to draw, or `None` while the chart placeholder should show.
    pub fn chart(&self) -> Option<&SampleSeries> {
        if self.is_loading() {
            return None;
        }
        self.series.as_ref()
    }
}

/// "Price update", "Updates/Second" and "MS/update" cards.
pub fn summary_cards(state: &PriceFeedState, stats: FeedStats) -> [SummaryCard; 3] {
    let headline = state.headline();
    [
        SummaryCard {
            title: "Price update",
            value: headline.text().to_string(),
            loading: headline.is_loading(),
        },
        SummaryCard {
            title: "Updates/Second",
            value: stats.updates_per_second.to_string(),
            loading: false,
        },
        SummaryCard {
            title: "MS/update",
            value: format!("{}ms", stats.ms_per_update),
            loading: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::SeriesGenerator;

    struct Midpoint;

    impl crate::domain::market_data::JitterSource for Midpoint {
        fn next_unit(&mut self) -> f64 {
            0.5
        }
    }

    fn loaded_state() -> PriceFeedState {
        let mut state = PriceFeedState::new();
        state.apply_snapshot(
            MarketSnapshot::from_quotes([("NGN/USD", 1234.56), ("NGN/USDC", 1120.75)]).unwrap(),
        );
        state
    }

    fn series_for(state: &PriceFeedState) -> SampleSeries {
        let instrument = state.selected().unwrap().clone();
        SeriesGenerator::default().generate(&instrument, state.selected_price().unwrap(), &mut Midpoint)
    }

    #[test]
    fn starts_loading_with_placeholders() {
        let state = PriceFeedState::new();
        assert_eq!(state.phase(), FeedPhase::Loading);
        assert_eq!(state.headline(), Headline::Loading);
        assert!(state.chart().is_none());
        assert!(state.instruments().is_empty());
    }

    #[test]
    fn snapshot_selects_first_instrument() {
        let state = loaded_state();
        assert_eq!(state.selected(), Some(&Instrument::from("NGN/USD")));
        assert_eq!(state.headline(), Headline::Price("$1,234.56".to_string()));
    }

    #[test]
    fn select_rules() {
        let mut state = loaded_state();
        assert_eq!(state.select(&Instrument::from("NGN/USD")), Ok(false));
        assert!(state.select(&Instrument::from("NGN/EUR")).is_err());

        state.begin_loading();
        assert_eq!(state.select(&Instrument::from("NGN/USDC")), Ok(false));
        assert_eq!(state.selected(), Some(&Instrument::from("NGN/USD")));

        let series = series_for(&state);
        assert!(state.apply_series(series));
        assert_eq!(state.select(&Instrument::from("NGN/USDC")), Ok(true));
        assert_eq!(state.selected(), Some(&Instrument::from("NGN/USDC")));
    }

    #[test]
    fn select_before_snapshot_is_rejected() {
        let mut state = PriceFeedState::new();
        assert!(matches!(state.select(&Instrument::from("NGN/USD")), Err(AppError::Validation(_))));
    }

    #[test]
    fn stale_series_is_discarded() {
        let mut state = loaded_state();
        let stale = series_for(&state);
        state.select(&Instrument::from("NGN/USDC")).unwrap();
        state.begin_loading();
        assert!(!state.apply_series(stale));
        assert!(state.is_loading());
    }

    #[test]
    fn loading_hides_price_and_chart() {
        let mut state = loaded_state();
        let series = series_for(&state);
        state.begin_loading();
        state.apply_series(series);
        assert!(state.chart().is_some());

        state.begin_loading();
        assert_eq!(state.headline(), Headline::Loading);
        assert!(state.chart().is_none());
        let cards = summary_cards(&state, FeedStats::default());
        assert_eq!(cards[0].value, LOADING_TEXT);
        assert!(cards[0].loading);
    }

    #[test]
    fn price_card_matches_headline() {
        let state = loaded_state();
        let cards = summary_cards(&state, FeedStats::default());
        assert_eq!(cards[0].value, state.headline().text());
        assert_eq!(cards[1].value, "12");
        assert_eq!(cards[2].value, "150ms");
    }
}
