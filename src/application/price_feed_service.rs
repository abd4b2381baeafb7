use futures::future::LocalBoxFuture;
use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::domain::{
    errors::DomainResult,
    feed::PriceFeedState,
    logging::LogComponent,
    market_data::{Instrument, JitterSource, PriceFeedSource, SeriesGenerator},
};
use crate::{log_debug, log_error, log_info};

/// Owner of the page state. Mutations go through here only.
pub trait FeedStore: Clone + 'static {
    /// `None` when the underlying storage is gone (e.g. a disposed signal).
    fn mutate<R>(&self, f: impl FnOnce(&mut PriceFeedState) -> R) -> Option<R>;
    fn peek<R>(&self, f: impl FnOnce(&PriceFeedState) -> R) -> Option<R>;
}

impl FeedStore for RwSignal<PriceFeedState> {
    fn mutate<R>(&self, f: impl FnOnce(&mut PriceFeedState) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn peek<R>(&self, f: impl FnOnce(&PriceFeedState) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}

impl FeedStore for Rc<RefCell<PriceFeedState>> {
    fn mutate<R>(&self, f: impl FnOnce(&mut PriceFeedState) -> R) -> Option<R> {
        Some(f(&mut *self.borrow_mut()))
    }

    fn peek<R>(&self, f: impl FnOnce(&PriceFeedState) -> R) -> Option<R> {
        Some(f(&*self.borrow()))
    }
}

/// Suspension point for the artificial delays. Never fails, never cancels.
pub trait Sleeper {
    fn sleep(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Artificial delays of the simulated backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTimings {
    pub startup_delay: Duration,
    pub selection_delay: Duration,
}

impl Default for FeedTimings {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_millis(10),
            selection_delay: Duration::from_millis(400),
        }
    }
}

/// Application service driving the price display through its loading cycles
pub struct PriceFeedService<S: FeedStore> {
    store: S,
    source: Rc<dyn PriceFeedSource>,
    jitter: Rc<RefCell<dyn JitterSource>>,
    timer: Rc<dyn Sleeper>,
    generator: SeriesGenerator,
    timings: FeedTimings,
}

impl<S: FeedStore> Clone for PriceFeedService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            source: Rc::clone(&self.source),
            jitter: Rc::clone(&self.jitter),
            timer: Rc::clone(&self.timer),
            generator: self.generator,
            timings: self.timings,
        }
    }
}

impl<S: FeedStore> PriceFeedService<S> {
    pub fn new(
        store: S,
        source: Rc<dyn PriceFeedSource>,
        jitter: Rc<RefCell<dyn JitterSource>>,
        timer: Rc<dyn Sleeper>,
    ) -> Self {
        Self {
            store,
            source,
            jitter,
            timer,
            generator: SeriesGenerator::default(),
            timings: FeedTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: FeedTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_generator(mut self, generator: SeriesGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Initial display: load the snapshot after the startup delay, select the
    /// first instrument, then build its series.
    pub async fn bootstrap(&self) -> DomainResult<()> {
        self.store.mutate(PriceFeedState::begin_loading);
        log_info!(
            LogComponent::Application("PriceFeed"),
            "Loading instruments from {}",
            self.source.name()
        );

        self.timer.sleep(self.timings.startup_delay).await;

        let snapshot = self.source.load_snapshot().inspect_err(|e| {
            log_error!(LogComponent::Application("PriceFeed"), "Snapshot unavailable: {}", e);
        })?;
        let count = snapshot.len();
        let first = snapshot.first().clone();
        self.store.mutate(|state| state.apply_snapshot(snapshot));
        log_info!(
            LogComponent::Application("PriceFeed"),
            "Loaded {} instruments, selected {}",
            count,
            first
        );

        self.refresh_series().await;
        Ok(())
    }

    /// Switch to `instrument` and rebuild the series. `Ok(false)` means nothing
    /// changed (same instrument, or a load is in flight).
    pub async fn change_selection(&self, instrument: Instrument) -> DomainResult<bool> {
        let changed = self
            .store
            .mutate(|state| state.select(&instrument))
            .unwrap_or(Ok(false))
            .inspect_err(|e| {
                log_error!(LogComponent::Application("PriceFeed"), "Selection rejected: {}", e);
            })?;

        if !changed {
            log_debug!(
                LogComponent::Application("PriceFeed"),
                "Selection of {} ignored",
                instrument
            );
            return Ok(false);
        }

        log_info!(LogComponent::Application("PriceFeed"), "Selected {}", instrument);
        self.refresh_series().await;
        Ok(true)
    }

    /// Regenerate the trend line for the current selection. Returns whether the
    /// new series was applied.
    pub async fn refresh_series(&self) -> bool {
        let target = self
            .store
            .peek(|state| Some((state.selected()?.clone(), state.selected_price()?)))
            .flatten();
        let Some((instrument, price)) = target else {
            return false;
        };

        self.store.mutate(PriceFeedState::begin_loading);
        self.timer.sleep(self.timings.selection_delay).await;

        let series = {
            let mut jitter = self.jitter.borrow_mut();
            self.generator.generate(&instrument, price, &mut *jitter)
        };
        let applied = self
            .store
            .mutate(|state| state.apply_series(series))
            .unwrap_or(false);

        if applied {
            log_debug!(
                LogComponent::Application("PriceFeed"),
                "Series ready for {} at {}",
                instrument,
                price.format_usd()
            );
        } else {
            log_debug!(
                LogComponent::Application("PriceFeed"),
                "Discarded series for {}",
                instrument
            );
        }
        applied
    }
}
