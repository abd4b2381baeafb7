use strum::IntoEnumIterator;

use crate::domain::{
    logging::LogComponent,
    market_data::{Instrument, JitterSource, Price, SamplePoint, SampleSeries, SampleSlot},
};
use crate::log_trace;

/// Default half-width of the random offset window
pub const DEFAULT_JITTER_AMPLITUDE: f64 = 5.0;

/// Domain service that derives the synthetic trend line from a snapshot price
#[derive(Debug, Clone, Copy)]
pub struct SeriesGenerator {
    amplitude: f64,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER_AMPLITUDE)
    }
}

impl SeriesGenerator {
    pub fn new(amplitude: f64) -> Self {
        Self { amplitude: amplitude.abs() }
    }

    /// First point is the price itself, every later point gets `u * 2A - A`.
    pub fn generate(&self, instrument: &Instrument, price: Price, jitter: &mut dyn JitterSource) -> SampleSeries {
        let points = SampleSlot::iter()
            .map(|slot| {
                let value = if slot.is_anchor() {
                    price
                } else {
                    let unit = jitter.next_unit().clamp(0.0, 1.0);
                    price.offset_by(unit * 2.0 * self.amplitude - self.amplitude)
                };
                SamplePoint::new(slot, value)
            })
            .collect();

        log_trace!(
            LogComponent::Domain("SeriesGenerator"),
            "Generated samples for {} around {:.2}",
            instrument,
            price.value()
        );

        SampleSeries::new(instrument.clone(), points)
    }

    /// Whether `value` lies inside the window around `price`
    pub fn within_window(&self, price: Price, value: Price) -> bool {
        (value.value() - price.value()).abs() <= self.amplitude + f64::EPSILON * price.value().abs().max(1.0)
    }
}
