pub use super::value_objects::{Instrument, Price, SamplePoint, SampleSlot};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::errors::{AppError, DomainResult};

/// Domain entity - the fixed instrument list with one price per instrument
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    instruments: Vec<Instrument>,
    prices: HashMap<Instrument, Price>,
}

impl MarketSnapshot {
    /// List order is preserved; the first entry becomes the initial selection.
    pub fn new(instruments: Vec<Instrument>, prices: HashMap<Instrument, Price>) -> DomainResult<Self> {
        if instruments.is_empty() {
            return Err(AppError::Validation("Snapshot has no instruments".to_string()));
        }
        for (i, instrument) in instruments.iter().enumerate() {
            if instruments[..i].contains(instrument) {
                return Err(AppError::Validation(format!("Duplicate instrument {instrument}")));
            }
            if !prices.contains_key(instrument) {
                return Err(AppError::Validation(format!("Missing price for {instrument}")));
            }
        }
        Ok(Self { instruments, prices })
    }

    /// Build from `(label, price)` quotes in display order.
    pub fn from_quotes<'a>(quotes: impl IntoIterator<Item = (&'a str, f64)>) -> DomainResult<Self> {
        let mut instruments = Vec::new();
        let mut prices = HashMap::new();
        for (label, price) in quotes {
            let instrument = Instrument::new(label)?;
            prices.insert(instrument.clone(), Price::from(price));
            instruments.push(instrument);
        }
        Self::new(instruments, prices)
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn first(&self) -> &Instrument {
        // Non-empty by construction.
        &self.instruments[0]
    }

    pub fn price_of(&self, instrument: &Instrument) -> Option<Price> {
        self.prices.get(instrument).copied()
    }

    pub fn contains(&self, instrument: &Instrument) -> bool {
        self.prices.contains_key(instrument)
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Domain entity - five synthetic samples for one instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSeries {
    instrument: Instrument,
    points: Vec<SamplePoint>,
}

impl SampleSeries {
    pub fn new(instrument: Instrument, points: Vec<SamplePoint>) -> Self {
        debug_assert_eq!(points.len(), SampleSlot::COUNT);
        Self { instrument, points }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> Option<Price> {
        self.points.iter().map(|p| p.value).reduce(|a, b| if b < a { b } else { a })
    }

    pub fn max(&self) -> Option<Price> {
        self.points.iter().map(|p| p.value).reduce(|a, b| if b > a { b } else { a })
    }
}
