use super::entities::{PriceBatch, PriceObservation, Symbol, Timestamp};
use serde::Serialize;
use std::collections::BTreeMap;

/// Live price series accumulated since the current poll loop started.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: BTreeMap<Symbol, Vec<PriceObservation>>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one observation per symbol in `batch`, creating missing series.
    /// Returns how many observations were added.
    pub fn record_batch(&mut self, tick_timestamp: Timestamp, batch: &PriceBatch) -> usize {
        for (symbol, price) in batch.iter() {
            self.series
                .entry(symbol.clone())
                .or_default()
                .push(PriceObservation::new(tick_timestamp, *price));
        }
        batch.len()
    }

    pub fn reset(&mut self) {
        self.series.clear();
    }

    /// Owned copy; later writes never show through it.
    pub fn snapshot(&self) -> SeriesSnapshot {
        SeriesSnapshot { series: self.series.clone() }
    }

    pub fn series(&self, symbol: &Symbol) -> Option<&[PriceObservation]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// Number of symbols with at least one observation.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn observation_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.series.keys()
    }
}

/// Read-only view of a [`SeriesStore`] handed to the chart renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    series: BTreeMap<Symbol, Vec<PriceObservation>>,
}

impl SeriesSnapshot {
    pub fn get(&self, symbol: &Symbol) -> Option<&[PriceObservation]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &[PriceObservation])> {
        self.series.iter().map(|(symbol, points)| (symbol, points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::Price;

    fn batch(entries: &[(&str, f64)]) -> PriceBatch {
        entries.iter().map(|(s, p)| (*s, *p)).collect()
    }

    #[test]
    fn record_batch_appends_in_time_order() {
        let mut store = SeriesStore::new();
        store.record_batch(Timestamp::from_millis(1), &batch(&[("BTC", 10.0)]));
        store.record_batch(Timestamp::from_millis(2), &batch(&[("BTC", 11.0), ("ETH", 5.0)]));

        let btc = store.series(&Symbol::from("BTC")).unwrap();
        assert_eq!(btc.len(), 2);
        assert_eq!(btc[0].price, Price::new(10.0));
        assert_eq!(btc[1].timestamp, Timestamp::from_millis(2));
        assert_eq!(store.series(&Symbol::from("ETH")).unwrap().len(), 1);
        assert_eq!(store.observation_count(), 3);
    }

    #[test]
    fn snapshot_is_isolated_from_later_writes() {
        let mut store = SeriesStore::new();
        store.record_batch(Timestamp::from_millis(1), &batch(&[("BTC", 10.0)]));
        let snapshot = store.snapshot();
        store.record_batch(Timestamp::from_millis(2), &batch(&[("BTC", 12.0)]));

        assert_eq!(snapshot.get(&Symbol::from("BTC")).unwrap().len(), 1);
        assert_eq!(store.series(&Symbol::from("BTC")).unwrap().len(), 2);
    }

    #[test]
    fn reset_drops_every_series() {
        let mut store = SeriesStore::new();
        store.record_batch(Timestamp::from_millis(1), &batch(&[("BTC", 10.0), ("ETH", 1.0)]));
        store.reset();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn empty_batch_records_nothing() {
        let mut store = SeriesStore::new();
        assert_eq!(store.record_batch(Timestamp::from_millis(1), &PriceBatch::new()), 0);
        assert!(store.is_empty());
    }
}
