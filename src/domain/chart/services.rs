use super::entities::{ChartPayload, ChartPoint, LineSeries};
use super::value_objects::{ChartConfig, Color};
use crate::domain::market_data::{CoinCatalog, SeriesSnapshot};

/// Projects a [`SeriesSnapshot`] into a [`ChartPayload`].
///
/// Pure: the same snapshot and config always give the same payload, so
/// re-rendering is harmless.
pub struct ChartRenderer;

impl ChartRenderer {
    pub fn render(snapshot: &SeriesSnapshot, config: &ChartConfig, names: &CoinCatalog) -> ChartPayload {
        let series = snapshot
            .iter()
            .enumerate()
            .map(|(index, (symbol, observations))| LineSeries {
                symbol: symbol.clone(),
                name: names.display_name(symbol),
                color: Color::for_series(index),
                show_in_legend: true,
                points: observations
                    .iter()
                    .map(|obs| ChartPoint { x: obs.timestamp.value(), y: obs.price.value() })
                    .collect(),
            })
            .collect();

        ChartPayload { config: config.clone(), series }
    }
}
