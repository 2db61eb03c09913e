use serde::Serialize;

use super::value_objects::{ChartConfig, Color, Viewport};
use crate::domain::market_data::Symbol;

/// One plotted point: x = epoch millis, y = quote price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: u64,
    pub y: f64,
}

/// One line per tracked symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub symbol: Symbol,
    /// Legend text
    pub name: String,
    pub color: Color,
    pub show_in_legend: bool,
    pub points: Vec<ChartPoint>,
}

impl LineSeries {
    pub fn latest(&self) -> Option<&ChartPoint> {
        self.points.last()
    }
}

/// Everything the UI needs to draw the live chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub config: ChartConfig,
    pub series: Vec<LineSeries>,
}

impl ChartPayload {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Bounds of every point, or `None` when nothing has been recorded yet.
    pub fn viewport(&self, width: f64, height: f64) -> Option<Viewport> {
        let mut points = self.series.iter().flat_map(|s| s.points.iter());
        let first = points.next()?;
        let mut vp = Viewport {
            start_time: first.x as f64,
            end_time: first.x as f64,
            min_price: first.y,
            max_price: first.y,
            width,
            height,
        };
        for p in points {
            vp.start_time = vp.start_time.min(p.x as f64);
            vp.end_time = vp.end_time.max(p.x as f64);
            vp.min_price = vp.min_price.min(p.y);
            vp.max_price = vp.max_price.max(p.y);
        }
        Some(vp)
    }
}
