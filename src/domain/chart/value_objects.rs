use derive_more::Display;
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// Value Object - how a series is stroked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[default]
    #[display(fmt = "Spline")]
    #[strum(serialize = "spline")]
    Spline,
    #[display(fmt = "Line")]
    #[strum(serialize = "line")]
    Line,
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// `#RRGGBB`, ready for canvas `fillStyle`/`strokeStyle`
    pub fn to_css(&self) -> String {
        format!("#{:06X}", self.to_hex())
    }

    pub const AXIS_BLUE: Color = Color::from_hex(0x4F81BC);

    /// Cycled through by series index
    pub const PALETTE: [Color; 6] = [
        Color::from_hex(0x4F81BC),
        Color::from_hex(0xC0504E),
        Color::from_hex(0x9BBB58),
        Color::from_hex(0x23BFAA),
        Color::from_hex(0x8064A1),
        Color::from_hex(0xF79647),
    ];

    pub fn for_series(index: usize) -> Color {
        Self::PALETTE[index % Self::PALETTE.len()]
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Value Object - one axis' decoration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub title: String,
    /// Label format for x values, e.g. `DDD HH:mm:ss`
    pub value_format: Option<String>,
    pub color: Option<Color>,
}

impl AxisConfig {
    pub fn new(title: &str) -> Self {
        Self { title: title.to_string(), value_format: None, color: None }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.value_format = Some(format.to_string());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Value Object - static chart decoration plus legend names
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub title: String,
    pub title_margin: u32,
    pub axis_x: AxisConfig,
    pub axis_y: AxisConfig,
    pub series_type: SeriesType,
}

impl ChartConfig {
    /// The "Live Reports" chart shown in the live view
    pub fn live_reports() -> Self {
        Self {
            title: "Live Reports".to_string(),
            title_margin: 50,
            axis_x: AxisConfig::new("Current time").with_format("DDD HH:mm:ss"),
            axis_y: AxisConfig::new("USD").with_color(Color::AXIS_BLUE),
            series_type: SeriesType::Spline,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::live_reports()
    }
}

/// Value Object - data-space bounds of a payload, mapped onto a pixel box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub start_time: f64,
    pub end_time: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { start_time: 0.0, end_time: 0.0, min_price: 0.0, max_price: 0.0, width, height }
    }

    pub fn time_range(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    /// A single timestamp is pinned to the left edge.
    pub fn time_to_x(&self, timestamp: f64) -> f64 {
        if self.time_range() == 0.0 {
            return 0.0;
        }
        (timestamp - self.start_time) / self.time_range() * self.width
    }

    /// A flat price range is drawn across the vertical middle.
    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.price_range() == 0.0 {
            return self.height / 2.0;
        }
        let normalized = (price - self.min_price) / self.price_range();
        self.height * (1.0 - normalized)
    }
}
