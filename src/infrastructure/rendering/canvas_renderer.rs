use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    chart::{ChartPayload, SeriesType, Viewport},
    logging::LogComponent,
};
use crate::time_utils::format_time_label;
use crate::log_trace;

const LEFT_GUTTER: f64 = 80.0;
const RIGHT_GUTTER: f64 = 20.0;
const BOTTOM_GUTTER: f64 = 60.0;

/// Pixel box the lines are drawn into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn for_canvas(width: u32, height: u32, title_margin: u32) -> Self {
        let top = title_margin as f64;
        Self {
            left: LEFT_GUTTER,
            top,
            width: (width as f64 - LEFT_GUTTER - RIGHT_GUTTER).max(1.0),
            height: (height as f64 - top - BOTTOM_GUTTER).max(1.0),
        }
    }
}

/// One series mapped to canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLine {
    pub label: String,
    pub stroke: String,
    pub in_legend: bool,
    pub points: Vec<(f64, f64)>,
}

/// Everything the draw pass needs, computed without touching the DOM.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedChart {
    pub area: PlotArea,
    pub viewport: Option<Viewport>,
    pub lines: Vec<ProjectedLine>,
}

/// Map a payload into canvas coordinates. Series with no points still get a
/// line entry so they show up in the legend.
pub fn project(payload: &ChartPayload, width: u32, height: u32) -> ProjectedChart {
    let area = PlotArea::for_canvas(width, height, payload.config.title_margin);
    let viewport = payload.viewport(area.width, area.height);

    let lines = payload
        .series
        .iter()
        .map(|series| ProjectedLine {
            label: series.name.clone(),
            stroke: series.color.to_css(),
            in_legend: series.show_in_legend,
            points: match &viewport {
                Some(vp) => series
                    .points
                    .iter()
                    .map(|p| (area.left + vp.time_to_x(p.x as f64), area.top + vp.price_to_y(p.y)))
                    .collect(),
                None => Vec::new(),
            },
        })
        .collect();

    ProjectedChart { area, viewport, lines }
}

/// Lines that get a legend entry, in series order
pub fn legend_lines(chart: &ProjectedChart) -> impl Iterator<Item = &ProjectedLine> {
    chart.lines.iter().filter(|line| line.in_legend)
}

/// Canvas 2D renderer for the live chart
pub struct CanvasChartRenderer {
    canvas_id: String,
    width: u32,
    height: u32,
}

impl CanvasChartRenderer {
    pub fn new(canvas_id: &str, width: u32, height: u32) -> Self {
        Self { canvas_id: canvas_id.to_string(), width, height }
    }

    fn context(&self) -> Result<CanvasRenderingContext2d, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| JsValue::from_str("chart canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("failed to cast to 2D context"))
    }

    pub fn render(&self, payload: &ChartPayload) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let chart = project(payload, self.width, self.height);

        ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
        ctx.set_fill_style_str("#ffffff");
        ctx.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);

        self.draw_title(&ctx, payload)?;
        self.draw_axes(&ctx, payload, &chart)?;
        for line in &chart.lines {
            draw_line(&ctx, line, payload.config.series_type);
        }
        self.draw_legend(&ctx, &chart)?;

        log_trace!(LogComponent::Infrastructure("CanvasRenderer"), "Drew {} series, {} points", chart.lines.len(), payload.point_count());
        Ok(())
    }

    fn draw_title(&self, ctx: &CanvasRenderingContext2d, payload: &ChartPayload) -> Result<(), JsValue> {
        ctx.set_fill_style_str("#333333");
        ctx.set_font("18px Arial");
        ctx.set_text_align("center");
        ctx.fill_text(&payload.config.title, self.width as f64 / 2.0, 30.0)?;
        ctx.set_text_align("start");
        Ok(())
    }

    fn draw_axes(
        &self,
        ctx: &CanvasRenderingContext2d,
        payload: &ChartPayload,
        chart: &ProjectedChart,
    ) -> Result<(), JsValue> {
        let area = chart.area;
        let y_color = payload.config.axis_y.color.map(|c| c.to_css()).unwrap_or_else(|| "#666666".to_string());

        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str(y_color.as_str());
        ctx.begin_path();
        ctx.move_to(area.left, area.top);
        ctx.line_to(area.left, area.top + area.height);
        ctx.stroke();

        ctx.set_stroke_style_str("#999999");
        ctx.begin_path();
        ctx.move_to(area.left, area.top + area.height);
        ctx.line_to(area.left + area.width, area.top + area.height);
        ctx.stroke();

        ctx.set_font("12px Arial");
        ctx.set_fill_style_str(y_color.as_str());
        ctx.fill_text(&payload.config.axis_y.title, 10.0, area.top - 10.0)?;

        ctx.set_fill_style_str("#666666");
        ctx.fill_text(
            &payload.config.axis_x.title,
            area.left + area.width / 2.0 - 40.0,
            area.top + area.height + 40.0,
        )?;

        if let Some(vp) = chart.viewport {
            ctx.set_fill_style_str(y_color.as_str());
            ctx.fill_text(&format!("{:.2}", vp.max_price), 10.0, area.top + 4.0)?;
            ctx.fill_text(&format!("{:.2}", vp.min_price), 10.0, area.top + area.height)?;

            ctx.set_fill_style_str("#666666");
            let label_y = area.top + area.height + 18.0;
            ctx.fill_text(&format_time_label(vp.start_time as u64), area.left, label_y)?;
            if vp.time_range() > 0.0 {
                ctx.set_text_align("end");
                ctx.fill_text(&format_time_label(vp.end_time as u64), area.left + area.width, label_y)?;
                ctx.set_text_align("start");
            }
        }
        Ok(())
    }

    fn draw_legend(&self, ctx: &CanvasRenderingContext2d, chart: &ProjectedChart) -> Result<(), JsValue> {
        ctx.set_font("12px Arial");
        let y = self.height as f64 - 8.0;
        let mut x = chart.area.left;
        for line in legend_lines(chart) {
            ctx.set_fill_style_str(line.stroke.as_str());
            ctx.fill_rect(x, y - 9.0, 10.0, 10.0);
            ctx.set_fill_style_str("#333333");
            ctx.fill_text(&line.label, x + 14.0, y)?;
            x += 14.0 + line.label.len() as f64 * 7.0 + 16.0;
        }
        Ok(())
    }
}

fn draw_line(ctx: &CanvasRenderingContext2d, line: &ProjectedLine, series_type: SeriesType) {
    let Some(&(x0, y0)) = line.points.first() else {
        return;
    };
    ctx.set_stroke_style_str(line.stroke.as_str());
    ctx.set_fill_style_str(line.stroke.as_str());
    ctx.set_line_width(2.0);

    if line.points.len() == 1 {
        ctx.fill_rect(x0 - 2.0, y0 - 2.0, 4.0, 4.0);
        return;
    }

    ctx.begin_path();
    ctx.move_to(x0, y0);
    match series_type {
        SeriesType::Line => {
            for &(x, y) in &line.points[1..] {
                ctx.line_to(x, y);
            }
        }
        SeriesType::Spline => {
            // Curve through midpoints, ending on the last real point
            for pair in line.points.windows(2) {
                let (cx, cy) = pair[0];
                let (nx, ny) = pair[1];
                ctx.quadratic_curve_to(cx, cy, (cx + nx) / 2.0, (cy + ny) / 2.0);
            }
            if let Some(&(lx, ly)) = line.points.last() {
                ctx.line_to(lx, ly);
            }
        }
    }
    ctx.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartConfig, ChartPoint, Color, LineSeries};
    use crate::domain::market_data::Symbol;

    fn payload(points: Vec<ChartPoint>) -> ChartPayload {
        ChartPayload {
            config: ChartConfig::live_reports(),
            series: vec![LineSeries {
                symbol: Symbol::from("BTC"),
                name: "Bitcoin".to_string(),
                color: Color::for_series(0),
                show_in_legend: true,
                points,
            }],
        }
    }

    #[test]
    fn plot_area_leaves_room_for_title_and_labels() {
        let area = PlotArea::for_canvas(900, 420, 50);
        assert_eq!(area.top, 50.0);
        assert_eq!(area.left + area.width, 900.0 - RIGHT_GUTTER);
        assert_eq!(area.top + area.height, 420.0 - BOTTOM_GUTTER);
    }

    #[test]
    fn empty_payload_keeps_legend_entries() {
        let chart = project(&payload(Vec::new()), 900, 420);
        assert!(chart.viewport.is_none());
        assert_eq!(chart.lines.len(), 1);
        assert_eq!(chart.lines[0].label, "Bitcoin");
        assert!(chart.lines[0].points.is_empty());
    }

    #[test]
    fn points_span_the_plot_area() {
        let chart = project(
            &payload(vec![ChartPoint { x: 1_000, y: 10.0 }, ChartPoint { x: 3_000, y: 20.0 }]),
            900,
            420,
        );
        let area = chart.area;
        let points = &chart.lines[0].points;
        assert_eq!(points[0], (area.left, area.top + area.height));
        assert_eq!(points[1], (area.left + area.width, area.top));
    }

    #[test]
    fn single_point_sits_mid_height_on_left_edge() {
        let chart = project(&payload(vec![ChartPoint { x: 5, y: 50_000.0 }]), 900, 420);
        let area = chart.area;
        assert_eq!(chart.lines[0].points[0], (area.left, area.top + area.height / 2.0));
    }

    #[test]
    fn hidden_series_is_drawn_but_left_out_of_the_legend() {
        let mut payload = payload(vec![ChartPoint { x: 1_000, y: 10.0 }]);
        payload.series.push(LineSeries {
            symbol: Symbol::from("ETH"),
            name: "Ethereum".to_string(),
            color: Color::for_series(1),
            show_in_legend: false,
            points: vec![ChartPoint { x: 1_000, y: 20.0 }],
        });

        let chart = project(&payload, 900, 420);
        assert_eq!(chart.lines.len(), 2);
        assert_eq!(chart.lines[1].points.len(), 1);

        let labels: Vec<&str> = legend_lines(&chart).map(|line| line.label.as_str()).collect();
        assert_eq!(labels, vec!["Bitcoin"]);
    }
}
