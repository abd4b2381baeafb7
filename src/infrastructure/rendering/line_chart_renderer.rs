use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::line_plot::LinePlot;
use crate::domain::{
    errors::{AppError, RenderingResult},
    logging::LogComponent,
    market_data::SampleSeries,
};
use crate::log_debug;

pub const CHART_WIDTH: u32 = 600;
pub const CHART_HEIGHT: u32 = 120;

const GRID_COLOR: &str = "#ffffff20";
const AXIS_COLOR: &str = "#ffffff60";
const LINE_COLOR: &str = "#3b82f6";
const AXIS_FONT: &str = "10px sans-serif";

/// Canvas 2D renderer for the trend line
#[derive(Debug, Clone, Copy)]
pub struct LineChartRenderer {
    width: u32,
    height: u32,
}

impl Default for LineChartRenderer {
    fn default() -> Self {
        Self::new(CHART_WIDTH, CHART_HEIGHT)
    }
}

impl LineChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn layout(&self, series: &SampleSeries) -> Option<LinePlot> {
        LinePlot::layout(series, self.width as f64, self.height as f64)
    }

    fn context(&self, canvas: &HtmlCanvasElement) -> RenderingResult<CanvasRenderingContext2d> {
        canvas.set_width(self.width);
        canvas.set_height(self.height);

        canvas
            .get_context("2d")
            .map_err(|_| AppError::Rendering("Failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::Rendering("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Rendering("Failed to cast to 2D context".to_string()))
    }

    /// Clear the canvas and draw grid, axis labels and the series line
    pub fn draw(&self, canvas: &HtmlCanvasElement, series: &SampleSeries) -> RenderingResult<()> {
        let context = self.context(canvas)?;
        context.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);

        let Some(plot) = self.layout(series) else {
            log_debug!(
                LogComponent::Infrastructure("LineChartRenderer"),
                "Nothing to draw for {}",
                series.instrument()
            );
            return Ok(());
        };

        self.draw_grid(&context, &plot).map_err(js_error)?;
        self.draw_labels(&context, &plot).map_err(js_error)?;
        self.draw_line(&context, &plot);

        log_debug!(
            LogComponent::Infrastructure("LineChartRenderer"),
            "Rendered {} samples for {}",
            plot.points.len(),
            series.instrument()
        );
        Ok(())
    }

    fn draw_grid(&self, context: &CanvasRenderingContext2d, plot: &LinePlot) -> Result<(), JsValue> {
        let frame = plot.frame;
        context.save();
        context.set_stroke_style_str(GRID_COLOR);
        context.set_line_width(1.0);
        let dash = js_sys::Array::of2(&JsValue::from_f64(3.0), &JsValue::from_f64(3.0));
        context.set_line_dash(&dash)?;

        context.begin_path();
        for tick in &plot.y_ticks {
            context.move_to(frame.x, tick.position);
            context.line_to(frame.right(), tick.position);
        }
        for tick in &plot.x_ticks {
            context.move_to(tick.position, frame.y);
            context.line_to(tick.position, frame.bottom());
        }
        context.stroke();
        context.restore();
        Ok(())
    }

    fn draw_labels(&self, context: &CanvasRenderingContext2d, plot: &LinePlot) -> Result<(), JsValue> {
        let frame = plot.frame;
        context.set_fill_style_str(AXIS_COLOR);
        context.set_font(AXIS_FONT);

        context.set_text_align("right");
        context.set_text_baseline("middle");
        for tick in &plot.y_ticks {
            context.fill_text(&tick.label, frame.x - 4.0, tick.position)?;
        }

        context.set_text_align("center");
        context.set_text_baseline("top");
        for tick in &plot.x_ticks {
            context.fill_text(&tick.label, tick.position, frame.bottom() + 4.0)?;
        }
        Ok(())
    }

    fn draw_line(&self, context: &CanvasRenderingContext2d, plot: &LinePlot) {
        let Some(start) = plot.points.first() else {
            return;
        };
        context.set_stroke_style_str(LINE_COLOR);
        context.set_line_width(2.0);
        context.set_line_join("round");
        context.begin_path();
        context.move_to(start.x, start.y);
        for segment in plot.curve() {
            context.bezier_curve_to(
                segment.control1.x,
                segment.control1.y,
                segment.control2.x,
                segment.control2.y,
                segment.end.x,
                segment.end.y,
            );
        }
        context.stroke();
    }
}

fn js_error(err: JsValue) -> AppError {
    AppError::Rendering(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
