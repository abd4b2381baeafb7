pub mod line_chart_renderer;
pub mod line_plot;

pub use line_chart_renderer::{CHART_HEIGHT, CHART_WIDTH, LineChartRenderer};
pub use line_plot::{AxisTick, CurveSegment, LinePlot, PlotRect, ScreenPoint};
