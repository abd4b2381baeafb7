use serde::Serialize;

use crate::domain::market_data::SampleSeries;

/// Plot gutter: 5 px margin on every side plus room for axis labels
pub const MARGIN: f64 = 5.0;
pub const Y_LABEL_GUTTER: f64 = 52.0;
pub const X_LABEL_GUTTER: f64 = 16.0;
pub const Y_TICK_COUNT: usize = 5;

/// Padding applied around a flat series so the line sits mid-height
const FLAT_PADDING: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        const EPS: f64 = 1e-6;
        point.x >= self.x - EPS
            && point.x <= self.right() + EPS
            && point.y >= self.y - EPS
            && point.y <= self.bottom() + EPS
    }
}

/// Label anchored at a pixel position along one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// One cubic piece of the monotone curve, starting where the previous ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSegment {
    pub control1: ScreenPoint,
    pub control2: ScreenPoint,
    pub end: ScreenPoint,
}

/// Screen-space layout of a sample series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePlot {
    pub frame: PlotRect,
    pub points: Vec<ScreenPoint>,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    pub domain: (f64, f64),
}

impl LinePlot {
    /// `None` when there is nothing sensible to draw: empty series,
    /// non-finite values or a canvas smaller than the gutters.
    pub fn layout(series: &SampleSeries, width: f64, height: f64) -> Option<Self> {
        let values: Vec<f64> = series.points().iter().map(|p| p.value.value()).collect();
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let frame = PlotRect {
            x: MARGIN + Y_LABEL_GUTTER,
            y: MARGIN,
            width: width - 2.0 * MARGIN - Y_LABEL_GUTTER,
            height: height - 2.0 * MARGIN - X_LABEL_GUTTER,
        };
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return None;
        }

        let (lo, hi) = value_domain(&values);
        let span = hi - lo;
        let to_y = |v: f64| frame.y + frame.height * (1.0 - ((v - lo) / span).clamp(0.0, 1.0));
        let to_x = |i: usize| {
            if values.len() == 1 {
                frame.x + frame.width / 2.0
            } else {
                frame.x + frame.width * i as f64 / (values.len() - 1) as f64
            }
        };

        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| ScreenPoint::new(to_x(i), to_y(*v)))
            .collect();

        let y_ticks = (0..Y_TICK_COUNT)
            .map(|i| {
                let value = lo + span * i as f64 / (Y_TICK_COUNT - 1) as f64;
                AxisTick { position: to_y(value), label: format!("{value:.2}") }
            })
            .collect();

        let x_ticks = series
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| AxisTick { position: to_x(i), label: p.slot.label().to_string() })
            .collect();

        Some(Self { frame, points, y_ticks, x_ticks, domain: (lo, hi) })
    }

    /// Index of the sample closest to the horizontal pixel `x`
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        self.points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
            .map(|(i, _)| i)
    }

    pub fn curve(&self) -> Vec<CurveSegment> {
        monotone_segments(&self.points)
    }
}

/// Min/max of the values, padded by 10% (or a fixed amount when flat)
fn value_domain(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        (min - FLAT_PADDING, max + FLAT_PADDING)
    } else {
        (min - span * 0.1, max + span * 0.1)
    }
}

fn sign(v: f64) -> f64 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

/// Interior tangent from the two neighbouring secants (Steffen-style limiter)
fn interior_tangent(p0: ScreenPoint, p1: ScreenPoint, p2: ScreenPoint) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() { t } else { 0.0 }
}

/// Endpoint tangent derived from the secant and the neighbouring tangent
fn end_tangent(p0: ScreenPoint, p1: ScreenPoint, neighbour: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (p1.y - p0.y) / h - neighbour) / 2.0
    }
}

/// Monotone-in-x cubic interpolation. Never overshoots between two samples.
pub fn monotone_segments(points: &[ScreenPoint]) -> Vec<CurveSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    if n == 2 {
        let (a, b) = (points[0], points[1]);
        let dx = (b.x - a.x) / 3.0;
        let slope = if b.x == a.x { 0.0 } else { (b.y - a.y) / (b.x - a.x) };
        return vec![CurveSegment {
            control1: ScreenPoint::new(a.x + dx, a.y + dx * slope),
            control2: ScreenPoint::new(b.x - dx, b.y - dx * slope),
            end: b,
        }];
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    points
        .windows(2)
        .zip(tangents.windows(2))
        .map(|(pair, t)| {
            let (a, b) = (pair[0], pair[1]);
            let dx = (b.x - a.x) / 3.0;
            CurveSegment {
                control1: ScreenPoint::new(a.x + dx, a.y + dx * t[0]),
                control2: ScreenPoint::new(b.x - dx, b.y - dx * t[1]),
                end: b,
            }
        })
        .collect()
}
