//! Open/close price chart: scales, curves, the scene scaffold and its renderer.

pub mod curve;
pub mod renderer;
pub mod scale;
pub mod scene;
pub mod svg;

pub const CANVAS_WIDTH: f64 = 900.0;
pub const CANVAS_HEIGHT: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size in scene units plus the margins around the plotting band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for ChartMargin {
    /// Wide right margin leaves room for the legend
    fn default() -> Self {
        Self::new(50.0, 200.0, 50.0, 60.0)
    }
}

impl ChartLayout {
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.margin.left, self.margin.left + self.inner_width())
    }

    /// Inverted: larger values sit higher, at smaller y.
    pub fn y_range(&self) -> (f64, f64) {
        (self.margin.top + self.inner_height(), self.margin.top)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            margin: ChartMargin::default(),
        }
    }
}
