//! The chart's persistent scaffold. Every element is a named handle created once by
//! [`Scene::scaffold`]; rendering only rewrites the attributes of these handles.

use crate::{
    chart::{ChartLayout, curve::PathCommand},
    data::point::DataPoint,
};

pub const BASE_STROKE_WIDTH: f64 = 2.0;
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 4.0;
pub const MARKER_RADIUS: f64 = 4.0;

pub const TICK_SIZE: f64 = 6.0;
pub const TICK_PADDING: f64 = 3.0;

pub const TOOLTIP_WIDTH: f64 = 180.0;
pub const TOOLTIP_HEIGHT: f64 = 100.0;
pub const TOOLTIP_TEXT_X: f64 = 10.0;
pub const TOOLTIP_LINE_HEIGHT: f64 = 20.0;

pub const LEGEND_OFFSET_X: f64 = 150.0;
pub const LEGEND_ITEM_SPACING: f64 = 25.0;
pub const LEGEND_SWATCH_SIZE: f64 = 20.0;
pub const LEGEND_TEXT_X: f64 = 30.0;
pub const LEGEND_ITEM_WIDTH: f64 = 80.0;

pub const EMPTY_MESSAGE: &str = "No data available for the selected company and month.";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const OPEN_COLOR: Rgb = Rgb(0xb2, 0xdf, 0x8a);
pub const CLOSE_COLOR: Rgb = Rgb(0xe4, 0x1a, 0x1c);

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum::Display, strum::EnumIter)]
pub enum SeriesKind {
    Open,
    Close,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position along the axis, in scene units
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisNode {
    pub visible: bool,
    pub orient: AxisOrient,
    pub translate: (f64, f64),
    pub range: (f64, f64),
    pub ticks: Vec<Tick>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineNode {
    pub visible: bool,
    pub series: SeriesKind,
    pub stroke_width: f64,
    pub path: Vec<PathCommand>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    /// Index into the rendered series
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkersNode {
    pub visible: bool,
    pub series: SeriesKind,
    pub markers: Vec<Marker>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipNode {
    pub visible: bool,
    pub opacity: f64,
    pub translate: (f64, f64),
    pub lines: [String; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub series: SeriesKind,
    pub offset_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendNode {
    pub visible: bool,
    pub translate: (f64, f64),
    pub items: Vec<LegendItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageNode {
    pub visible: bool,
    pub position: (f64, f64),
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub layout: ChartLayout,
    pub x_axis: AxisNode,
    pub y_axis: AxisNode,
    pub line_open: LineNode,
    pub line_close: LineNode,
    pub markers_open: MarkersNode,
    pub markers_close: MarkersNode,
    pub tooltip: TooltipNode,
    pub legend: LegendNode,
    pub empty_message: MessageNode,
}

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl SeriesKind {
    pub fn color(&self) -> Rgb {
        match self {
            SeriesKind::Open => OPEN_COLOR,
            SeriesKind::Close => CLOSE_COLOR,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            SeriesKind::Open => "open",
            SeriesKind::Close => "close",
        }
    }

    pub fn value(&self, point: &DataPoint) -> f64 {
        match self {
            SeriesKind::Open => point.open(),
            SeriesKind::Close => point.close(),
        }
    }
}

impl AxisNode {
    fn new(orient: AxisOrient) -> Self {
        Self {
            visible: true,
            orient,
            translate: (0.0, 0.0),
            range: (0.0, 0.0),
            ticks: vec![],
        }
    }
}

impl LineNode {
    fn new(series: SeriesKind) -> Self {
        Self {
            visible: true,
            series,
            stroke_width: BASE_STROKE_WIDTH,
            path: vec![],
        }
    }
}

impl MarkersNode {
    fn new(series: SeriesKind) -> Self {
        Self {
            visible: true,
            series,
            markers: vec![],
        }
    }
}

impl Marker {
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        let (dx, dy) = (x - self.cx, y - self.cy);
        dx * dx + dy * dy <= self.r * self.r
    }
}

impl LegendItem {
    /// Hit box of the swatch plus its label, relative to the legend origin.
    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        let top = self.offset_y - LEGEND_SWATCH_SIZE / 2.0;
        (0.0..=LEGEND_ITEM_WIDTH).contains(&x) && (top..=top + LEGEND_SWATCH_SIZE).contains(&y)
    }
}

impl Scene {
    pub fn scaffold(layout: ChartLayout) -> Self {
        Self {
            layout,
            x_axis: AxisNode::new(AxisOrient::Bottom),
            y_axis: AxisNode::new(AxisOrient::Left),
            line_open: LineNode::new(SeriesKind::Open),
            line_close: LineNode::new(SeriesKind::Close),
            markers_open: MarkersNode::new(SeriesKind::Open),
            markers_close: MarkersNode::new(SeriesKind::Close),
            tooltip: TooltipNode {
                visible: true,
                opacity: 0.0,
                translate: (0.0, 0.0),
                lines: Default::default(),
            },
            legend: LegendNode {
                visible: true,
                translate: (0.0, 0.0),
                items: vec![],
            },
            empty_message: MessageNode {
                visible: false,
                position: layout.center(),
                text: EMPTY_MESSAGE.to_string(),
            },
        }
    }

    pub fn line(&self, series: SeriesKind) -> &LineNode {
        match series {
            SeriesKind::Open => &self.line_open,
            SeriesKind::Close => &self.line_close,
        }
    }

    pub fn line_mut(&mut self, series: SeriesKind) -> &mut LineNode {
        match series {
            SeriesKind::Open => &mut self.line_open,
            SeriesKind::Close => &mut self.line_close,
        }
    }

    pub fn markers(&self, series: SeriesKind) -> &MarkersNode {
        match series {
            SeriesKind::Open => &self.markers_open,
            SeriesKind::Close => &self.markers_close,
        }
    }

    pub fn markers_mut(&mut self, series: SeriesKind) -> &mut MarkersNode {
        match series {
            SeriesKind::Open => &mut self.markers_open,
            SeriesKind::Close => &mut self.markers_close,
        }
    }

    /// Shows either the chart elements or the empty-state message, never both.
    pub fn set_chart_visible(&mut self, visible: bool) {
        self.x_axis.visible = visible;
        self.y_axis.visible = visible;
        self.line_open.visible = visible;
        self.line_close.visible = visible;
        self.markers_open.visible = visible;
        self.markers_close.visible = visible;
        self.tooltip.visible = visible;
        self.legend.visible = visible;
        self.empty_message.visible = !visible;
    }
}
