use log::debug;
use strum::IntoEnumIterator;

use crate::{
    chart::{
        ChartLayout,
        curve::monotone_x,
        scale::Scales,
        scene::{
            BASE_STROKE_WIDTH, HIGHLIGHT_STROKE_WIDTH, LEGEND_ITEM_SPACING, LEGEND_OFFSET_X,
            LegendItem, MARKER_RADIUS, Marker, Scene, SeriesKind, Tick,
        },
    },
    data::point::DataPoint,
    utils::{
        datetime::{date_to_day_month, date_to_day_month_year},
        text::format_fixed,
    },
};

/// Days between x-axis ticks
pub const X_TICK_EVERY_DAYS: u32 = 2;
/// Approximate number of y-axis ticks
pub const Y_TICK_COUNT: usize = 10;

pub const TOOLTIP_OFFSET: (f64, f64) = (20.0, -40.0);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderState {
    Scaffolded,
    Rendered,
    Empty,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MarkerRef {
    pub series: SeriesKind,
    pub index: usize,
}

/// What the pointer is currently over; never outlives the next `update`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HoverState {
    pub marker: Option<MarkerRef>,
    pub legend: Option<SeriesKind>,
}

pub struct ChartRenderer {
    scene: Scene,
    series: Vec<DataPoint>,
    scales: Option<Scales>,
    hover: HoverState,
    state: RenderState,
}

impl ChartRenderer {
    /// Builds the static scaffold; nothing is drawn until the first `update`.
    pub fn create(layout: ChartLayout) -> Self {
        Self {
            scene: Scene::scaffold(layout),
            series: vec![],
            scales: None,
            hover: HoverState::default(),
            state: RenderState::Scaffolded,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn series(&self) -> &[DataPoint] {
        &self.series
    }

    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Re-applies every derived attribute of the scaffold from `series`. Calling it again with
    /// the same series yields the same scene.
    pub fn update(&mut self, series: &[DataPoint]) {
        self.series = series.to_vec();
        self.hover = HoverState::default();
        self.scene.tooltip.opacity = 0.0;

        let Some(scales) = Scales::from_series(series, &self.scene.layout) else {
            self.scales = None;
            self.scene.set_chart_visible(false);
            self.state = RenderState::Empty;
            debug!("Render empty state");
            return;
        };

        self.scene.set_chart_visible(true);
        self.render_axes(&scales);
        for kind in SeriesKind::iter() {
            self.render_line(kind, &scales);
            self.render_markers(kind, &scales);
        }
        self.render_legend();

        self.scales = Some(scales);
        self.state = RenderState::Rendered;
        debug!("Render {} points", series.len());
    }

    pub fn marker_enter(&mut self, marker: MarkerRef) {
        if !self.is_live(marker) {
            return;
        }

        self.hover.marker = Some(marker);
        self.scene.tooltip.opacity = 1.0;
    }

    /// Moves the tooltip next to the pointer and fills it from the hovered data point.
    pub fn marker_move(&mut self, marker: MarkerRef, (x, y): (f64, f64)) {
        if !self.is_live(marker) {
            return;
        }

        let point = &self.series[marker.index];
        let tooltip = &mut self.scene.tooltip;
        tooltip.translate = (x + TOOLTIP_OFFSET.0, y + TOOLTIP_OFFSET.1);
        tooltip.lines = [
            format!("Date: {}", date_to_day_month_year(&point.date())),
            format!("Open: {}", format_fixed(point.open(), 2)),
            format!("Close: {}", format_fixed(point.close(), 2)),
            format!("Diff: {}", format_fixed(point.diff(), 2)),
        ];

        self.hover.marker = Some(marker);
    }

    pub fn marker_leave(&mut self) {
        self.hover.marker = None;
        self.scene.tooltip.opacity = 0.0;
    }

    pub fn legend_enter(&mut self, series: SeriesKind) {
        if self.state != RenderState::Rendered {
            return;
        }

        self.scene.line_mut(series).stroke_width = HIGHLIGHT_STROKE_WIDTH;
        self.hover.legend = Some(series);
    }

    pub fn legend_leave(&mut self, series: SeriesKind) {
        self.scene.line_mut(series).stroke_width = BASE_STROKE_WIDTH;
        if self.hover.legend == Some(series) {
            self.hover.legend = None;
        }
    }

    /// Topmost visible marker under `pointer`: Close markers are drawn over Open ones and later
    /// markers over earlier ones.
    pub fn marker_at(&self, pointer: (f64, f64)) -> Option<MarkerRef> {
        [SeriesKind::Close, SeriesKind::Open]
            .into_iter()
            .filter(|kind| self.scene.markers(*kind).visible)
            .find_map(|kind| {
                self.scene
                    .markers(kind)
                    .markers
                    .iter()
                    .rev()
                    .find(|m| m.contains(pointer))
                    .map(|m| MarkerRef {
                        series: kind,
                        index: m.index,
                    })
            })
    }

    pub fn legend_at(&self, (x, y): (f64, f64)) -> Option<SeriesKind> {
        let legend = &self.scene.legend;
        if !legend.visible {
            return None;
        }

        let local = (x - legend.translate.0, y - legend.translate.1);
        legend
            .items
            .iter()
            .find(|item| item.contains(local))
            .map(|item| item.series)
    }

    fn is_live(&self, marker: MarkerRef) -> bool {
        self.state == RenderState::Rendered && marker.index < self.series.len()
    }

    fn render_axes(&mut self, scales: &Scales) {
        let layout = self.scene.layout;

        let x_axis = &mut self.scene.x_axis;
        x_axis.translate = (0.0, layout.y_range().0);
        x_axis.range = scales.x.range();
        x_axis.ticks = scales
            .x
            .ticks_every_days(X_TICK_EVERY_DAYS)
            .iter()
            .map(|d| Tick {
                offset: scales.x.map(d),
                label: date_to_day_month(d),
            })
            .collect();

        let y_axis = &mut self.scene.y_axis;
        y_axis.translate = (layout.x_range().0, 0.0);
        y_axis.range = scales.y.range();
        y_axis.ticks = scales
            .y
            .ticks(Y_TICK_COUNT)
            .into_iter()
            .map(|v| Tick {
                offset: scales.y.map(v),
                label: scales.y.format_tick(v, Y_TICK_COUNT),
            })
            .collect();
    }

    fn render_line(&mut self, kind: SeriesKind, scales: &Scales) {
        let points: Vec<(f64, f64)> = self
            .series
            .iter()
            .map(|p| (scales.x.map(&p.date()), scales.y.map(kind.value(p))))
            .collect();

        let line = self.scene.line_mut(kind);
        line.path = monotone_x(&points);
        line.stroke_width = BASE_STROKE_WIDTH;
    }

    fn render_markers(&mut self, kind: SeriesKind, scales: &Scales) {
        let markers: Vec<Marker> = self
            .series
            .iter()
            .enumerate()
            .map(|(index, p)| Marker {
                cx: scales.x.map(&p.date()),
                cy: scales.y.map(kind.value(p)),
                r: MARKER_RADIUS,
                index,
            })
            .collect();

        self.scene.markers_mut(kind).markers = markers;
    }

    fn render_legend(&mut self) {
        let layout = self.scene.layout;
        let legend = &mut self.scene.legend;

        legend.translate = (
            layout.margin.left + layout.inner_width() - LEGEND_OFFSET_X,
            layout.margin.top,
        );
        legend.items = SeriesKind::iter()
            .enumerate()
            .map(|(i, series)| LegendItem {
                series,
                offset_y: i as f64 * LEGEND_ITEM_SPACING,
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn point(company: &str, y: i32, m: u32, d: u32, open: f64, close: f64) -> DataPoint {
        DataPoint::new(company, NaiveDate::from_ymd_opt(y, m, d).unwrap(), open, close).unwrap()
    }

    fn scenario_series() -> Vec<DataPoint> {
        vec![
            point("Apple", 2020, 11, 3, 100.0, 105.0),
            point("Apple", 2020, 11, 10, 110.0, 108.0),
        ]
    }

    fn rendered() -> ChartRenderer {
        let mut renderer = ChartRenderer::create(ChartLayout::default());
        renderer.update(&scenario_series());
        renderer
    }

    #[test]
    fn test_create_is_scaffolded() {
        let renderer = ChartRenderer::create(ChartLayout::default());

        assert_eq!(renderer.state(), RenderState::Scaffolded);
        assert!(renderer.scales().is_none());
        assert!(renderer.series().is_empty());
    }

    #[test]
    fn test_update_renders_scales_and_elements() {
        let renderer = rendered();
        let scene = renderer.scene();
        let scales = renderer.scales().unwrap();

        assert_eq!(renderer.state(), RenderState::Rendered);
        assert_eq!(scales.y.domain(), (90.0, 120.0));
        assert!(!scene.empty_message.visible);

        assert_eq!(scene.x_axis.translate, (0.0, 450.0));
        assert_eq!(
            scene
                .x_axis
                .ticks
                .iter()
                .map(|t| t.label.as_str())
                .collect::<Vec<_>>(),
            vec!["03-Nov", "05-Nov", "07-Nov", "09-Nov"]
        );
        assert_eq!(scene.x_axis.ticks[0].offset, 60.0);
        assert_eq!(scene.y_axis.translate, (60.0, 0.0));
        assert_eq!(scene.y_axis.ticks.first().unwrap().label, "90");
        assert_eq!(scene.y_axis.ticks.first().unwrap().offset, 450.0);
        assert_eq!(scene.y_axis.ticks.last().unwrap().label, "120");

        assert_eq!(scene.line_open.path.len(), 2);
        assert_eq!(scene.line_close.stroke_width, BASE_STROKE_WIDTH);

        let open = &scene.markers_open.markers;
        assert_eq!(open.len(), 2);
        assert_eq!((open[0].cx, open[0].r), (60.0, 4.0));
        assert!((open[0].cy - (450.0 - 400.0 / 3.0)).abs() < 1e-9);
        assert_eq!(open[1].cx, 700.0);
        assert!((open[1].cy - (50.0 + 400.0 / 3.0)).abs() < 1e-9);
        let close = &scene.markers_close.markers;
        assert_eq!((close[0].cx, close[0].cy), (60.0, 250.0));

        assert_eq!(scene.legend.translate, (550.0, 50.0));
        assert_eq!(
            scene.legend.items,
            vec![
                LegendItem {
                    series: SeriesKind::Open,
                    offset_y: 0.0
                },
                LegendItem {
                    series: SeriesKind::Close,
                    offset_y: 25.0
                },
            ]
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut renderer = rendered();
        let first = renderer.scene().clone();

        renderer.update(&scenario_series());

        assert_eq!(renderer.scene(), &first);
        assert_eq!(renderer.scene().legend.items.len(), 2);
    }

    #[test]
    fn test_update_empty_shows_message() {
        let mut renderer = rendered();

        renderer.update(&[]);
        let scene = renderer.scene();

        assert_eq!(renderer.state(), RenderState::Empty);
        assert!(renderer.scales().is_none());
        assert!(scene.empty_message.visible);
        assert!(!scene.x_axis.visible && !scene.y_axis.visible);
        assert!(!scene.line_open.visible && !scene.line_close.visible);
        assert!(!scene.markers_open.visible && !scene.markers_close.visible);
        assert!(!scene.legend.visible && !scene.tooltip.visible);
        assert_eq!(renderer.marker_at((60.0, 350.0)), None);
        assert_eq!(renderer.legend_at((555.0, 50.0)), None);

        renderer.update(&scenario_series());
        assert_eq!(renderer.state(), RenderState::Rendered);
        assert!(!renderer.scene().empty_message.visible);
        assert!(renderer.scene().markers_open.visible);
    }

    #[test]
    fn test_tooltip_on_marker_hover() {
        let mut renderer = rendered();
        let marker = MarkerRef {
            series: SeriesKind::Open,
            index: 0,
        };

        renderer.marker_enter(marker);
        assert_eq!(renderer.scene().tooltip.opacity, 1.0);

        renderer.marker_move(marker, (61.0, 349.0));
        let tooltip = &renderer.scene().tooltip;
        assert_eq!(tooltip.translate, (81.0, 309.0));
        assert_eq!(
            tooltip.lines,
            [
                "Date: 03-Nov-2020".to_string(),
                "Open: 100.00".to_string(),
                "Close: 105.00".to_string(),
                "Diff: 5.00".to_string(),
            ]
        );
        assert_eq!(renderer.hover().marker, Some(marker));

        renderer.marker_leave();
        assert_eq!(renderer.scene().tooltip.opacity, 0.0);
        assert_eq!(renderer.hover().marker, None);
    }

    #[test]
    fn test_tooltip_negative_diff() {
        let mut renderer = rendered();
        let marker = MarkerRef {
            series: SeriesKind::Close,
            index: 1,
        };

        renderer.marker_move(marker, (700.0, 80.0));

        assert_eq!(renderer.scene().tooltip.lines[3], "Diff: -2.00");
    }

    #[test]
    fn test_tooltip_rounds_half_up() {
        let mut renderer = ChartRenderer::create(ChartLayout::default());
        renderer.update(&[point("Apple", 2020, 11, 3, 100.125, 100.375)]);
        let marker = MarkerRef {
            series: SeriesKind::Open,
            index: 0,
        };

        renderer.marker_move(marker, (380.0, 250.0));

        assert_eq!(
            renderer.scene().tooltip.lines,
            [
                "Date: 03-Nov-2020".to_string(),
                "Open: 100.13".to_string(),
                "Close: 100.38".to_string(),
                "Diff: 0.25".to_string(),
            ]
        );
    }

    #[test]
    fn test_update_hides_tooltip() {
        let mut renderer = rendered();
        let marker = MarkerRef {
            series: SeriesKind::Open,
            index: 1,
        };
        renderer.marker_enter(marker);

        renderer.update(&scenario_series());

        assert_eq!(renderer.scene().tooltip.opacity, 0.0);
        assert_eq!(renderer.hover(), &HoverState::default());
    }

    #[test]
    fn test_stale_marker_is_ignored() {
        let mut renderer = rendered();
        renderer.update(&scenario_series()[..1]);

        renderer.marker_enter(MarkerRef {
            series: SeriesKind::Open,
            index: 1,
        });

        assert_eq!(renderer.scene().tooltip.opacity, 0.0);
        assert_eq!(renderer.hover().marker, None);
    }

    #[test]
    fn test_legend_hover_highlights_line() {
        let mut renderer = rendered();
        let before = renderer.scene().clone();

        renderer.legend_enter(SeriesKind::Close);
        assert_eq!(renderer.scene().line_close.stroke_width, 4.0);
        assert_eq!(renderer.scene().line_open.stroke_width, 2.0);
        assert_eq!(renderer.hover().legend, Some(SeriesKind::Close));

        renderer.legend_leave(SeriesKind::Close);
        assert_eq!(renderer.scene(), &before);
        assert_eq!(renderer.hover().legend, None);
    }

    #[test]
    fn test_marker_at() {
        let renderer = rendered();

        assert_eq!(
            renderer.marker_at((61.0, 317.0)),
            Some(MarkerRef {
                series: SeriesKind::Open,
                index: 0
            })
        );
        assert_eq!(
            renderer.marker_at((60.0, 250.0)),
            Some(MarkerRef {
                series: SeriesKind::Close,
                index: 0
            })
        );
        assert_eq!(renderer.marker_at((300.0, 300.0)), None);
    }

    #[test]
    fn test_marker_at_prefers_close_when_overlapping() {
        let mut renderer = ChartRenderer::create(ChartLayout::default());
        renderer.update(&[point("Apple", 2020, 11, 3, 100.0, 100.0)]);

        assert_eq!(
            renderer.marker_at((380.0, 250.0)),
            Some(MarkerRef {
                series: SeriesKind::Close,
                index: 0
            })
        );
    }

    #[test]
    fn test_legend_at() {
        let renderer = rendered();

        assert_eq!(renderer.legend_at((560.0, 50.0)), Some(SeriesKind::Open));
        assert_eq!(renderer.legend_at((590.0, 78.0)), Some(SeriesKind::Close));
        assert_eq!(renderer.legend_at((540.0, 50.0)), None);
        assert_eq!(renderer.legend_at((560.0, 100.0)), None);
    }
}
