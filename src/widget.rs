//! The stock chart component: a dataset, the company/month filter and the renderer.
//!
//! The chart is re-rendered synchronously exactly once for every effective change of the
//! dataset or the selection. Setting a value equal to the current one is a no-op.

use log::debug;

use crate::{
    chart::{
        ChartLayout,
        renderer::{ChartRenderer, RenderState},
        scene::Scene,
        svg,
    },
    data::{
        filter::filter_series,
        point::{Company, DataPoint, Month},
    },
    selection::FilterSelection,
};

pub struct StockChart {
    dataset: Vec<DataPoint>,
    selection: FilterSelection,
    renderer: ChartRenderer,
    render_count: usize,
}

impl StockChart {
    pub fn new(dataset: Vec<DataPoint>) -> Self {
        Self::with_selection(dataset, FilterSelection::default())
    }

    pub fn with_selection(dataset: Vec<DataPoint>, selection: FilterSelection) -> Self {
        let mut chart = Self {
            dataset,
            selection,
            renderer: ChartRenderer::create(ChartLayout::default()),
            render_count: 0,
        };
        chart.refresh();

        chart
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    pub fn dataset(&self) -> &[DataPoint] {
        &self.dataset
    }

    /// The series currently drawn
    pub fn filtered(&self) -> &[DataPoint] {
        self.renderer.series()
    }

    pub fn renderer(&self) -> &ChartRenderer {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn state(&self) -> RenderState {
        self.renderer.state()
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn set_company(&mut self, company: Company) -> bool {
        let changed = self.selection.set_company(company);
        if changed {
            self.refresh();
        }

        changed
    }

    pub fn set_month(&mut self, month: Month) -> bool {
        let changed = self.selection.set_month(month);
        if changed {
            self.refresh();
        }

        changed
    }

    pub fn set_dataset(&mut self, dataset: Vec<DataPoint>) {
        self.dataset = dataset;
        self.refresh();
    }

    /// Feeds the latest pointer position (scene units, `None` once it leaves the canvas) and
    /// turns successive positions into enter/move/leave events for markers and legend items.
    pub fn pointer(&mut self, position: Option<(f64, f64)>) {
        let hover = *self.renderer.hover();

        let marker = position.and_then(|p| self.renderer.marker_at(p));
        if hover.marker != marker {
            if hover.marker.is_some() {
                self.renderer.marker_leave();
            }
            if let Some(marker) = marker {
                self.renderer.marker_enter(marker);
            }
        }
        if let (Some(marker), Some(position)) = (marker, position) {
            self.renderer.marker_move(marker, position);
        }

        let legend = position.and_then(|p| self.renderer.legend_at(p));
        if hover.legend != legend {
            if let Some(series) = hover.legend {
                self.renderer.legend_leave(series);
            }
            if let Some(series) = legend {
                self.renderer.legend_enter(series);
            }
        }
    }

    pub fn to_svg(&self) -> String {
        svg::to_svg(self.renderer.scene())
    }

    fn refresh(&mut self) {
        let series = filter_series(
            &self.dataset,
            self.selection.company(),
            self.selection.month(),
        );
        debug!(
            "Filter {} / {}: {} of {} points",
            self.selection.company(),
            self.selection.month(),
            series.len(),
            self.dataset.len()
        );

        self.renderer.update(&series);
        self.render_count += 1;
    }
}
