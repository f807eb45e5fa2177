use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Sense, Stroke, StrokeKind,
    epaint::CubicBezierShape, vec2,
};
use log::warn;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use crate::{
    CHANNEL_BUFFER_DEFAULT,
    chart::{
        curve::PathCommand,
        scene::{
            AxisNode, AxisOrient, LEGEND_SWATCH_SIZE, LEGEND_TEXT_X, LegendNode, LineNode,
            MarkersNode, MessageNode, Rgb, Scene, TICK_PADDING, TICK_SIZE, TOOLTIP_HEIGHT,
            TOOLTIP_LINE_HEIGHT, TOOLTIP_TEXT_X, TOOLTIP_WIDTH, TooltipNode,
        },
    },
    data::{
        loader,
        point::{Company, DataPoint, Month},
    },
    error::ScError,
    widget::StockChart,
};

const AXIS_COLOR: Color32 = Color32::from_gray(60);
const FONT_SIZE: f32 = 12.0;

pub struct ChartViewer {
    dataset_path: PathBuf,
    delimiter: u8,

    load_event_sender: mpsc::Sender<LoadEvent>,
    load_event_receiver: mpsc::Receiver<LoadEvent>,
    loading: bool,

    chart: StockChart,

    warning_message: Option<String>,
}

enum LoadEvent {
    Finished(Vec<DataPoint>),
    Error(ScError),
}

/// Maps scene units onto the painted rect.
#[derive(Clone, Copy)]
struct Viewport {
    origin: Pos2,
    scale: f32,
}

impl ChartViewer {
    pub fn new(cc: &eframe::CreationContext, dataset_path: &Path, delimiter: u8) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let (load_event_sender, load_event_receiver) =
            mpsc::channel::<LoadEvent>(CHANNEL_BUFFER_DEFAULT);

        Self {
            dataset_path: dataset_path.to_path_buf(),
            delimiter,

            load_event_sender,
            load_event_receiver,
            loading: false,

            chart: StockChart::new(vec![]),

            warning_message: None,
        }
    }

    fn load_dataset(&mut self) {
        self.warning_message = None;
        self.loading = true;

        let dataset_path = self.dataset_path.clone();
        let delimiter = self.delimiter;
        let load_event_sender = self.load_event_sender.clone();

        tokio::spawn(async move {
            let event = match loader::load_csv(&dataset_path, delimiter).await {
                Ok(points) => LoadEvent::Finished(points),
                Err(err) => LoadEvent::Error(err),
            };

            let _ = load_event_sender.send(event).await;
        });
    }

    fn on_load_dataset(&mut self, event: LoadEvent) {
        self.loading = false;

        match event {
            LoadEvent::Finished(points) => self.chart.set_dataset(points),
            LoadEvent::Error(err) => {
                warn!("{err}");
                self.warning_message = Some(err.to_string());
            }
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let selection = self.chart.selection();

        let mut company = selection.company();
        ui.horizontal(|ui| {
            ui.label("Select Company:");
            for c in Company::iter() {
                ui.radio_value(&mut company, c, c.to_string());
            }
        });

        let mut month = selection.month();
        ui.horizontal(|ui| {
            ui.label("Select Month:");
            egui::ComboBox::from_id_salt("month_selector")
                .selected_text(month.to_string())
                .show_ui(ui, |ui| {
                    for m in Month::iter() {
                        ui.selectable_value(&mut month, m, m.to_string());
                    }
                });
        });

        self.chart.set_company(company);
        self.chart.set_month(month);
    }

    fn show_chart(&mut self, ui: &mut egui::Ui) {
        let layout = self.chart.scene().layout;

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let viewport = Viewport::fit(response.rect, layout.width, layout.height);

        self.chart
            .pointer(response.hover_pos().map(|p| viewport.to_scene(p)));
        if self.chart.renderer().hover().legend.is_some() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }

        paint_scene(&painter, self.chart.scene(), viewport);
    }
}

impl eframe::App for ChartViewer {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        let already_run = ctx.data(|d| {
            d.get_temp::<bool>(egui::Id::new("startup_once"))
                .unwrap_or(false)
        });

        if !already_run {
            self.load_dataset();

            ctx.data_mut(|d| d.insert_temp(egui::Id::new("startup_once"), true));
        }

        while let Ok(event) = self.load_event_receiver.try_recv() {
            self.on_load_dataset(event);
        }
        if self.loading {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::TopBottomPanel::top("controls_panel")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    self.show_controls(ui);
                });

            egui::TopBottomPanel::bottom("status_panel")
                .show_separator_line(false)
                .show_inside(ui, |ui| {
                    ui.horizontal_centered(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "🗀 {}",
                                self.dataset_path.to_string_lossy()
                            ))
                            .color(egui::Color32::DARK_GRAY)
                            .size(12.0),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(
                                    self.warning_message
                                        .as_ref()
                                        .map(|t| format!("⚠ {t}"))
                                        .unwrap_or_default(),
                                )
                                .color(egui::Color32::DARK_GRAY)
                                .size(12.0),
                            );
                        });
                    });
                });

            egui::CentralPanel::default().show_inside(ui, |ui| {
                self.show_chart(ui);
            });
        });
    }
}

impl Viewport {
    /// Largest uniform scale at which the scene fits `area`, centred in it.
    fn fit(area: Rect, width: f64, height: f64) -> Self {
        let scale = (area.width() / width as f32)
            .min(area.height() / height as f32)
            .max(0.1);
        let size = vec2(width as f32 * scale, height as f32 * scale);

        Self {
            origin: area.center() - size / 2.0,
            scale,
        }
    }

    fn pos(&self, (x, y): (f64, f64)) -> Pos2 {
        self.origin + vec2(x as f32 * self.scale, y as f32 * self.scale)
    }

    fn len(&self, v: f64) -> f32 {
        v as f32 * self.scale
    }

    fn to_scene(&self, p: Pos2) -> (f64, f64) {
        (
            ((p.x - self.origin.x) / self.scale) as f64,
            ((p.y - self.origin.y) / self.scale) as f64,
        )
    }

    fn font(&self) -> FontId {
        FontId::proportional(FONT_SIZE * self.scale.max(0.5))
    }
}

fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

fn paint_scene(painter: &Painter, scene: &Scene, viewport: Viewport) {
    paint_axis(painter, &scene.x_axis, viewport);
    paint_axis(painter, &scene.y_axis, viewport);
    paint_line(painter, &scene.line_open, viewport);
    paint_line(painter, &scene.line_close, viewport);
    paint_markers(painter, &scene.markers_open, viewport);
    paint_markers(painter, &scene.markers_close, viewport);
    paint_tooltip(painter, &scene.tooltip, viewport);
    paint_message(painter, &scene.empty_message, viewport);
    paint_legend(painter, &scene.legend, viewport);
}

fn paint_axis(painter: &Painter, axis: &AxisNode, viewport: Viewport) {
    if !axis.visible {
        return;
    }

    let stroke = Stroke::new(1.0, AXIS_COLOR);
    let (tx, ty) = axis.translate;
    let (r0, r1) = axis.range;

    match axis.orient {
        AxisOrient::Bottom => {
            painter.line_segment(
                [viewport.pos((r0, ty)), viewport.pos((r1, ty))],
                stroke,
            );
            for tick in &axis.ticks {
                let x = tx + tick.offset;
                painter.line_segment(
                    [viewport.pos((x, ty)), viewport.pos((x, ty + TICK_SIZE))],
                    stroke,
                );
                painter.text(
                    viewport.pos((x, ty + TICK_SIZE + TICK_PADDING)),
                    Align2::CENTER_TOP,
                    &tick.label,
                    viewport.font(),
                    AXIS_COLOR,
                );
            }
        }
        AxisOrient::Left => {
            painter.line_segment(
                [viewport.pos((tx, r0)), viewport.pos((tx, r1))],
                stroke,
            );
            for tick in &axis.ticks {
                let y = ty + tick.offset;
                painter.line_segment(
                    [viewport.pos((tx - TICK_SIZE, y)), viewport.pos((tx, y))],
                    stroke,
                );
                painter.text(
                    viewport.pos((tx - TICK_SIZE - TICK_PADDING, y)),
                    Align2::RIGHT_CENTER,
                    &tick.label,
                    viewport.font(),
                    AXIS_COLOR,
                );
            }
        }
    }
}

fn paint_line(painter: &Painter, line: &LineNode, viewport: Viewport) {
    if !line.visible {
        return;
    }

    let stroke = Stroke::new(
        viewport.len(line.stroke_width),
        to_color32(line.series.color()),
    );
    let mut current: Option<Pos2> = None;

    for command in &line.path {
        match *command {
            PathCommand::MoveTo(x, y) => current = Some(viewport.pos((x, y))),
            PathCommand::LineTo(x, y) => {
                let to = viewport.pos((x, y));
                if let Some(from) = current {
                    painter.line_segment([from, to], stroke);
                }
                current = Some(to);
            }
            PathCommand::CubicTo { c1, c2, to } => {
                let to = viewport.pos(to);
                if let Some(from) = current {
                    painter.add(CubicBezierShape::from_points_stroke(
                        [from, viewport.pos(c1), viewport.pos(c2), to],
                        false,
                        Color32::TRANSPARENT,
                        stroke,
                    ));
                }
                current = Some(to);
            }
            PathCommand::Close => {}
        }
    }
}

fn paint_markers(painter: &Painter, markers: &MarkersNode, viewport: Viewport) {
    if !markers.visible {
        return;
    }

    let color = to_color32(markers.series.color());
    for marker in &markers.markers {
        painter.circle_filled(
            viewport.pos((marker.cx, marker.cy)),
            viewport.len(marker.r),
            color,
        );
    }
}

fn paint_tooltip(painter: &Painter, tooltip: &TooltipNode, viewport: Viewport) {
    if !tooltip.visible || tooltip.opacity <= 0.0 {
        return;
    }

    let opacity = tooltip.opacity as f32;
    let (tx, ty) = tooltip.translate;
    let rect = Rect::from_min_size(
        viewport.pos((tx, ty)),
        vec2(viewport.len(TOOLTIP_WIDTH), viewport.len(TOOLTIP_HEIGHT)),
    );

    painter.rect_filled(rect, 2.0, Color32::WHITE.gamma_multiply(opacity));
    painter.rect_stroke(
        rect,
        2.0,
        Stroke::new(1.0, Color32::GRAY.gamma_multiply(opacity)),
        StrokeKind::Inside,
    );
    for (i, line) in tooltip.lines.iter().enumerate() {
        painter.text(
            viewport.pos((tx + TOOLTIP_TEXT_X, ty + TOOLTIP_LINE_HEIGHT * (i + 1) as f64)),
            Align2::LEFT_BOTTOM,
            line,
            viewport.font(),
            Color32::BLACK.gamma_multiply(opacity),
        );
    }
}

fn paint_message(painter: &Painter, message: &MessageNode, viewport: Viewport) {
    if !message.visible {
        return;
    }

    painter.text(
        viewport.pos(message.position),
        Align2::CENTER_CENTER,
        &message.text,
        viewport.font(),
        AXIS_COLOR,
    );
}

fn paint_legend(painter: &Painter, legend: &LegendNode, viewport: Viewport) {
    if !legend.visible {
        return;
    }

    let (lx, ly) = legend.translate;
    for item in &legend.items {
        let y = ly + item.offset_y;
        let swatch = Rect::from_min_size(
            viewport.pos((lx, y - LEGEND_SWATCH_SIZE / 2.0)),
            vec2(
                viewport.len(LEGEND_SWATCH_SIZE),
                viewport.len(LEGEND_SWATCH_SIZE),
            ),
        );

        painter.rect_filled(swatch, 0.0, to_color32(item.series.color()));
        painter.text(
            viewport.pos((lx + LEGEND_TEXT_X, y)),
            Align2::LEFT_CENTER,
            item.series.to_string(),
            viewport.font(),
            AXIS_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn test_viewport_fit_is_centred() {
        let wide = Rect::from_min_size(pos2(0.0, 0.0), vec2(1200.0, 500.0));
        let viewport = Viewport::fit(wide, 900.0, 500.0);
        assert_eq!(viewport.scale, 1.0);
        assert_eq!(viewport.origin, pos2(150.0, 0.0));

        let tall = Rect::from_min_size(pos2(10.0, 20.0), vec2(450.0, 600.0));
        let viewport = Viewport::fit(tall, 900.0, 500.0);
        assert_eq!(viewport.scale, 0.5);
        assert_eq!(viewport.origin, pos2(10.0, 195.0));
        assert_eq!(viewport.to_scene(pos2(235.0, 320.0)), (450.0, 250.0));
    }
}
