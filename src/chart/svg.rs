use svg::{
    Document,
    node::element::{Circle, Group, Line, Path, Rectangle, Text, path::Data},
};

use crate::{
    chart::{
        curve::PathCommand,
        scene::{
            AxisNode, AxisOrient, LEGEND_SWATCH_SIZE, LEGEND_TEXT_X, LegendNode, LineNode,
            MarkersNode, MessageNode, Scene, TICK_PADDING, TICK_SIZE, TOOLTIP_HEIGHT,
            TOOLTIP_LINE_HEIGHT, TOOLTIP_TEXT_X, TOOLTIP_WIDTH, TooltipNode,
        },
    },
    utils::text::format_coord as n,
};

const TOOLTIP_CLASSES: [&str; 4] = ["tooltip-date", "tooltip-open", "tooltip-close", "tooltip-diff"];

/// Serialises the scene as a standalone SVG document, hidden elements included.
pub fn to_svg(scene: &Scene) -> String {
    let layout = &scene.layout;

    Document::new()
        .set("width", "100%")
        .set("height", n(layout.height))
        .set("viewBox", layout.viewbox())
        .set("preserveAspectRatio", "xMidYMid meet")
        .add(axis_group("x-axis", &scene.x_axis))
        .add(axis_group("y-axis", &scene.y_axis))
        .add(line_path(&scene.line_open))
        .add(line_path(&scene.line_close))
        .add(markers_group(&scene.markers_open))
        .add(markers_group(&scene.markers_close))
        .add(tooltip_group(&scene.tooltip))
        .add(message_text(&scene.empty_message))
        .add(legend_group(&scene.legend))
        .to_string()
}

pub fn path_data(commands: &[PathCommand]) -> Data {
    commands
        .iter()
        .fold(Data::new(), |data, command| match *command {
            PathCommand::MoveTo(x, y) => data.move_to((x as f32, y as f32)),
            PathCommand::LineTo(x, y) => data.line_to((x as f32, y as f32)),
            PathCommand::CubicTo { c1, c2, to } => data.cubic_curve_to((
                c1.0 as f32,
                c1.1 as f32,
                c2.0 as f32,
                c2.1 as f32,
                to.0 as f32,
                to.1 as f32,
            )),
            PathCommand::Close => data.close(),
        })
}

fn display(visible: bool) -> &'static str {
    if visible { "display:block" } else { "display:none" }
}

fn translate((x, y): (f64, f64)) -> String {
    format!("translate({},{})", n(x), n(y))
}

fn axis_group(class: &str, axis: &AxisNode) -> Group {
    let (r0, r1) = axis.range;
    let tick_size = TICK_SIZE as f32;
    let (anchor, domain) = match axis.orient {
        AxisOrient::Bottom => (
            "middle",
            Data::new()
                .move_to((r0 as f32, tick_size))
                .vertical_line_to(0.0)
                .horizontal_line_to(r1 as f32)
                .vertical_line_to(tick_size),
        ),
        AxisOrient::Left => (
            "end",
            Data::new()
                .move_to((-tick_size, r0 as f32))
                .horizontal_line_to(0.0)
                .vertical_line_to(r1 as f32)
                .horizontal_line_to(-tick_size),
        ),
    };

    let mut group = Group::new()
        .set("class", class)
        .set("transform", translate(axis.translate))
        .set("style", display(axis.visible))
        .set("fill", "none")
        .set("font-size", "10")
        .set("font-family", "sans-serif")
        .set("text-anchor", anchor)
        .add(
            Path::new()
                .set("class", "domain")
                .set("stroke", "currentColor")
                .set("d", domain),
        );

    let text_offset = n(TICK_SIZE + TICK_PADDING);
    for tick in &axis.ticks {
        let label = Text::new(tick.label.as_str())
            .set("class", "axis-text")
            .set("fill", "currentColor");
        let (transform, line, label) = match axis.orient {
            AxisOrient::Bottom => (
                translate((tick.offset, 0.0)),
                Line::new().set("y2", n(TICK_SIZE)),
                label.set("y", text_offset.as_str()).set("dy", "0.71em"),
            ),
            AxisOrient::Left => (
                translate((0.0, tick.offset)),
                Line::new().set("x2", n(-TICK_SIZE)),
                label.set("x", format!("-{text_offset}")).set("dy", "0.32em"),
            ),
        };

        group = group.add(
            Group::new()
                .set("class", "tick")
                .set("transform", transform)
                .add(line.set("stroke", "currentColor"))
                .add(label),
        );
    }

    group
}

fn line_path(line: &LineNode) -> Path {
    Path::new()
        .set("class", format!("line {}", line.series.class_name()))
        .set("fill", "none")
        .set("stroke", line.series.color().to_hex())
        .set("stroke-width", n(line.stroke_width))
        .set("style", display(line.visible))
        .set("d", path_data(&line.path))
}

fn markers_group(markers: &MarkersNode) -> Group {
    let class = markers.series.class_name();
    let color = markers.series.color().to_hex();

    markers.markers.iter().fold(
        Group::new()
            .set("class", format!("circles {class}"))
            .set("style", display(markers.visible)),
        |group, marker| {
            group.add(
                Circle::new()
                    .set("class", format!("data-circle {class}-circle"))
                    .set("cx", n(marker.cx))
                    .set("cy", n(marker.cy))
                    .set("r", n(marker.r))
                    .set("fill", color.as_str()),
            )
        },
    )
}

fn tooltip_group(tooltip: &TooltipNode) -> Group {
    let group = Group::new()
        .set("class", "tooltip")
        .set("transform", translate(tooltip.translate))
        .set(
            "style",
            format!("opacity:{};{}", n(tooltip.opacity), display(tooltip.visible)),
        )
        .set("pointer-events", "none")
        .add(
            Rectangle::new()
                .set("class", "tooltip-rect")
                .set("width", n(TOOLTIP_WIDTH))
                .set("height", n(TOOLTIP_HEIGHT))
                .set("fill", "#ffffff")
                .set("stroke", "#999999"),
        );

    TOOLTIP_CLASSES
        .iter()
        .zip(&tooltip.lines)
        .enumerate()
        .fold(group, |group, (i, (class, line))| {
            group.add(
                Text::new(line.as_str())
                    .set("class", *class)
                    .set("x", n(TOOLTIP_TEXT_X))
                    .set("y", n(TOOLTIP_LINE_HEIGHT * (i + 1) as f64)),
            )
        })
}

fn message_text(message: &MessageNode) -> Text {
    Text::new(message.text.as_str())
        .set("class", "no-data-message")
        .set("x", n(message.position.0))
        .set("y", n(message.position.1))
        .set("text-anchor", "middle")
        .set("style", display(message.visible))
}

fn legend_group(legend: &LegendNode) -> Group {
    let size = n(LEGEND_SWATCH_SIZE);

    legend.items.iter().fold(
        Group::new()
            .set("class", "legend")
            .set("transform", translate(legend.translate))
            .set("style", display(legend.visible)),
        |group, item| {
            let name = item.series.to_string();
            group.add(
                Group::new()
                    .set("class", "legend-item")
                    .set("transform", translate((0.0, item.offset_y)))
                    .set("style", "cursor:pointer")
                    .add(
                        Rectangle::new()
                            .set("class", "legend-rect")
                            .set("x", "0")
                            .set("y", n(-LEGEND_SWATCH_SIZE / 2.0))
                            .set("width", size.as_str())
                            .set("height", size.as_str())
                            .set("fill", item.series.color().to_hex()),
                    )
                    .add(
                        Text::new(name.as_str())
                            .set("class", "legend-text")
                            .set("x", n(LEGEND_TEXT_X))
                            .set("y", "0")
                            .set("dy", "0.32em")
                            .set("aria-label", name.as_str()),
                    ),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        chart::{ChartLayout, renderer::ChartRenderer},
        data::point::DataPoint,
    };

    fn rendered(series: &[DataPoint]) -> String {
        let mut renderer = ChartRenderer::create(ChartLayout::default());
        renderer.update(series);
        to_svg(renderer.scene())
    }

    fn series() -> Vec<DataPoint> {
        vec![
            DataPoint::new(
                "Apple",
                NaiveDate::from_ymd_opt(2020, 11, 3).unwrap(),
                100.0,
                105.0,
            )
            .unwrap(),
            DataPoint::new(
                "Apple",
                NaiveDate::from_ymd_opt(2020, 11, 10).unwrap(),
                110.0,
                108.0,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_path_data() {
        let d = svg::node::Value::from(path_data(&[
            PathCommand::MoveTo(60.0, 250.0),
            PathCommand::CubicTo {
                c1: (1.0, 2.5),
                c2: (3.0, 4.0),
                to: (5.0, 6.0),
            },
            PathCommand::LineTo(700.0, 50.0),
            PathCommand::Close,
        ]))
        .to_string();

        assert!(d.starts_with("M60,250"));
        assert!(d.contains("C1,2.5,3,4,5,6"));
        assert!(d.contains("L700,50"));
        assert!(svg::node::Value::from(path_data(&[])).to_string().is_empty());
    }

    #[test]
    fn test_to_svg_canvas() {
        let svg = rendered(&series());

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"xmlns="http://www.w3.org/2000/svg""#));
        assert!(svg.contains(r#"width="100%""#));
        assert!(svg.contains(r#"height="500""#));
        assert!(svg.contains(r#"viewBox="0 0 900 500""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_to_svg_rendered() {
        let svg = rendered(&series());

        assert_eq!(svg.matches("<circle").count(), 4);
        assert_eq!(svg.matches("data-circle open-circle").count(), 2);
        assert_eq!(svg.matches("data-circle close-circle").count(), 2);
        assert!(svg.contains(r#"class="line open""#));
        assert!(svg.contains(r##"stroke="#b2df8a""##));
        assert!(svg.contains(r##"stroke="#e41a1c""##));
        assert_eq!(svg.matches(r#"stroke-width="2""#).count(), 2);
        assert!(svg.contains("03-Nov"));
        assert!(svg.contains(r#"aria-label="Close""#));
        assert!(svg.contains(r#"style="opacity:0;display:block""#));
        assert_eq!(svg.matches("display:none").count(), 1);
    }

    #[test]
    fn test_to_svg_empty() {
        let svg = rendered(&[]);

        assert!(svg.contains("No data available for the selected company and month."));
        assert!(svg.contains(r#"class="no-data-message""#));
        assert_eq!(svg.matches("display:block").count(), 1);
        assert_eq!(svg.matches("display:none").count(), 8);
        assert_eq!(svg.matches("<circle").count(), 0);
    }
}
