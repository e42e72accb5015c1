//! SVG output for [`Chart`].
//!
//! Panels are stacked top to bottom with a fixed gap between them. Within a
//! panel the elements are emitted back to front: grid, frame and ticks, then
//! traces in panel order, then the legend. Later traces therefore cover
//! earlier ones where they overlap.

use std::io::{self, Write};

use quick_xml::events::BytesText;
use quick_xml::Writer;

use super::{AxisRange, Chart, Marker, Panel, Trace};

const OUTER_MARGIN: f64 = 12.0;
const PANEL_GAP: f64 = 24.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const TITLE_BAND: f64 = 30.0;
const AXIS_BAND: f64 = 46.0;

const RANGE_PADDING: f64 = 0.05;
const TICK_TARGET: f64 = 5.0;
const MARKER_RADIUS: f64 = 3.5;
const LINE_WIDTH: &str = "1.5";

const GRID_COLOR: &str = "#d9d9d9";
const FRAME_COLOR: &str = "#333333";
const LEGEND_BORDER: &str = "#999999";

const LEGEND_ROW: f64 = 16.0;
const LEGEND_CHAR_WIDTH: f64 = 7.0;

/// Plot area of one panel in pixels, with the padded data ranges it maps
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x: AxisRange,
    y: AxisRange,
}

impl Frame {
    fn new(panel: &Panel, width: f64, slot_top: f64, slot_height: f64) -> Self {
        Self {
            left: MARGIN_LEFT,
            right: width - MARGIN_RIGHT,
            top: slot_top + TITLE_BAND,
            bottom: slot_top + slot_height - AXIS_BAND,
            x: padded(panel.x_axis.range),
            y: padded(panel.y_axis.range),
        }
    }

    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x.min) / self.x.span() * (self.right - self.left)
    }

    fn py(&self, y: f64) -> f64 {
        self.bottom - (y - self.y.min) / self.y.span() * (self.bottom - self.top)
    }

    fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

fn padded(range: AxisRange) -> AxisRange {
    let pad = range.span() * RANGE_PADDING;
    AxisRange {
        min: range.min - pad,
        max: range.max + pad,
    }
}

fn num(value: f64) -> String {
    format!("{:.2}", value)
}

/// Tick positions on a 1-2-5 step grid, with the step used
fn ticks(range: AxisRange) -> (Vec<f64>, f64) {
    let span = range.span();
    if !(span.is_finite() && span > 0.0) {
        return (vec![range.min], 1.0);
    }

    let raw = span / TICK_TARGET;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (range.min / step).ceil() * step;
    let ticks = (0..)
        .map(|i| first + i as f64 * step)
        .take_while(|v| *v <= range.max + step * 1e-9)
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect();
    (ticks, step)
}

fn tick_label(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    format!("{:.*}", decimals, value)
}

pub(super) fn write_chart<W: Write>(chart: &Chart, inner: W) -> io::Result<()> {
    let mut writer = Writer::new_with_indent(inner, b' ', 2);

    let width = f64::from(chart.width);
    let height = f64::from(chart.height);
    let count = chart.panels.len().max(1) as f64;
    let slot_height = (height - 2.0 * OUTER_MARGIN - PANEL_GAP * (count - 1.0)) / count;

    writer
        .create_element("svg")
        .with_attribute(("xmlns", "http://www.w3.org/2000/svg"))
        .with_attribute(("width", chart.width.to_string().as_str()))
        .with_attribute(("height", chart.height.to_string().as_str()))
        .with_attribute((
            "viewBox",
            format!("0 0 {} {}", chart.width, chart.height).as_str(),
        ))
        .with_attribute(("font-family", "sans-serif"))
        .write_inner_content(|w| -> io::Result<()> {
            w.create_element("rect")
                .with_attribute(("width", "100%"))
                .with_attribute(("height", "100%"))
                .with_attribute(("fill", "white"))
                .write_empty()?;

            for (index, panel) in chart.panels.iter().enumerate() {
                let slot_top = OUTER_MARGIN + index as f64 * (slot_height + PANEL_GAP);
                let frame = Frame::new(panel, width, slot_top, slot_height);
                write_panel(w, panel, &frame)?;
            }
            Ok(())
        })?;

    writer.into_inner().flush()
}

fn write_panel<W: Write>(w: &mut Writer<W>, panel: &Panel, frame: &Frame) -> io::Result<()> {
    w.create_element("g")
        .with_attribute(("class", "panel"))
        .write_inner_content(|w| -> io::Result<()> {
            write_text(
                w,
                frame.center_x(),
                frame.top - 10.0,
                "middle",
                14,
                &panel.title,
                true,
            )?;

            let (x_ticks, x_step) = ticks(frame.x);
            let (y_ticks, y_step) = ticks(frame.y);

            if panel.grid {
                w.create_element("g")
                    .with_attribute(("class", "grid"))
                    .with_attribute(("stroke", GRID_COLOR))
                    .with_attribute(("stroke-width", "1"))
                    .write_inner_content(|w| -> io::Result<()> {
                        for &x in &x_ticks {
                            let px = frame.px(x);
                            write_line(w, px, frame.top, px, frame.bottom)?;
                        }
                        for &y in &y_ticks {
                            let py = frame.py(y);
                            write_line(w, frame.left, py, frame.right, py)?;
                        }
                        Ok(())
                    })?;
            }

            w.create_element("rect")
                .with_attribute(("class", "frame"))
                .with_attribute(("x", num(frame.left).as_str()))
                .with_attribute(("y", num(frame.top).as_str()))
                .with_attribute(("width", num(frame.right - frame.left).as_str()))
                .with_attribute(("height", num(frame.bottom - frame.top).as_str()))
                .with_attribute(("fill", "none"))
                .with_attribute(("stroke", FRAME_COLOR))
                .write_empty()?;

            for &x in &x_ticks {
                let label = tick_label(x, x_step);
                write_text(w, frame.px(x), frame.bottom + 16.0, "middle", 11, &label, false)?;
            }
            for &y in &y_ticks {
                let label = tick_label(y, y_step);
                write_text(w, frame.left - 6.0, frame.py(y) + 4.0, "end", 11, &label, false)?;
            }

            write_text(
                w,
                frame.center_x(),
                frame.bottom + 36.0,
                "middle",
                12,
                &panel.x_axis.label,
                false,
            )?;

            let y_label_x = frame.left - 56.0;
            let y_label_y = frame.center_y();
            w.create_element("text")
                .with_attribute(("x", num(y_label_x).as_str()))
                .with_attribute(("y", num(y_label_y).as_str()))
                .with_attribute(("text-anchor", "middle"))
                .with_attribute(("font-size", "12"))
                .with_attribute((
                    "transform",
                    format!("rotate(-90 {} {})", num(y_label_x), num(y_label_y)).as_str(),
                ))
                .write_text_content(BytesText::new(&panel.y_axis.label))?;

            for trace in &panel.traces {
                write_trace(w, trace, frame)?;
            }

            if panel.legend {
                write_legend(w, &panel.traces, frame)?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_trace<W: Write>(w: &mut Writer<W>, trace: &Trace, frame: &Frame) -> io::Result<()> {
    w.create_element("g")
        .with_attribute(("class", "trace"))
        .with_attribute(("data-label", trace.label.as_str()))
        .write_inner_content(|w| -> io::Result<()> {
            if trace.len() > 1 {
                let points: Vec<String> = trace
                    .points()
                    .map(|(x, y)| format!("{},{}", num(frame.px(x)), num(frame.py(y))))
                    .collect();
                w.create_element("polyline")
                    .with_attribute(("points", points.join(" ").as_str()))
                    .with_attribute(("fill", "none"))
                    .with_attribute(("stroke", trace.color.as_str()))
                    .with_attribute(("stroke-width", LINE_WIDTH))
                    .write_empty()?;
            }
            for (x, y) in trace.points() {
                write_marker(w, trace.marker, &trace.color, frame.px(x), frame.py(y))?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_marker<W: Write>(
    w: &mut Writer<W>,
    marker: Marker,
    color: &str,
    cx: f64,
    cy: f64,
) -> io::Result<()> {
    let r = MARKER_RADIUS;
    match marker {
        Marker::Circle => {
            w.create_element("circle")
                .with_attribute(("cx", num(cx).as_str()))
                .with_attribute(("cy", num(cy).as_str()))
                .with_attribute(("r", num(r).as_str()))
                .with_attribute(("fill", color))
                .write_empty()?;
        }
        Marker::Square => {
            w.create_element("rect")
                .with_attribute(("x", num(cx - r).as_str()))
                .with_attribute(("y", num(cy - r).as_str()))
                .with_attribute(("width", num(2.0 * r).as_str()))
                .with_attribute(("height", num(2.0 * r).as_str()))
                .with_attribute(("fill", color))
                .write_empty()?;
        }
        Marker::Triangle => {
            let points = format!(
                "{},{} {},{} {},{}",
                num(cx),
                num(cy - r),
                num(cx - r),
                num(cy + r),
                num(cx + r),
                num(cy + r)
            );
            w.create_element("polygon")
                .with_attribute(("points", points.as_str()))
                .with_attribute(("fill", color))
                .write_empty()?;
        }
        Marker::Cross => {
            let path = format!(
                "M {} {} L {} {} M {} {} L {} {}",
                num(cx - r),
                num(cy - r),
                num(cx + r),
                num(cy + r),
                num(cx - r),
                num(cy + r),
                num(cx + r),
                num(cy - r)
            );
            w.create_element("path")
                .with_attribute(("d", path.as_str()))
                .with_attribute(("stroke", color))
                .with_attribute(("stroke-width", LINE_WIDTH))
                .with_attribute(("fill", "none"))
                .write_empty()?;
        }
    }
    Ok(())
}

fn write_legend<W: Write>(w: &mut Writer<W>, traces: &[Trace], frame: &Frame) -> io::Result<()> {
    let longest = traces
        .iter()
        .map(|t| t.label.chars().count())
        .max()
        .unwrap_or(0);
    let box_width = longest as f64 * LEGEND_CHAR_WIDTH + 44.0;
    let box_height = traces.len() as f64 * LEGEND_ROW + 8.0;
    let left = frame.right - box_width - 8.0;
    let top = frame.top + 8.0;

    w.create_element("g")
        .with_attribute(("class", "legend"))
        .write_inner_content(|w| -> io::Result<()> {
            w.create_element("rect")
                .with_attribute(("x", num(left).as_str()))
                .with_attribute(("y", num(top).as_str()))
                .with_attribute(("width", num(box_width).as_str()))
                .with_attribute(("height", num(box_height).as_str()))
                .with_attribute(("fill", "white"))
                .with_attribute(("fill-opacity", "0.85"))
                .with_attribute(("stroke", LEGEND_BORDER))
                .write_empty()?;

            for (row, trace) in traces.iter().enumerate() {
                let y = top + 4.0 + LEGEND_ROW * row as f64 + LEGEND_ROW / 2.0;
                w.create_element("line")
                    .with_attribute(("x1", num(left + 6.0).as_str()))
                    .with_attribute(("y1", num(y).as_str()))
                    .with_attribute(("x2", num(left + 30.0).as_str()))
                    .with_attribute(("y2", num(y).as_str()))
                    .with_attribute(("stroke", trace.color.as_str()))
                    .with_attribute(("stroke-width", LINE_WIDTH))
                    .write_empty()?;
                write_marker(w, trace.marker, &trace.color, left + 18.0, y)?;
                write_text(w, left + 36.0, y + 4.0, "start", 11, &trace.label, false)?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_line<W: Write>(w: &mut Writer<W>, x1: f64, y1: f64, x2: f64, y2: f64) -> io::Result<()> {
    w.create_element("line")
        .with_attribute(("x1", num(x1).as_str()))
        .with_attribute(("y1", num(y1).as_str()))
        .with_attribute(("x2", num(x2).as_str()))
        .with_attribute(("y2", num(y2).as_str()))
        .write_empty()?;
    Ok(())
}

fn write_text<W: Write>(
    w: &mut Writer<W>,
    x: f64,
    y: f64,
    anchor: &str,
    size: u32,
    content: &str,
    bold: bool,
) -> io::Result<()> {
    let mut element = w
        .create_element("text")
        .with_attribute(("x", num(x).as_str()))
        .with_attribute(("y", num(y).as_str()))
        .with_attribute(("text-anchor", anchor))
        .with_attribute(("font-size", size.to_string().as_str()));
    if bold {
        element = element.with_attribute(("font-weight", "bold"));
    }
    element.write_text_content(BytesText::new(content))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{render, RunSeries, SeriesStyle};
    use crate::sample::{Sample, SampleTable};

    fn series(label: &str, rows: &[(f64, f64, f64)], style: SeriesStyle) -> RunSeries {
        let samples = rows
            .iter()
            .map(|&(t, tps, lat)| Sample::new(t, tps, lat, 0.0))
            .collect();
        RunSeries::new(label, SampleTable::from_samples(samples), style)
    }

    #[test]
    fn test_svg_structure() {
        let chart = render(
            series("A & co", &[(1.0, 10.0, 1.0), (2.0, 12.0, 1.5)], SeriesStyle::run_a()),
            series("<B>", &[(1.0, 20.0, 0.5), (3.0, 22.0, 0.7)], SeriesStyle::run_b()),
        );
        let svg = chart.to_svg_string().unwrap();

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("class=\"panel\"").count(), 2);
        assert_eq!(svg.matches("class=\"trace\"").count(), 4);
        assert_eq!(svg.matches("class=\"grid\"").count(), 2);
        assert_eq!(svg.matches("class=\"legend\"").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 4);

        // labels are escaped and A is always emitted before B
        let a = svg.find("data-label=\"A &amp; co\"").unwrap();
        let b = svg.find("data-label=\"&lt;B&gt;\"").unwrap();
        assert!(a < b);
        assert!(svg.contains(">TPS Comparison: A &amp; co vs &lt;B&gt;</text>"));
        assert!(svg.contains(">Latency (ms)</text>"));
    }

    #[test]
    fn test_empty_trace_draws_no_points() {
        let chart = render(
            series("a", &[(1.0, 10.0, 1.0), (2.0, 12.0, 1.5)], SeriesStyle::run_a()),
            series("b", &[], SeriesStyle::run_b()),
        );
        let svg = chart.to_svg_string().unwrap();

        assert_eq!(svg.matches("class=\"trace\"").count(), 4);
        assert_eq!(svg.matches("<polyline").count(), 2);
        // legend still lists the empty run in both panels
        assert_eq!(svg.matches(">b</text>").count(), 2);
    }

    #[test]
    fn test_single_point_has_marker_only() {
        let chart = render(
            series("a", &[(1.0, 10.0, 1.0)], SeriesStyle::run_a()),
            series("b", &[], SeriesStyle::run_b()),
        );
        let svg = chart.to_svg_string().unwrap();
        assert_eq!(svg.matches("<polyline").count(), 0);
        // one data marker per panel plus one legend marker per panel
        assert_eq!(svg.matches("<circle").count(), 4);
    }

    #[test]
    fn test_ticks() {
        let (values, step) = ticks(AxisRange { min: 0.0, max: 10.0 });
        assert_eq!(step, 2.0);
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let (values, step) = ticks(AxisRange { min: -0.05, max: 1.05 });
        assert_eq!(step, 0.5);
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
        assert_eq!(tick_label(0.5, step), "0.5");
        assert_eq!(tick_label(250.0, 50.0), "250");
    }

    #[test]
    fn test_frame_mapping() {
        let chart = render(
            series("a", &[(0.0, 0.0, 0.0), (10.0, 100.0, 5.0)], SeriesStyle::run_a()),
            series("b", &[], SeriesStyle::run_b()),
        );
        let frame = Frame::new(&chart.panels[0], 1000.0, 0.0, 300.0);
        assert!(frame.px(0.0) > frame.left);
        assert!(frame.px(10.0) < frame.right);
        assert!(frame.py(0.0) < frame.bottom);
        assert!(frame.py(100.0) > frame.top);
    }
}
