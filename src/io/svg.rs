// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG documents of wire paths

use super::parser::{format_number, parse_path_data, PathCommand};
use crate::geometry::{BoundingRect, CubicBezier};
use crate::wire::{Segment, WirePath, DEFAULT_STROKE, DEFAULT_WIRE_DIAMETER};
use anyhow::{bail, Context, Result};
use nalgebra::{Point2, Point3};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use tracing::{debug, warn};

/// SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Presentation attributes read from one `<path>` element
#[derive(Debug, Default)]
struct PathAttributes {
    d: Option<String>,
    stroke: Option<String>,
    stroke_width: Option<String>,
}

impl PathAttributes {
    fn from_element(element: &BytesStart) -> Result<Self> {
        let mut attrs = Self::default();
        for attr in element.attributes() {
            let attr = attr.context("Malformed attribute on <path>")?;
            let value = attr
                .unescape_value()
                .context("Invalid attribute value on <path>")?
                .into_owned();
            match attr.key.local_name().as_ref() {
                b"d" => attrs.d = Some(value),
                b"stroke" => attrs.stroke = Some(value),
                b"stroke-width" => attrs.stroke_width = Some(value),
                b"style" => attrs.apply_style(&value),
                _ => {}
            }
        }
        Ok(attrs)
    }

    /// Inline CSS only fills values the element did not set directly
    fn apply_style(&mut self, style: &str) {
        for declaration in style.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim().to_string();
            match name.trim() {
                "stroke" => {
                    self.stroke.get_or_insert(value);
                }
                "stroke-width" => {
                    self.stroke_width.get_or_insert(value);
                }
                _ => {}
            }
        }
    }

    fn template(&self) -> WirePath {
        let mut path = WirePath::with_stroke(
            self.stroke
                .clone()
                .unwrap_or_else(|| DEFAULT_STROKE.to_string()),
        );
        path.wire_diameter = self
            .stroke_width
            .as_deref()
            .and_then(parse_length)
            .unwrap_or_else(|| {
                if let Some(raw) = &self.stroke_width {
                    warn!(value = %raw, "ignoring unusable stroke-width");
                }
                DEFAULT_WIRE_DIAMETER
            });
        path
    }
}

/// Parse a positive length such as `1.5` or `1.5px`
fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches("px").trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Read every `<path>` of an SVG document as wire paths.
///
/// Each subpath (each move command) becomes its own wire path. Cubic curves
/// keep their first control point.
pub fn import_svg_str(source: &str) -> Result<Vec<WirePath>> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut paths = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) if e.local_name().as_ref() == b"path" => {
                let attrs = PathAttributes::from_element(e)?;
                let Some(d) = attrs.d.as_deref() else {
                    debug!("skipping <path> without d attribute");
                    continue;
                };
                let commands = parse_path_data(d)?;
                paths.extend(commands_to_paths(&commands, &attrs.template()));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => bail!(
                "XML parse error at position {}: {}",
                reader.buffer_position(),
                e
            ),
        }
    }

    Ok(paths)
}

fn commands_to_paths(commands: &[PathCommand], template: &WirePath) -> Vec<WirePath> {
    let mut out = Vec::new();
    let mut path = template.clone();
    let mut current = Point2::origin();
    let mut subpath_start = Point2::origin();

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                if !path.is_empty() {
                    out.push(std::mem::replace(&mut path, template.clone()));
                }
                current = p;
                subpath_start = p;
            }
            PathCommand::LineTo(p) => {
                path.push(Segment::line(current, p));
                current = p;
            }
            PathCommand::QuadTo(control, p) => {
                path.push(Segment::curve(current, control, p));
                current = p;
            }
            PathCommand::CubicTo(control, _, p) => {
                path.push(Segment::curve(current, control, p));
                current = p;
            }
            PathCommand::Close => {
                if current != subpath_start {
                    path.push(Segment::line(current, subpath_start));
                }
                current = subpath_start;
            }
        }
    }

    if !path.is_empty() {
        out.push(path);
    }
    out
}

/// Path data for one wire path
pub fn path_data(path: &WirePath) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut pen: Option<Point2<f64>> = None;
    let pt = |p: Point2<f64>| format!("{} {}", format_number(p.x), format_number(p.y));

    for segment in path.segments() {
        if pen != Some(segment.start()) {
            parts.push(format!("M {}", pt(segment.start())));
        }
        match *segment {
            Segment::Line { end, .. } => parts.push(format!("L {}", pt(end))),
            Segment::Curve { control, end, .. } => {
                parts.push(format!("Q {} {}", pt(control), pt(end)))
            }
        }
        pen = Some(segment.end());
    }

    parts.join(" ")
}

/// Write wire paths as an SVG document, one `<path>` per wire path
pub fn export_svg_string(paths: &[WirePath]) -> Result<String> {
    let bounds = BoundingRect::from_points(
        paths
            .iter()
            .flat_map(|p| p.segments().iter().flat_map(|s| s.points())),
    );
    let widest = paths
        .iter()
        .map(|p| p.wire_diameter)
        .fold(0.0_f64, f64::max);
    let view = if bounds.is_empty() {
        BoundingRect::from_points([Point2::origin()])
    } else {
        bounds.padded(widest)
    };
    let size = view.size();

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let view_box = format!(
        "{} {} {} {}",
        format_number(view.min.x),
        format_number(view.min.y),
        format_number(size.x),
        format_number(size.y)
    );
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    svg.push_attribute(("viewBox", view_box.as_str()));
    writer.write_event(Event::Start(svg))?;

    for path in paths.iter().filter(|p| !p.is_empty()) {
        let d = path_data(path);
        let width = format_number(path.wire_diameter);
        let mut element = BytesStart::new("path");
        element.push_attribute(("d", d.as_str()));
        element.push_attribute(("stroke", path.stroke.as_str()));
        element.push_attribute(("stroke-width", width.as_str()));
        element.push_attribute(("fill", "none"));
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("SVG output is not valid UTF-8")
}

/// Draw centerline curves projected onto the XY plane.
///
/// Coordinates are shifted to the origin, multiplied by `scale` and padded
/// by a tenth of the larger extent; the document size is in millimetres.
pub fn export_centerline_svg(curves: &[CubicBezier], scale: f64) -> Result<String> {
    let bounds = BoundingRect::from_points(
        curves
            .iter()
            .flat_map(|c| c.points())
            .map(|p| Point2::new(p.x, p.y)),
    );
    let origin = if bounds.is_empty() {
        Point2::origin()
    } else {
        bounds.min
    };
    let extent = bounds.size() * scale;
    let padding = extent.x.max(extent.y) * 0.1;
    let width = extent.x + 2.0 * padding;
    let height = extent.y + 2.0 * padding;

    let project = |p: &Point3<f64>| {
        format!(
            "{},{}",
            format_number(scale * (p.x - origin.x) + padding),
            format_number(scale * (p.y - origin.y) + padding)
        )
    };

    let mut d = Vec::new();
    if let Some(first) = curves.first() {
        d.push(format!("M{}", project(&first.start)));
    }
    for curve in curves {
        d.push(format!(
            "C{} {} {}",
            project(&curve.control1),
            project(&curve.control2),
            project(&curve.end)
        ));
    }
    let d = d.join(" ");

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let size_w = format!("{}mm", format_number(width));
    let size_h = format!("{}mm", format_number(height));
    let view_box = format!("0 0 {} {}", format_number(width), format_number(height));
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    svg.push_attribute(("width", size_w.as_str()));
    svg.push_attribute(("height", size_h.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    writer.write_event(Event::Start(svg))?;

    if !curves.is_empty() {
        let stroke_width = format_number(0.5 * scale);
        let mut element = BytesStart::new("path");
        element.push_attribute(("d", d.as_str()));
        element.push_attribute(("stroke", "black"));
        element.push_attribute(("stroke-width", stroke_width.as_str()));
        element.push_attribute(("fill", "none"));
        writer.write_event(Event::Empty(element))?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("SVG output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::SegmentKind;

    const DOCUMENT: &str = r##"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <g>
    <path d="M 0 0 L 10 0 Q 15 5 20 0" stroke="#ff0000" stroke-width="1.5" fill="none"/>
    <path d="M 0 50 C 10 60 20 60 30 50 M 40 50 L 50 50" style="stroke:#00ff00;stroke-width:3px"/>
    <path stroke="#0000ff"/>
  </g>
</svg>"##;

    #[test]
    fn test_import_attributes_and_subpaths() {
        let paths = import_svg_str(DOCUMENT).unwrap();
        assert_eq!(paths.len(), 3);

        assert_eq!(paths[0].stroke, "#ff0000");
        assert_eq!(paths[0].wire_diameter, 1.5);
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[0].segments()[1].kind(), SegmentKind::Curve);

        // Cubic keeps its first control point
        assert_eq!(paths[1].stroke, "#00ff00");
        assert_eq!(paths[1].wire_diameter, 3.0);
        assert_eq!(paths[1].segments()[0].control(), Some(Point2::new(10.0, 60.0)));

        assert_eq!(paths[2].segments()[0].start(), Point2::new(40.0, 50.0));
    }

    #[test]
    fn test_close_adds_closing_line() {
        let svg = r#"<svg><path d="M0 0 L10 0 L10 10 Z"/></svg>"#;
        let paths = import_svg_str(svg).unwrap();
        assert_eq!(paths[0].len(), 3);
        assert_eq!(paths[0].segments()[2].end(), Point2::new(0.0, 0.0));
        assert_eq!(paths[0].wire_diameter, DEFAULT_WIRE_DIAMETER);
        assert_eq!(paths[0].stroke, DEFAULT_STROKE);
    }

    #[test]
    fn test_bad_input() {
        assert!(import_svg_str(r#"<svg><path d="M0 0 A 1 1 0 0 1 2 2"/></svg>"#).is_err());
        assert!(import_svg_str("<svg><path d='M0 0 L1 1'></svg").is_err());
    }

    #[test]
    fn test_export_then_import() {
        let mut path = WirePath::with_stroke("#123456");
        path.wire_diameter = 0.75;
        path.push(Segment::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)));
        path.push(Segment::curve(
            Point2::new(10.0, 0.0),
            Point2::new(15.0, 5.0),
            Point2::new(20.0, 0.0),
        ));

        let svg = export_svg_string(std::slice::from_ref(&path)).unwrap();
        assert!(svg.contains(r#"d="M 0 0 L 10 0 Q 15 5 20 0""#));
        assert!(svg.contains(r#"fill="none""#));

        let back = import_svg_str(&svg).unwrap();
        assert_eq!(back, vec![path]);
    }

    #[test]
    fn test_export_skips_empty_paths() {
        let svg = export_svg_string(&[WirePath::new()]).unwrap();
        assert!(!svg.contains("<path"));
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_centerline_svg_is_padded_and_scaled() {
        let curve = CubicBezier {
            start: Point3::new(0.0, 0.0, 1.0),
            control1: Point3::new(3.0, 0.0, 1.0),
            control2: Point3::new(7.0, 0.0, 1.0),
            end: Point3::new(10.0, 0.0, 1.0),
        };
        let svg = export_centerline_svg(&[curve], 2.0).unwrap();
        // extent 20 wide, padding 2 on each side
        assert!(svg.contains(r#"width="24mm""#));
        assert!(svg.contains(r#"height="4mm""#));
        assert!(svg.contains(r#"d="M2,2 C8,2 16,2 22,2""#));
        assert!(svg.contains(r#"stroke-width="1""#));

        // Importing the drawing yields one wire path of the same span
        let paths = import_svg_str(&svg).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].segments()[0].end(), Point2::new(22.0, 2.0));
    }
}
