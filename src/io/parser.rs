// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG path data parser using pest

use anyhow::{anyhow, Context, Result};
use nalgebra::Point2;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/svg_path.pest"]
struct PathDataParser;

/// Drawing command resolved to absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2<f64>),
    LineTo(Point2<f64>),
    QuadTo(Point2<f64>, Point2<f64>),
    CubicTo(Point2<f64>, Point2<f64>, Point2<f64>),
    Close,
}

/// Pen state while walking the command list
struct Cursor {
    current: Point2<f64>,
    subpath_start: Point2<f64>,
    last_quad_control: Option<Point2<f64>>,
    last_cubic_control: Option<Point2<f64>>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            current: Point2::origin(),
            subpath_start: Point2::origin(),
            last_quad_control: None,
            last_cubic_control: None,
        }
    }

    fn resolve(&self, point: Point2<f64>, relative: bool) -> Point2<f64> {
        if relative {
            self.current + point.coords
        } else {
            point
        }
    }

    /// Mirror of `control` through the current point
    fn reflect(&self, control: Option<Point2<f64>>) -> Point2<f64> {
        control
            .map(|c| self.current + (self.current - c))
            .unwrap_or(self.current)
    }
}

/// Parse the `d` attribute of an SVG `<path>` into absolute commands
pub fn parse_path_data(source: &str) -> Result<Vec<PathCommand>> {
    let mut pairs = PathDataParser::parse(Rule::path_data, source)
        .with_context(|| format!("Failed to parse path data: {}", truncate(source)))?;

    let mut commands = Vec::new();
    let mut cursor = Cursor::new();

    if let Some(program) = pairs.next() {
        for pair in program.into_inner() {
            match pair.as_rule() {
                Rule::command => parse_command(pair, &mut cursor, &mut commands)?,
                Rule::EOI => {}
                _ => {}
            }
        }
    }

    Ok(commands)
}

fn parse_command(
    pair: Pair<Rule>,
    cursor: &mut Cursor,
    out: &mut Vec<PathCommand>,
) -> Result<()> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| anyhow!("Empty path command"))?;
    let rule = inner.as_rule();

    if rule == Rule::close {
        out.push(PathCommand::Close);
        cursor.current = cursor.subpath_start;
        cursor.last_quad_control = None;
        cursor.last_cubic_control = None;
        return Ok(());
    }

    let mut parts = inner.into_inner();
    let op = parts
        .next()
        .ok_or_else(|| anyhow!("Missing command letter"))?;
    let relative = op.as_str().chars().all(|c| c.is_ascii_lowercase());

    match rule {
        Rule::moveto => {
            for (i, point) in points(parts)?.into_iter().enumerate() {
                let target = cursor.resolve(point, relative);
                cursor.current = target;
                if i == 0 {
                    cursor.subpath_start = target;
                    out.push(PathCommand::MoveTo(target));
                } else {
                    // Extra pairs after a move are implicit line-tos
                    out.push(PathCommand::LineTo(target));
                }
            }
            cursor.last_quad_control = None;
            cursor.last_cubic_control = None;
        }
        Rule::lineto => {
            for point in points(parts)? {
                let target = cursor.resolve(point, relative);
                out.push(PathCommand::LineTo(target));
                cursor.current = target;
            }
            cursor.last_quad_control = None;
            cursor.last_cubic_control = None;
        }
        Rule::horizontal | Rule::vertical => {
            for value in numbers(parts)? {
                let mut target = cursor.current;
                let axis = if rule == Rule::horizontal {
                    &mut target.x
                } else {
                    &mut target.y
                };
                *axis = if relative { *axis + value } else { value };
                out.push(PathCommand::LineTo(target));
                cursor.current = target;
            }
            cursor.last_quad_control = None;
            cursor.last_cubic_control = None;
        }
        Rule::quadratic => {
            for chunk in points(parts)?.chunks_exact(2) {
                let control = cursor.resolve(chunk[0], relative);
                let target = cursor.resolve(chunk[1], relative);
                out.push(PathCommand::QuadTo(control, target));
                cursor.current = target;
                cursor.last_quad_control = Some(control);
            }
            cursor.last_cubic_control = None;
        }
        Rule::smooth_quadratic => {
            for point in points(parts)? {
                let control = cursor.reflect(cursor.last_quad_control);
                let target = cursor.resolve(point, relative);
                out.push(PathCommand::QuadTo(control, target));
                cursor.current = target;
                cursor.last_quad_control = Some(control);
            }
            cursor.last_cubic_control = None;
        }
        Rule::cubic => {
            for chunk in points(parts)?.chunks_exact(3) {
                let c1 = cursor.resolve(chunk[0], relative);
                let c2 = cursor.resolve(chunk[1], relative);
                let target = cursor.resolve(chunk[2], relative);
                out.push(PathCommand::CubicTo(c1, c2, target));
                cursor.current = target;
                cursor.last_cubic_control = Some(c2);
            }
            cursor.last_quad_control = None;
        }
        Rule::smooth_cubic => {
            for chunk in points(parts)?.chunks_exact(2) {
                let c1 = cursor.reflect(cursor.last_cubic_control);
                let c2 = cursor.resolve(chunk[0], relative);
                let target = cursor.resolve(chunk[1], relative);
                out.push(PathCommand::CubicTo(c1, c2, target));
                cursor.current = target;
                cursor.last_cubic_control = Some(c2);
            }
            cursor.last_quad_control = None;
        }
        other => return Err(anyhow!("Unexpected path rule: {:?}", other)),
    }

    Ok(())
}

fn points(pairs: pest::iterators::Pairs<Rule>) -> Result<Vec<Point2<f64>>> {
    pairs
        .filter(|p| p.as_rule() == Rule::pair)
        .map(|p| {
            let values = numbers(p.into_inner())?;
            match values.as_slice() {
                [x, y] => Ok(Point2::new(*x, *y)),
                _ => Err(anyhow!("Coordinate pair needs two numbers")),
            }
        })
        .collect()
}

fn numbers(pairs: pest::iterators::Pairs<Rule>) -> Result<Vec<f64>> {
    pairs
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| {
            p.as_str()
                .parse::<f64>()
                .with_context(|| format!("Invalid number: {}", p.as_str()))
        })
        .collect()
}

fn truncate(source: &str) -> String {
    const MAX: usize = 40;
    if source.chars().count() > MAX {
        format!("{}...", source.chars().take(MAX).collect::<String>())
    } else {
        source.to_string()
    }
}

/// Format a coordinate for path data, trimming needless zeros
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.6}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
