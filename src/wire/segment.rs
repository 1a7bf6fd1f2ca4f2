// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wire segments: straight lines and quadratic Bézier curves

use crate::utils::math::{manhattan, midpoint};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Default number of chords used to measure a curve
pub const DEFAULT_CURVE_STEPS: usize = 20;

/// Default pick distance for handles, in drawing units
pub const DEFAULT_HIT_TOLERANCE: f64 = 10.0;

/// Segment flavour, used when creating new segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Line,
    Curve,
}

/// Editable point of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handle {
    Start,
    Control,
    End,
}

/// A single piece of wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Line {
        start: Point2<f64>,
        end: Point2<f64>,
    },
    Curve {
        start: Point2<f64>,
        control: Point2<f64>,
        end: Point2<f64>,
    },
}

impl Segment {
    pub fn line(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self::Line { start, end }
    }

    pub fn curve(start: Point2<f64>, control: Point2<f64>, end: Point2<f64>) -> Self {
        Self::Curve {
            start,
            control,
            end,
        }
    }

    pub fn kind(&self) -> SegmentKind {
        match self {
            Self::Line { .. } => SegmentKind::Line,
            Self::Curve { .. } => SegmentKind::Curve,
        }
    }

    pub fn start(&self) -> Point2<f64> {
        match *self {
            Self::Line { start, .. } | Self::Curve { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point2<f64> {
        match *self {
            Self::Line { end, .. } | Self::Curve { end, .. } => end,
        }
    }

    pub fn control(&self) -> Option<Point2<f64>> {
        match *self {
            Self::Line { .. } => None,
            Self::Curve { control, .. } => Some(control),
        }
    }

    pub fn set_start(&mut self, point: Point2<f64>) {
        match self {
            Self::Line { start, .. } | Self::Curve { start, .. } => *start = point,
        }
    }

    pub fn set_end(&mut self, point: Point2<f64>) {
        match self {
            Self::Line { end, .. } | Self::Curve { end, .. } => *end = point,
        }
    }

    /// Set the control point; lines have none and are left unchanged
    pub fn set_control(&mut self, point: Point2<f64>) {
        if let Self::Curve { control, .. } = self {
            *control = point;
        }
    }

    /// Defining points in drawing order
    pub fn points(&self) -> Vec<Point2<f64>> {
        match *self {
            Self::Line { start, end } => vec![start, end],
            Self::Curve {
                start,
                control,
                end,
            } => vec![start, control, end],
        }
    }

    /// Point at parameter `t` in [0, 1]
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        match *self {
            Self::Line { start, end } => start + (end - start) * t,
            Self::Curve {
                start,
                control,
                end,
            } => {
                let u = 1.0 - t;
                Point2::from(
                    start.coords * (u * u) + control.coords * (2.0 * u * t) + end.coords * (t * t),
                )
            }
        }
    }

    /// Length of the segment; curves are measured over `steps` chords
    pub fn length(&self, steps: usize) -> f64 {
        match *self {
            Self::Line { start, end } => (end - start).norm(),
            Self::Curve { start, .. } => {
                let steps = steps.max(1);
                let mut length = 0.0;
                let mut last = start;
                for i in 1..=steps {
                    let point = self.point_at(i as f64 / steps as f64);
                    length += (point - last).norm();
                    last = point;
                }
                length
            }
        }
    }

    /// Pick point used for snipping
    pub fn midpoint(&self) -> Point2<f64> {
        match *self {
            Self::Line { start, end } => midpoint(&start, &end),
            Self::Curve {
                start,
                control,
                end,
            } => Point2::from((start.coords + control.coords * 2.0 + end.coords) / 4.0),
        }
    }

    /// Which handle, if any, lies within `tolerance` of `point`
    pub fn hit_test(&self, point: &Point2<f64>, tolerance: f64) -> Option<Handle> {
        if manhattan(point, &self.start()) < tolerance {
            return Some(Handle::Start);
        }
        if let Some(control) = self.control() {
            if manhattan(point, &control) < tolerance {
                return Some(Handle::Control);
            }
        }
        if manhattan(point, &self.end()) < tolerance {
            return Some(Handle::End);
        }
        None
    }

    pub fn move_handle(&mut self, handle: Handle, to: Point2<f64>) {
        match handle {
            Handle::Start => self.set_start(to),
            Handle::Control => self.set_control(to),
            Handle::End => self.set_end(to),
        }
    }

    /// Direction of travel leaving the start point
    pub fn start_tangent(&self) -> Vector2<f64> {
        match *self {
            Self::Line { start, end } => end - start,
            Self::Curve {
                start,
                control,
                end,
            } => {
                let tangent = control - start;
                if tangent.norm_squared() > 0.0 {
                    tangent
                } else {
                    end - start
                }
            }
        }
    }

    /// Direction of travel arriving at the end point
    pub fn end_tangent(&self) -> Vector2<f64> {
        match *self {
            Self::Line { start, end } => end - start,
            Self::Curve {
                start,
                control,
                end,
            } => {
                let tangent = end - control;
                if tangent.norm_squared() > 0.0 {
                    tangent
                } else {
                    end - start
                }
            }
        }
    }
}
