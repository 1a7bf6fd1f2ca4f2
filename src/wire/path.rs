// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Continuous wire path

use super::segment::{Handle, Segment};
use crate::error::WireError;
use crate::utils::math::{midpoint, rad_to_deg, signed_turn};
use serde::{Deserialize, Serialize};

/// Default wire gauge for new paths
pub const DEFAULT_WIRE_DIAMETER: f64 = 2.0;

/// Default stroke for paths without a palette colour
pub const DEFAULT_STROKE: &str = "#000000";

/// One feed-then-bend step of a bending program
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendStep {
    /// Length of wire fed before the bend
    pub feed: f64,
    /// Turn in degrees, counter-clockwise positive; `None` after the last feed
    pub bend: Option<f64>,
}

/// An ordered chain of connected segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePath {
    segments: Vec<Segment>,
    pub wire_diameter: f64,
    pub stroke: String,
}

impl WirePath {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            wire_diameter: DEFAULT_WIRE_DIAMETER,
            stroke: DEFAULT_STROKE.to_string(),
        }
    }

    pub fn with_stroke(stroke: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            ..Self::new()
        }
    }

    /// Build a path from segments, chaining each start onto the previous end
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        let mut path = Self::new();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total wire length; curves are measured over `steps` chords
    pub fn length(&self, steps: usize) -> f64 {
        self.segments.iter().map(|s| s.length(steps)).sum()
    }

    /// Append a segment, snapping its start onto the current end
    pub fn push(&mut self, mut segment: Segment) {
        if let Some(last) = self.segments.last() {
            segment.set_start(last.end());
        }
        self.segments.push(segment);
    }

    /// Prepend a segment, snapping its end onto the current start
    pub fn push_front(&mut self, mut segment: Segment) {
        if let Some(first) = self.segments.first() {
            segment.set_end(first.start());
        }
        self.segments.insert(0, segment);
    }

    /// Move one handle; shared endpoints drag the neighbouring segment along
    pub fn move_handle(
        &mut self,
        index: usize,
        handle: Handle,
        to: nalgebra::Point2<f64>,
    ) -> Result<(), WireError> {
        self.check_index(index)?;
        self.segments[index].move_handle(handle, to);

        match handle {
            Handle::Start if index > 0 => self.segments[index - 1].set_end(to),
            Handle::End if index + 1 < self.segments.len() => {
                self.segments[index + 1].set_start(to)
            }
            _ => {}
        }
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Segment, WireError> {
        self.check_index(index)?;
        Ok(self.segments.remove(index))
    }

    /// Keep segments `0..at` and return the rest as a new path.
    ///
    /// A curve on either side of the cut is reshaped: the kept curve ends at
    /// its control point and the first detached curve starts at its old
    /// control point with a fresh control point on its chord midpoint.
    pub fn split_off(&mut self, at: usize) -> Result<WirePath, WireError> {
        if at > self.segments.len() {
            return Err(WireError::SegmentIndex {
                index: at,
                count: self.segments.len(),
            });
        }

        let tail = self.segments.split_off(at);
        let mut detached = WirePath {
            segments: Vec::with_capacity(tail.len()),
            wire_diameter: self.wire_diameter,
            stroke: self.stroke.clone(),
        };

        let cut = !self.segments.is_empty() && !tail.is_empty();
        if cut {
            if let Some(last) = self.segments.last_mut() {
                if let Some(control) = last.control() {
                    last.set_end(control);
                }
            }
        }

        for (i, mut segment) in tail.into_iter().enumerate() {
            if i == 0 {
                if let Segment::Curve {
                    start,
                    control,
                    end,
                } = &mut segment
                {
                    if cut {
                        *start = *control;
                    }
                    *control = midpoint(start, end);
                }
            }
            detached.push(segment);
        }

        Ok(detached)
    }

    pub fn set_wire_diameter(&mut self, diameter: f64) -> Result<(), WireError> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(WireError::InvalidDiameter(diameter));
        }
        self.wire_diameter = diameter;
        Ok(())
    }

    /// Feed lengths and joint turns along the path
    pub fn bend_schedule(&self, steps: usize) -> Vec<BendStep> {
        self.segments
            .iter()
            .enumerate()
            .map(|(i, segment)| BendStep {
                feed: segment.length(steps),
                bend: self.segments.get(i + 1).map(|next| {
                    rad_to_deg(signed_turn(&segment.end_tangent(), &next.start_tangent()))
                }),
            })
            .collect()
    }

    /// Start of the first and end of the last segment
    pub fn endpoints(&self) -> Option<(nalgebra::Point2<f64>, nalgebra::Point2<f64>)> {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => Some((first.start(), last.end())),
            _ => None,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), WireError> {
        if index >= self.segments.len() {
            return Err(WireError::SegmentIndex {
                index,
                count: self.segments.len(),
            });
        }
        Ok(())
    }
}

impl Default for WirePath {
    fn default() -> Self {
        Self::new()
    }
}
