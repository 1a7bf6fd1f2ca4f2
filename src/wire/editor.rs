// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Positional editing of a path collection

use super::collection::PathCollection;
use super::segment::{Handle, Segment, SegmentKind, DEFAULT_HIT_TOLERANCE};
use crate::utils::math::{manhattan, midpoint};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Geometry used when the editor creates segments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Manhattan pick distance
    pub tolerance: f64,
    /// Length of a newly added segment
    pub segment_length: f64,
    /// Sideways offset of a new curve's control point
    pub curve_offset: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_HIT_TOLERANCE,
            segment_length: 100.0,
            curve_offset: 50.0,
        }
    }
}

/// What a click does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    Idle,
    Add(SegmentKind),
    Snip,
}

/// Handle currently being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragTarget {
    pub path: usize,
    pub segment: usize,
    pub handle: Handle,
}

/// Applies clicks and drags to a [`PathCollection`]
#[derive(Debug, Clone)]
pub struct Editor {
    collection: PathCollection,
    settings: EditorSettings,
    mode: EditMode,
    drag: Option<DragTarget>,
}

impl Editor {
    pub fn new(collection: PathCollection) -> Self {
        Self::with_settings(collection, EditorSettings::default())
    }

    pub fn with_settings(collection: PathCollection, settings: EditorSettings) -> Self {
        Self {
            collection,
            settings,
            mode: EditMode::Idle,
            drag: None,
        }
    }

    pub fn collection(&self) -> &PathCollection {
        &self.collection
    }

    pub fn into_collection(self) -> PathCollection {
        self.collection
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn dragging(&self) -> Option<DragTarget> {
        self.drag
    }

    pub fn set_add_mode(&mut self, kind: SegmentKind) {
        self.mode = EditMode::Add(kind);
    }

    pub fn toggle_snip(&mut self) {
        self.mode = match self.mode {
            EditMode::Snip => EditMode::Idle,
            _ => EditMode::Snip,
        };
    }

    /// Apply a click in the current mode; returns whether anything changed
    pub fn click(&mut self, position: Point2<f64>) -> bool {
        match self.mode {
            EditMode::Idle => false,
            EditMode::Snip => self.snip(position),
            EditMode::Add(kind) => {
                self.add(position, kind);
                self.mode = EditMode::Idle;
                true
            }
        }
    }

    /// Remove the segment whose midpoint is under `position` and split its path there
    fn snip(&mut self, position: Point2<f64>) -> bool {
        let tolerance = self.settings.tolerance;
        let hit = self
            .collection
            .paths()
            .iter()
            .enumerate()
            .find_map(|(path_index, path)| {
                path.segments()
                    .iter()
                    .position(|s| manhattan(&position, &s.midpoint()) < tolerance)
                    .map(|segment_index| (path_index, segment_index))
            });

        let Some((path_index, segment_index)) = hit else {
            return false;
        };

        debug!(path = path_index, segment = segment_index, "snipping segment");
        let removed = self
            .collection
            .get_mut(path_index)
            .and_then(|path| path.remove(segment_index))
            .and_then(|_| self.collection.split_path(path_index, segment_index));
        removed.is_ok()
    }

    fn add(&mut self, position: Point2<f64>, kind: SegmentKind) {
        let tolerance = self.settings.tolerance;

        for index in 0..self.collection.len() {
            let Some(path) = self.collection.paths().get(index) else {
                break;
            };
            match path.endpoints() {
                None => {
                    self.append(index, position, kind);
                    return;
                }
                Some((start, _)) if manhattan(&position, &start) < tolerance => {
                    self.prepend(index, start, kind);
                    return;
                }
                Some((_, end)) if manhattan(&position, &end) < tolerance => {
                    self.append(index, end, kind);
                    return;
                }
                Some(_) => {}
            }
        }

        let index = self.collection.add_path();
        self.append(index, position, kind);
    }

    fn append(&mut self, path_index: usize, anchor: Point2<f64>, kind: SegmentKind) {
        let Ok(path) = self.collection.get(path_index) else {
            return;
        };

        let direction = path
            .segments()
            .last()
            .map(|last| last.end() - last.start())
            .filter(|d| d.norm_squared() > 0.0)
            .map(|d| d.normalize())
            .unwrap_or_else(Vector2::x);

        let end = anchor + direction * self.settings.segment_length;
        let segment = self.build(anchor, end, kind, 1.0);
        if let Ok(path) = self.collection.get_mut(path_index) {
            debug!(path = path_index, ?kind, "appending segment");
            path.push(segment);
        }
    }

    fn prepend(&mut self, path_index: usize, anchor: Point2<f64>, kind: SegmentKind) {
        let start = anchor - Vector2::x() * self.settings.segment_length;
        let segment = self.build(start, anchor, kind, -1.0);
        if let Ok(path) = self.collection.get_mut(path_index) {
            debug!(path = path_index, ?kind, "prepending segment");
            path.push_front(segment);
        }
    }

    fn build(&self, start: Point2<f64>, end: Point2<f64>, kind: SegmentKind, side: f64) -> Segment {
        match kind {
            SegmentKind::Line => Segment::line(start, end),
            SegmentKind::Curve => {
                let control =
                    midpoint(&start, &end) + Vector2::y() * (side * self.settings.curve_offset);
                Segment::curve(start, control, end)
            }
        }
    }

    /// Grab the first handle under `position`
    pub fn begin_drag(&mut self, position: Point2<f64>) -> bool {
        let tolerance = self.settings.tolerance;
        self.drag = self
            .collection
            .paths()
            .iter()
            .enumerate()
            .find_map(|(path, p)| {
                p.segments().iter().enumerate().find_map(|(segment, s)| {
                    s.hit_test(&position, tolerance).map(|handle| DragTarget {
                        path,
                        segment,
                        handle,
                    })
                })
            });
        self.drag.is_some()
    }

    /// Move the grabbed handle
    pub fn drag_to(&mut self, position: Point2<f64>) -> bool {
        let Some(target) = self.drag else {
            return false;
        };
        self.collection
            .get_mut(target.path)
            .and_then(|path| path.move_handle(target.segment, target.handle, position))
            .is_ok()
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}
