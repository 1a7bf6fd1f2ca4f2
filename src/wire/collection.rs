// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Collection of wire paths

use super::path::{WirePath, DEFAULT_WIRE_DIAMETER};
use crate::error::WireError;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Stroke colours handed out to new paths
pub const PALETTE: [&str; 12] = [
    "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff", "#800000", "#008000",
    "#000080", "#808000", "#800080", "#008080",
];

/// All paths of a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCollection {
    paths: Vec<WirePath>,
    /// Diameter given to paths created by the collection
    #[serde(default = "default_wire_diameter")]
    wire_diameter: f64,
}

fn default_wire_diameter() -> f64 {
    DEFAULT_WIRE_DIAMETER
}

impl PathCollection {
    /// A collection holding one empty path
    pub fn new() -> Self {
        let mut collection = Self {
            paths: Vec::new(),
            wire_diameter: DEFAULT_WIRE_DIAMETER,
        };
        collection.paths.push(collection.fresh_path());
        collection
    }

    /// A collection holding one empty path whose new paths use `diameter`
    pub fn with_wire_diameter(diameter: f64) -> Result<Self, WireError> {
        let mut collection = Self::new();
        collection.set_wire_diameter(diameter, None)?;
        Ok(collection)
    }

    /// Diameter of paths the collection creates
    pub fn wire_diameter(&self) -> f64 {
        self.wire_diameter
    }

    pub fn paths(&self) -> &[WirePath] {
        &self.paths
    }

    pub fn paths_mut(&mut self) -> &mut [WirePath] {
        &mut self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&WirePath, WireError> {
        let count = self.paths.len();
        self.paths
            .get(index)
            .ok_or(WireError::PathIndex { index, count })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut WirePath, WireError> {
        let count = self.paths.len();
        self.paths
            .get_mut(index)
            .ok_or(WireError::PathIndex { index, count })
    }

    /// Append an empty path with an unused stroke colour and return its index
    pub fn add_path(&mut self) -> usize {
        let path = self.fresh_path();
        self.paths.push(path);
        self.paths.len() - 1
    }

    /// Split a path so that it keeps segments `0..at`.
    ///
    /// The detached part is inserted right after the source. Paths left
    /// without segments are dropped.
    pub fn split_path(&mut self, path_index: usize, at: usize) -> Result<(), WireError> {
        let stroke = self.next_stroke();
        let mut detached = self.get_mut(path_index)?.split_off(at)?;
        detached.stroke = stroke;

        if !detached.is_empty() {
            self.paths.insert(path_index + 1, detached);
        }
        if self.paths[path_index].is_empty() {
            self.paths.remove(path_index);
        }
        Ok(())
    }

    /// Sum of all path lengths
    pub fn total_length(&self, steps: usize) -> f64 {
        self.paths.iter().map(|p| p.length(steps)).sum()
    }

    /// Replace every path with an imported set
    pub fn import(&mut self, paths: Vec<WirePath>) {
        self.paths = paths;
    }

    /// Open ends where new segments can be attached
    pub fn add_points(&self) -> Vec<Point2<f64>> {
        self.paths
            .iter()
            .filter_map(|p| p.endpoints())
            .flat_map(|(start, end)| [start, end])
            .collect()
    }

    /// Set the wire diameter of one path, or of all paths when `path_index` is `None`.
    ///
    /// Setting all paths also changes the diameter of paths created later.
    pub fn set_wire_diameter(
        &mut self,
        diameter: f64,
        path_index: Option<usize>,
    ) -> Result<(), WireError> {
        match path_index {
            Some(index) => self.get_mut(index)?.set_wire_diameter(diameter),
            None => {
                if !diameter.is_finite() || diameter <= 0.0 {
                    return Err(WireError::InvalidDiameter(diameter));
                }
                self.wire_diameter = diameter;
                self.paths
                    .iter_mut()
                    .try_for_each(|p| p.set_wire_diameter(diameter))
            }
        }
    }

    fn fresh_path(&self) -> WirePath {
        let mut path = WirePath::with_stroke(self.next_stroke());
        path.wire_diameter = self.wire_diameter;
        path
    }

    fn next_stroke(&self) -> String {
        PALETTE
            .iter()
            .copied()
            .find(|colour| !self.paths.iter().any(|p| p.stroke == *colour))
            .unwrap_or(PALETTE[self.paths.len() % PALETTE.len()])
            .to_string()
    }
}

impl Default for PathCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<WirePath>> for PathCollection {
    fn from(paths: Vec<WirePath>) -> Self {
        Self {
            paths,
            wire_diameter: DEFAULT_WIRE_DIAMETER,
        }
    }
}
