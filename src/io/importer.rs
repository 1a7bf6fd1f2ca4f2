// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! File importers for SVG drawings and STL meshes

use crate::wire::WirePath;
use anyhow::{Context, Result};
use nalgebra::{Point3, Vector3};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Triangle of a loaded mesh, with its stored facet normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Facet {
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Normal from the winding order, falling back to the stored normal
    pub fn geometric_normal(&self) -> Vector3<f64> {
        let [a, b, c] = self.vertices;
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len > 1e-12 {
            n / len
        } else {
            self.normal
        }
    }
}

/// Import an SVG file as wire paths
pub fn import_svg_file(path: impl AsRef<Path>) -> Result<Vec<WirePath>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read SVG file: {}", path.display()))?;

    let paths = super::import_svg_str(&source)
        .with_context(|| format!("Failed to parse SVG file: {}", path.display()))?;

    info!(file = %path.display(), paths = paths.len(), "imported wire paths");
    Ok(paths)
}

/// Load an ASCII or binary STL file into facets
pub fn load_stl(path: impl AsRef<Path>) -> Result<Vec<Facet>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open STL file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let stl = stl_io::read_stl(&mut reader)
        .with_context(|| format!("Failed to read STL file: {}", path.display()))?;

    let point = |index: usize| {
        let v = stl.vertices[index];
        Point3::new(v[0] as f64, v[1] as f64, v[2] as f64)
    };

    let facets: Vec<Facet> = stl
        .faces
        .iter()
        .map(|face| Facet {
            vertices: [
                point(face.vertices[0]),
                point(face.vertices[1]),
                point(face.vertices[2]),
            ],
            normal: Vector3::new(
                face.normal[0] as f64,
                face.normal[1] as f64,
                face.normal[2] as f64,
            ),
        })
        .collect();

    info!(file = %path.display(), facets = facets.len(), "loaded STL mesh");
    Ok(facets)
}
