// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wire centerline extraction from a triangle mesh.
//!
//! Every facet normal of a round wire points at (or away from) the wire's
//! axis, so where normal lines of nearby facets nearly meet, the meeting
//! point lies on the centerline. Those points are collected, ordered along
//! the wire's principal axis and smoothed into Bézier curves.

use super::spline::{fit_spline, CubicBezier};
use super::BoundingBox;
use crate::error::CenterlineError;
use crate::io::{self, Facet};
use crate::utils::math::{closest_point_between_lines, median};
use anyhow::{Context, Result};
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Tuning for centerline extraction and output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CenterlineOptions {
    /// Facets considered; larger meshes are sampled down
    pub sample_size: usize,
    /// Allowed deviation of the fitted curve, as a percentage of wire diameter
    pub max_error: f64,
    /// SVG output scale
    pub scale: f64,
    /// Seed for facet sampling
    pub seed: u64,
}

impl Default for CenterlineOptions {
    fn default() -> Self {
        Self {
            sample_size: 1000,
            max_error: 5.0,
            scale: 1.0,
            seed: 42,
        }
    }
}

/// Ordered centerline points and the gauge estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Centerline {
    pub points: Vec<Point3<f64>>,
    pub wire_diameter: f64,
}

/// Outcome of an STL to SVG conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterlineSummary {
    pub point_count: usize,
    pub bezier_count: usize,
    pub wire_diameter: f64,
}

/// Find the centerline of a wire mesh
pub fn extract_centerline(
    facets: &[Facet],
    options: &CenterlineOptions,
) -> Result<Centerline, CenterlineError> {
    if facets.is_empty() {
        return Err(CenterlineError::EmptyMesh);
    }

    let bbox = BoundingBox::from_points(facets.iter().flat_map(|f| f.vertices.iter()));
    let max_distance = bbox.diagonal() * 0.01;

    let sampled = sample_lines(facets, options);
    debug!(
        facets = facets.len(),
        sampled = sampled.len(),
        max_distance,
        "searching normal intersections"
    );

    // Nearly antiparallel normals meet far outside the mesh; only points
    // within the pair search radius of both facets count.
    let reach = max_distance * 10.0;
    let lines = &sampled;
    let candidates: Vec<Point3<f64>> = (0..lines.len())
        .into_par_iter()
        .flat_map_iter(move |i| {
            let (p1, v1) = lines[i];
            (i + 1..lines.len()).filter_map(move |j| {
                let (p2, v2) = lines[j];
                if (p1 - p2).norm() > reach {
                    return None;
                }
                closest_point_between_lines(&p1, &v1, &p2, &v2)
                    .filter(|(point, gap)| {
                        *gap < max_distance
                            && (point - p1).norm() <= reach
                            && (point - p2).norm() <= reach
                    })
                    .map(|(point, _)| point)
            })
        })
        .collect();

    let mut points = deduplicate(&candidates);
    if points.len() < 2 {
        return Err(CenterlineError::TooFewPoints {
            required: 2,
            actual: points.len(),
        });
    }

    order_along_principal_axis(&mut points);

    let spacings: Vec<f64> = points.windows(2).map(|w| (w[1] - w[0]).norm()).collect();
    let wire_diameter = median(&spacings).unwrap_or(0.0);

    debug!(points = points.len(), wire_diameter, "centerline extracted");
    Ok(Centerline {
        points,
        wire_diameter,
    })
}

/// Centroid and normal line of each (sampled) facet
fn sample_lines(facets: &[Facet], options: &CenterlineOptions) -> Vec<(Point3<f64>, Vector3<f64>)> {
    let line = |f: &Facet| (f.centroid(), f.geometric_normal());

    if facets.len() <= options.sample_size {
        return facets.iter().map(line).collect();
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    rand::seq::index::sample(&mut rng, facets.len(), options.sample_size)
        .into_iter()
        .map(|i| line(&facets[i]))
        .collect()
}

/// Merge points that agree to five decimals
fn deduplicate(points: &[Point3<f64>]) -> Vec<Point3<f64>> {
    const SCALE: f64 = 1e5;
    let keys: BTreeSet<(i64, i64, i64)> = points
        .iter()
        .filter(|p| p.coords.iter().all(|c| c.is_finite()))
        .map(|p| {
            (
                (p.x * SCALE).round() as i64,
                (p.y * SCALE).round() as i64,
                (p.z * SCALE).round() as i64,
            )
        })
        .collect();

    keys.into_iter()
        .map(|(x, y, z)| Point3::new(x as f64 / SCALE, y as f64 / SCALE, z as f64 / SCALE))
        .collect()
}

/// Sort points by their projection onto the dominant direction of spread
fn order_along_principal_axis(points: &mut [Point3<f64>]) {
    let count = points.len() as f64;
    let centroid = points.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / count;

    let mut covariance = Matrix3::zeros();
    for p in points.iter() {
        let d = p.coords - centroid;
        covariance += d * d.transpose();
    }
    covariance /= count;

    let eigen = SymmetricEigen::new(covariance);
    let primary = eigen.eigenvalues.imax();
    let axis: Vector3<f64> = eigen.eigenvectors.column(primary).into_owned();

    points.sort_by(|a, b| {
        let pa = (a.coords - centroid).dot(&axis);
        let pb = (b.coords - centroid).dot(&axis);
        pa.total_cmp(&pb)
    });
}

/// Smooth a centerline into Bézier curves
pub fn fit_centerline(centerline: &Centerline, max_error: f64) -> Vec<CubicBezier> {
    fit_spline(&centerline.points, max_error, centerline.wire_diameter)
}

/// Convert an STL wire model into an SVG drawing of its centerline
pub fn stl_to_svg(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CenterlineOptions,
) -> Result<CenterlineSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    let facets = io::load_stl(input)?;
    let centerline = extract_centerline(&facets, options)
        .with_context(|| format!("Failed to extract centerline from {}", input.display()))?;
    let curves = fit_centerline(&centerline, options.max_error);

    let document = io::export_centerline_svg(&curves, options.scale)?;
    std::fs::write(output, document)
        .with_context(|| format!("Failed to write SVG file: {}", output.display()))?;

    let summary = CenterlineSummary {
        point_count: centerline.points.len(),
        bezier_count: curves.len(),
        wire_diameter: centerline.wire_diameter,
    };
    info!(
        file = %output.display(),
        curves = summary.bezier_count,
        wire_diameter = summary.wire_diameter,
        "centerline written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Facet {
        Facet {
            vertices: [a, b, c],
            normal: Vector3::zeros(),
        }
    }

    #[test]
    fn test_empty_mesh() {
        assert_eq!(
            extract_centerline(&[], &CenterlineOptions::default()),
            Err(CenterlineError::EmptyMesh)
        );
    }

    #[test]
    fn test_flat_plate_has_no_centerline() {
        // Coplanar facets share one normal direction, so every pair is parallel
        let plate = vec![
            facet(
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
            facet(
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ),
        ];
        assert!(matches!(
            extract_centerline(&plate, &CenterlineOptions::default()),
            Err(CenterlineError::TooFewPoints { .. })
        ));
    }

    #[test]
    fn test_deduplicate_rounds() {
        let points = [
            Point3::new(1.000001, 2.0, 3.0),
            Point3::new(1.000002, 2.0, 3.0),
            Point3::new(f64::NAN, 0.0, 0.0),
        ];
        let unique = deduplicate(&points);
        assert_eq!(unique, vec![Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_principal_axis_ordering() {
        let mut points = vec![
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.1, 0.0, -5.0),
            Point3::new(0.0, 0.1, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        order_along_principal_axis(&mut points);
        let z: Vec<f64> = points.iter().map(|p| p.z).collect();
        let ascending = z.windows(2).all(|w| w[0] <= w[1]);
        let descending = z.windows(2).all(|w| w[0] >= w[1]);
        assert!(ascending || descending, "{:?}", z);
    }
}
