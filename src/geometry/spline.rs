// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing a point chain into cubic Bézier curves

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Cubic Bézier segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub start: Point3<f64>,
    pub control1: Point3<f64>,
    pub control2: Point3<f64>,
    pub end: Point3<f64>,
}

impl CubicBezier {
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let u = 1.0 - t;
        Point3::from(
            self.start.coords * (u * u * u)
                + self.control1.coords * (3.0 * u * u * t)
                + self.control2.coords * (3.0 * u * t * t)
                + self.end.coords * (t * t * t),
        )
    }

    pub fn points(&self) -> [Point3<f64>; 4] {
        [self.start, self.control1, self.control2, self.end]
    }
}

/// Fit a smooth curve through an ordered point chain.
///
/// `max_error` is a percentage of `wire_diameter`; points closer than that to
/// the simplified chain are dropped before the curve is threaded through the
/// remaining ones.
pub fn fit_spline(points: &[Point3<f64>], max_error: f64, wire_diameter: f64) -> Vec<CubicBezier> {
    let tolerance = (max_error * wire_diameter / 100.0).max(0.0);
    let kept = simplify(points, tolerance);
    catmull_rom(&kept)
}

/// Ramer–Douglas–Peucker simplification
pub fn simplify(points: &[Point3<f64>], tolerance: f64) -> Vec<Point3<f64>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut stack = vec![(0, points.len() - 1)];
    while let Some((first, last)) = stack.pop() {
        if last <= first + 1 {
            continue;
        }
        let (index, distance) = (first + 1..last)
            .map(|i| (i, distance_to_segment(&points[i], &points[first], &points[last])))
            .fold((first, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });

        if distance > tolerance {
            keep[index] = true;
            stack.push((first, index));
            stack.push((index, last));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn distance_to_segment(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Uniform Catmull-Rom spline through every point, as cubic Béziers
fn catmull_rom(points: &[Point3<f64>]) -> Vec<CubicBezier> {
    if points.len() < 2 {
        return Vec::new();
    }
    let last = points.len() - 1;

    (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];
            CubicBezier {
                start: p1,
                control1: p1 + (p2 - p0) / 6.0,
                control2: p2 - (p3 - p1) / 6.0,
                end: p2,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_simplify_collinear() {
        let points: Vec<_> = (0..10).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let kept = simplify(&points, 0.01);
        assert_eq!(kept, vec![points[0], points[9]]);
    }

    #[test]
    fn test_simplify_keeps_corner() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5.0, 0.1, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 0.0),
        ];
        let kept = simplify(&points, 0.5);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[1], Point3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_curves_interpolate_kept_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 0.0),
            Point3::new(20.0, 0.0, 0.0),
        ];
        let curves = fit_spline(&points, 0.0, 1.0);
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].start, points[0]);
        assert_eq!(curves[0].end, points[1]);
        assert_eq!(curves[1].end, points[2]);
        // Joints are C1: controls on either side are mirrored
        let out = curves[1].control1 - curves[1].start;
        let inc = curves[0].end - curves[0].control2;
        assert_relative_eq!(out, inc, epsilon = 1e-12);
        assert_eq!(curves[0].point_at(1.0), points[1]);
    }

    #[test]
    fn test_too_few_points() {
        assert!(fit_spline(&[Point3::origin()], 5.0, 1.0).is_empty());
    }
}
