// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Convert degrees to radians
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Convert radians to degrees
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

/// Taxicab distance between two points
pub fn manhattan(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Midpoint of two points
pub fn midpoint(a: &Point2<f64>, b: &Point2<f64>) -> Point2<f64> {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Signed angle in radians turning from `a` to `b`, counter-clockwise positive.
///
/// Returns 0 when either vector has zero length.
pub fn signed_turn(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    if a.norm_squared() == 0.0 || b.norm_squared() == 0.0 {
        return 0.0;
    }
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.dot(b);
    cross.atan2(dot)
}

/// Closest approach of two infinite lines `p1 + t·v1` and `p2 + s·v2`.
///
/// Returns the midpoint of the two closest points and the gap between them,
/// or `None` when the lines are parallel.
pub fn closest_point_between_lines(
    p1: &Point3<f64>,
    v1: &Vector3<f64>,
    p2: &Point3<f64>,
    v2: &Vector3<f64>,
) -> Option<(Point3<f64>, f64)> {
    let n = v1.cross(v2);
    if n.norm_squared() < 1e-18 {
        return None;
    }
    let n1 = v1.cross(&n);
    let n2 = v2.cross(&n);

    let c1 = p1 + v1 * ((p2 - p1).dot(&n2) / v1.dot(&n2));
    let c2 = p2 + v2 * ((p1 - p2).dot(&n1) / v2.dot(&n1));

    Some((nalgebra::center(&c1, &c2), (c1 - c2).norm()))
}

/// Median of a slice of finite values
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversion() {
        let rad = deg_to_rad(180.0);
        assert_relative_eq!(rad, std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(rad_to_deg(rad), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_manhattan() {
        let a = Point2::new(1.0, 2.0);
        let b = Point2::new(4.0, -2.0);
        assert_eq!(manhattan(&a, &b), 7.0);
    }

    #[test]
    fn test_signed_turn() {
        let east = Vector2::new(1.0, 0.0);
        let north = Vector2::new(0.0, 1.0);
        assert_relative_eq!(signed_turn(&east, &north), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(signed_turn(&north, &east), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_eq!(signed_turn(&east, &Vector2::zeros()), 0.0);
    }

    #[test]
    fn test_closest_point_between_lines() {
        // x axis at z=0 and y axis lifted to z=2 meet closest at (0,0,1)
        let (mid, gap) = closest_point_between_lines(
            &Point3::new(-5.0, 0.0, 0.0),
            &Vector3::x(),
            &Point3::new(0.0, 3.0, 2.0),
            &Vector3::y(),
        )
        .unwrap();
        assert_relative_eq!(mid.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mid.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mid.z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(gap, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_lines_have_no_closest_point() {
        let result = closest_point_between_lines(
            &Point3::origin(),
            &Vector3::x(),
            &Point3::new(0.0, 1.0, 0.0),
            &Vector3::x(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }
}
