// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use nalgebra::{Point2, Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Length of the main diagonal
    pub fn diagonal(&self) -> f64 {
        self.size().norm()
    }
}

/// Axis-aligned rectangle in the drawing plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingRect {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingRect {
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2<f64>>) -> Self {
        let mut rect = Self::empty();
        for point in points {
            rect.expand_to_include(&point);
        }
        rect
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn expand_to_include(&mut self, point: &Point2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn size(&self) -> Vector2<f64> {
        if self.is_empty() {
            return Vector2::zeros();
        }
        self.max - self.min
    }

    /// Grow by `margin` on every side
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: self.min - Vector2::repeat(margin),
            max: self.max + Vector2::repeat(margin),
        }
    }
}
