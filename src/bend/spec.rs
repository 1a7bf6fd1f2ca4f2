// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bend input and output types

use crate::error::{BendError, BendField};
use serde::{Deserialize, Serialize};

/// Parameters of a single bend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendSpec {
    /// Material gauge
    pub thickness: f64,
    /// Bend angle in degrees, in (0, 180]
    pub angle: f64,
    /// Radius on the concave face
    pub inside_radius: f64,
    /// Neutral axis position as a fraction of thickness, in (0, 1)
    pub k_factor: f64,
}

impl BendSpec {
    pub fn new(thickness: f64, angle: f64, inside_radius: f64, k_factor: f64) -> Self {
        Self {
            thickness,
            angle,
            inside_radius,
            k_factor,
        }
    }

    /// Check every field, reporting the first one out of range.
    ///
    /// Fields are checked in declaration order.
    pub fn validate(&self) -> Result<(), BendError> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(BendError::invalid(
                BendField::Thickness,
                format!("must be positive, got {}", self.thickness),
            ));
        }
        if !self.angle.is_finite() || self.angle <= 0.0 || self.angle > 180.0 {
            return Err(BendError::invalid(
                BendField::Angle,
                format!("must be in (0, 180] degrees, got {}", self.angle),
            ));
        }
        if !self.inside_radius.is_finite() || self.inside_radius < 0.0 {
            return Err(BendError::invalid(
                BendField::InsideRadius,
                format!("must be non-negative, got {}", self.inside_radius),
            ));
        }
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 || self.k_factor >= 1.0 {
            return Err(BendError::invalid(
                BendField::KFactor,
                format!("must be in (0, 1), got {}", self.k_factor),
            ));
        }
        Ok(())
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }
}

/// Derived lengths for one bend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BendResult {
    /// Arc length of the neutral axis through the bend
    pub bend_allowance: f64,
    /// Distance from bend tangent to mold line; unbounded at 180 degrees
    pub outside_setback: Option<f64>,
    /// Length removed from summed mold-line dimensions
    pub bend_deduction: Option<f64>,
}
