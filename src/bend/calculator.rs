// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bend allowance calculator

use super::{BendResult, BendSpec};
use crate::error::BendError;
use crate::utils::math::deg_to_rad;

/// Stateless bend calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct BendCalculator;

impl BendCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute allowance, setback and deduction for a bend
    pub fn compute(&self, spec: &BendSpec) -> Result<BendResult, BendError> {
        spec.validate()?;

        let bend_allowance = Self::allowance(spec);
        let outside_setback = Self::outside_setback(spec);
        let bend_deduction = outside_setback.map(|ossb| 2.0 * ossb - bend_allowance);

        Ok(BendResult {
            bend_allowance,
            outside_setback,
            bend_deduction,
        })
    }

    /// `angle_rad * (r + k * t)`; the input must already be valid
    fn allowance(spec: &BendSpec) -> f64 {
        deg_to_rad(spec.angle) * (spec.inside_radius + spec.k_factor * spec.thickness)
    }

    /// `tan(angle / 2) * (r + t)`, undefined for a full fold
    fn outside_setback(spec: &BendSpec) -> Option<f64> {
        if spec.angle >= 180.0 {
            return None;
        }
        Some((deg_to_rad(spec.angle) / 2.0).tan() * (spec.inside_radius + spec.thickness))
    }
}

/// Compute the bend allowance of a single bend
pub fn compute_bend_allowance(spec: &BendSpec) -> Result<BendResult, BendError> {
    BendCalculator::new().compute(spec)
}
