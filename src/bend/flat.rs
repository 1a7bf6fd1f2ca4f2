// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat pattern length from legs and bends

use super::{BendCalculator, BendResult, BendSpec};
use crate::error::{BendError, BendField};
use serde::{Deserialize, Serialize};

/// One element of a bent profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Feature {
    /// Straight length between bend tangent lines
    Leg(f64),
    /// Bend angle in degrees
    Bend(f64),
}

/// Unfolded length of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatLength {
    pub legs_total: f64,
    pub allowance_total: f64,
    pub flat_length: f64,
    pub bends: Vec<BendResult>,
}

/// Builder for a profile sharing one material and tooling setup
#[derive(Debug, Clone)]
pub struct FlatPattern {
    thickness: f64,
    inside_radius: f64,
    k_factor: f64,
    features: Vec<Feature>,
}

impl FlatPattern {
    pub fn new(thickness: f64, inside_radius: f64, k_factor: f64) -> Self {
        Self {
            thickness,
            inside_radius,
            k_factor,
            features: Vec::new(),
        }
    }

    pub fn leg(mut self, length: f64) -> Self {
        self.features.push(Feature::Leg(length));
        self
    }

    pub fn bend(mut self, angle: f64) -> Self {
        self.features.push(Feature::Bend(angle));
        self
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Sum legs and bend allowances.
    ///
    /// The profile must alternate leg, bend, leg, ... and start and end on a leg.
    pub fn compute(&self) -> Result<FlatLength, BendError> {
        self.check_sequence()?;

        let calculator = BendCalculator::new();
        let base = BendSpec::new(self.thickness, 90.0, self.inside_radius, self.k_factor);

        let mut legs_total = 0.0;
        let mut bends = Vec::new();

        for feature in &self.features {
            match *feature {
                Feature::Leg(length) => {
                    if !length.is_finite() || length < 0.0 {
                        return Err(BendError::invalid(
                            BendField::Leg,
                            format!("must be non-negative, got {}", length),
                        ));
                    }
                    legs_total += length;
                }
                Feature::Bend(angle) => {
                    bends.push(calculator.compute(&base.with_angle(angle))?);
                }
            }
        }

        let allowance_total: f64 = bends.iter().map(|b| b.bend_allowance).sum();

        Ok(FlatLength {
            legs_total,
            allowance_total,
            flat_length: legs_total + allowance_total,
            bends,
        })
    }

    fn check_sequence(&self) -> Result<(), BendError> {
        match (self.features.first(), self.features.last()) {
            (Some(Feature::Leg(_)), Some(Feature::Leg(_))) => {}
            (None, _) => return Err(BendError::Sequence("profile is empty".into())),
            _ => {
                return Err(BendError::Sequence(
                    "profile must start and end with a leg".into(),
                ))
            }
        }

        for (i, pair) in self.features.windows(2).enumerate() {
            let repeated = matches!(
                pair,
                [Feature::Leg(_), Feature::Leg(_)] | [Feature::Bend(_), Feature::Bend(_)]
            );
            if repeated {
                return Err(BendError::Sequence(format!(
                    "features {} and {} must alternate between leg and bend",
                    i,
                    i + 1
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_leg_is_its_own_length() {
        let flat = FlatPattern::new(1.0, 1.0, 0.4).leg(25.0).compute().unwrap();
        assert_eq!(flat.flat_length, 25.0);
        assert!(flat.bends.is_empty());
    }

    #[test]
    fn test_channel_profile() {
        let flat = FlatPattern::new(2.0, 3.0, 0.44)
            .leg(20.0)
            .bend(90.0)
            .leg(50.0)
            .bend(90.0)
            .leg(20.0)
            .compute()
            .unwrap();

        assert_eq!(flat.bends.len(), 2);
        assert_relative_eq!(flat.legs_total, 90.0);
        assert_relative_eq!(flat.allowance_total, 2.0 * 6.0946, epsilon = 1e-3);
        assert_relative_eq!(flat.flat_length, 90.0 + flat.allowance_total);
    }

    #[test]
    fn test_rejects_bad_sequences() {
        assert!(matches!(
            FlatPattern::new(1.0, 1.0, 0.4).compute(),
            Err(BendError::Sequence(_))
        ));
        assert!(matches!(
            FlatPattern::new(1.0, 1.0, 0.4).bend(90.0).leg(10.0).compute(),
            Err(BendError::Sequence(_))
        ));
        assert!(matches!(
            FlatPattern::new(1.0, 1.0, 0.4).leg(10.0).leg(10.0).compute(),
            Err(BendError::Sequence(_))
        ));
    }

    #[test]
    fn test_propagates_bend_errors() {
        let err = FlatPattern::new(1.0, 1.0, 0.4)
            .leg(10.0)
            .bend(200.0)
            .leg(10.0)
            .compute()
            .unwrap_err();
        assert_eq!(err.field(), Some(BendField::Angle));

        let err = FlatPattern::new(1.0, 1.0, 0.4)
            .leg(-1.0)
            .compute()
            .unwrap_err();
        assert_eq!(err.field(), Some(BendField::Leg));
    }
}
