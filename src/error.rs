// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Domain error types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input field of a bend calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BendField {
    Thickness,
    Angle,
    InsideRadius,
    KFactor,
    Leg,
}

impl BendField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BendField::Thickness => "thickness",
            BendField::Angle => "angle",
            BendField::InsideRadius => "inside_radius",
            BendField::KFactor => "k_factor",
            BendField::Leg => "leg",
        }
    }
}

impl fmt::Display for BendField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by bend calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BendError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: BendField, reason: String },
    #[error("invalid flat pattern: {0}")]
    Sequence(String),
}

impl BendError {
    pub fn invalid(field: BendField, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Field that failed validation, if any
    pub fn field(&self) -> Option<BendField> {
        match self {
            Self::InvalidInput { field, .. } => Some(*field),
            Self::Sequence(_) => None,
        }
    }
}

/// Errors raised when editing wire paths
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    #[error("path index {index} out of range ({count} paths)")]
    PathIndex { index: usize, count: usize },
    #[error("segment index {index} out of range ({count} segments)")]
    SegmentIndex { index: usize, count: usize },
    #[error("wire diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),
}

/// Errors raised by centerline extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CenterlineError {
    #[error("mesh has no facets")]
    EmptyMesh,
    #[error("centerline needs at least {required} points, found {actual}")]
    TooFewPoints { required: usize, actual: usize },
}
