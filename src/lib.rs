// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! BendPrep
//!
//! Bend geometry for fabrication: bend allowance, outside setback, bend
//! deduction and flat pattern length. Also carries the wire path tooling
//! used to prepare bent wire parts: a line/curve path model with editing,
//! SVG import and export, and centerline extraction from STL meshes.

pub mod bend;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;
pub mod wire;

pub use bend::{
    compute_bend_allowance, BendCalculator, BendResult, BendSpec, Feature, FlatLength, FlatPattern,
};
pub use config::BendPrepConfig;
pub use error::{BendError, BendField, CenterlineError, WireError};
pub use geometry::{stl_to_svg, CenterlineOptions};
pub use io::{export_svg_file, import_svg_file};
pub use wire::{PathCollection, Segment, WirePath};

use anyhow::Result;

/// Total wire length of every path in an SVG file
pub fn wire_length_file(path: &str, curve_steps: usize) -> Result<f64> {
    let paths = import_svg_file(path)?;
    Ok(paths.iter().map(|p| p.length(curve_steps)).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_bend() {
        let result = compute_bend_allowance(&BendSpec::new(2.0, 90.0, 3.0, 0.44));
        assert!(result.is_ok());
    }
}
