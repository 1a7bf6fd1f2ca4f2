// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - bounds, splines and mesh centerlines

mod bbox;
pub mod centerline;
pub mod spline;

pub use bbox::{BoundingBox, BoundingRect};
pub use centerline::{
    extract_centerline, fit_centerline, stl_to_svg, Centerline, CenterlineOptions,
    CenterlineSummary,
};
pub use spline::{fit_spline, CubicBezier};
