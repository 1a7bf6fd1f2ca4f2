// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bend module - allowance, deduction and flat pattern length

mod calculator;
mod flat;
mod spec;

pub use calculator::{compute_bend_allowance, BendCalculator};
pub use flat::{Feature, FlatLength, FlatPattern};
pub use spec::{BendResult, BendSpec};
