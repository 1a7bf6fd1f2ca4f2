// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for BendPrep

pub mod prompt;
pub mod reporter;

pub use prompt::Prompter;
pub use reporter::Reporter;
