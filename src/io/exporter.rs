// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SVG file exporter

use crate::wire::WirePath;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Write wire paths to an SVG file
pub fn export_svg_file(paths: &[WirePath], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let document = super::export_svg_string(paths)?;
    fs::write(path, document)
        .with_context(|| format!("Failed to write SVG file: {}", path.display()))?;

    info!(file = %path.display(), paths = paths.len(), "exported wire paths");
    Ok(())
}
