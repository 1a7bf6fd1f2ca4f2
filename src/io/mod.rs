// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - path data parsing, SVG import/export and STL loading

mod exporter;
mod importer;
mod parser;
mod svg;

pub use exporter::export_svg_file;
pub use importer::{import_svg_file, load_stl, Facet};
pub use parser::{format_number, parse_path_data, PathCommand};
pub use svg::{
    export_centerline_svg, export_svg_string, import_svg_str, path_data, SVG_NAMESPACE,
};
