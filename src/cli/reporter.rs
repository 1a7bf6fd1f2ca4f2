// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::bend::{BendResult, BendSpec, FlatLength};
use crate::geometry::CenterlineSummary;
use crate::wire::WirePath;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a single bend calculation
    pub fn report_bend(spec: &BendSpec, result: &BendResult) {
        Self::rule();
        println!("{}", "Bend".bold());
        Self::rule();

        println!("\n{}", "Input:".bold());
        Self::print_value("Thickness", &Self::format_length(spec.thickness));
        Self::print_value("Angle", &Self::format_angle(spec.angle));
        Self::print_value("Inside radius", &Self::format_length(spec.inside_radius));
        Self::print_value("K-factor", &format!("{}", spec.k_factor));

        println!("\n{}", "Result:".bold());
        println!(
            "  {} {}",
            "Bend allowance:".bright_black(),
            Self::format_length(result.bend_allowance).green().bold()
        );
        Self::print_optional("Outside setback", result.outside_setback);
        Self::print_optional("Bend deduction", result.bend_deduction);

        Self::rule();
    }

    /// Report a flat pattern total
    pub fn report_flat(flat: &FlatLength) {
        Self::rule();
        println!("{}", "Flat pattern".bold());
        Self::rule();

        for (i, bend) in flat.bends.iter().enumerate() {
            println!(
                "  {} {}",
                format!("Bend {}:", i + 1).bright_black(),
                Self::format_length(bend.bend_allowance).cyan()
            );
        }
        Self::print_value("Legs", &Self::format_length(flat.legs_total));
        Self::print_value("Allowances", &Self::format_length(flat.allowance_total));
        println!(
            "  {} {}",
            "Flat length:".bright_black(),
            Self::format_length(flat.flat_length).green().bold()
        );

        Self::rule();
    }

    /// Report per-path and total lengths of a drawing
    pub fn report_lengths(file: &str, paths: &[WirePath], steps: usize) {
        Self::rule();
        println!("{} {}", "File:".bold(), file.cyan());
        Self::rule();

        let mut total = 0.0;
        for (i, path) in paths.iter().enumerate() {
            let length = path.length(steps);
            total += length;
            println!(
                "  {} {} {}",
                format!("Path {}:", i + 1).bright_black(),
                Self::format_length(length).cyan(),
                format!(
                    "({} segments, ⌀{})",
                    path.len(),
                    Self::format_length(path.wire_diameter)
                )
                .bright_black()
            );
        }
        println!(
            "  {} {}",
            "Total:".bright_black(),
            Self::format_length(total).green().bold()
        );

        Self::rule();
    }

    /// Report the feed and bend sequence of each path
    pub fn report_schedule(file: &str, paths: &[WirePath], steps: usize) {
        Self::rule();
        println!("{} {}", "File:".bold(), file.cyan());
        Self::rule();

        for (i, path) in paths.iter().enumerate() {
            println!("\n{}", format!("Path {}:", i + 1).bold());
            for step in path.bend_schedule(steps) {
                print!(
                    "  {} {}",
                    "Feed".bright_black(),
                    Self::format_length(step.feed).cyan()
                );
                match step.bend {
                    Some(angle) => println!(
                        "  {} {}",
                        "Bend".bright_black(),
                        Self::format_angle(angle).yellow()
                    ),
                    None => println!(),
                }
            }
        }

        Self::rule();
    }

    /// Report an STL to SVG conversion
    pub fn report_centerline(
        input: &str,
        output: &str,
        summary: &CenterlineSummary,
        duration: Duration,
    ) {
        Self::rule();
        println!("{} {} → {}", "Centerline:".bold(), input.cyan(), output.cyan());
        Self::rule();
        Self::print_value("Points", &summary.point_count.to_string());
        Self::print_value("Curves", &summary.bezier_count.to_string());
        Self::print_value("Wire diameter", &Self::format_length(summary.wire_diameter));
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        Self::rule();
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn rule() {
        println!("{}", "━".repeat(60).bright_black());
    }

    fn print_value(name: &str, value: &str) {
        println!("  {} {}", format!("{}:", name).bright_black(), value.cyan());
    }

    fn print_optional(name: &str, value: Option<f64>) {
        match value {
            Some(v) => Self::print_value(name, &Self::format_length(v)),
            None => println!(
                "  {} {}",
                format!("{}:", name).bright_black(),
                "n/a (180° bend)".bright_black()
            ),
        }
    }

    /// Format a length to four decimals
    pub fn format_length(value: f64) -> String {
        format!("{:.4}", value)
    }

    /// Format an angle in degrees, signed when negative
    pub fn format_angle(degrees: f64) -> String {
        format!("{:.2}°", degrees)
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
