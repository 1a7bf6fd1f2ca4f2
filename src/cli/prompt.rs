// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interactive prompts for values missing from the command line

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Line-based prompter over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask for a number, re-asking until the answer parses.
    ///
    /// An empty answer takes `default` when there is one. End of input is an
    /// error.
    pub fn number(&mut self, label: &str, default: Option<f64>) -> Result<f64> {
        loop {
            match default {
                Some(value) => write!(self.output, "{} [{}]: ", label, value)?,
                None => write!(self.output, "{}: ", label)?,
            }
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read from stdin")?;
            if read == 0 {
                bail!("No value given for {}", label);
            }

            let answer = line.trim();
            if answer.is_empty() {
                if let Some(value) = default {
                    return Ok(value);
                }
                continue;
            }

            match answer.parse::<f64>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "  not a number: {}", answer)?,
            }
        }
    }

    /// Use `given` when present, otherwise prompt for it
    pub fn number_or(&mut self, given: Option<f64>, label: &str, default: Option<f64>) -> Result<f64> {
        match given {
            Some(value) => Ok(value),
            None => self.number(label, default),
        }
    }
}
