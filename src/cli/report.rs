//! Reporting of malformed lines during a decode pass.

use crate::config::ErrorPolicy;
use crate::MarshalError;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

/// Whether decoding continues after a reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Writes `<line>: <label>: <detail>` diagnostics and applies the error policy.
#[derive(Debug)]
pub struct ErrorReporter {
    policy: ErrorPolicy,
    color: bool,
    reported: usize,
}

impl ErrorReporter {
    pub fn new(policy: ErrorPolicy, color: bool) -> Self {
        Self {
            policy,
            color,
            reported: 0,
        }
    }

    pub fn report<W: Write>(&mut self, out: &mut W, line_no: usize, error: &MarshalError) -> io::Result<Flow> {
        self.reported += 1;
        debug!(line = line_no, kind = error.label(), "{}", error.detail());

        let label = if self.color {
            error.label().red().bold().to_string()
        } else {
            error.label().to_string()
        };
        writeln!(out, "{}: {}: {}", line_no, label, error.detail())?;

        Ok(match self.policy {
            ErrorPolicy::Skip => Flow::Continue,
            ErrorPolicy::Abort => Flow::Stop,
        })
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}
