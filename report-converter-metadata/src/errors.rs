// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::OutputFormat;
use std::{error, fmt};

/// An error that occurs while parsing an [`OutputFormat`] from a string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputFormatParseError {
    input: String,
}

impl OutputFormatParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let known: Vec<_> = OutputFormat::variants().collect();
        write!(
            f,
            "unrecognized output format: {} (known formats: {})",
            self.input,
            known.join(", ")
        )
    }
}

impl error::Error for OutputFormatParseError {}
