// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Stable definitions shared between `report-converter` and programs that invoke it.
//!
//! This crate documents the process exit codes of the converter and the names of the output
//! formats it understands. It is kept small so that wrappers can depend on it without pulling in
//! the parsing engine.

mod errors;
mod exit_codes;
mod output_format;

pub use errors::*;
pub use exit_codes::*;
pub use output_format::*;
