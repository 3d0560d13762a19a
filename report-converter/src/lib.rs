// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converts GUI, API and business process test reports into CI result formats.
//!
//! The conversion engine lives in `report-converter-core`. This crate provides the command-line
//! front end: argument parsing, logging and the mapping of failures to exit codes documented in
//! `report-converter-metadata`.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{Color, LOG_ENV, OutputContext, StderrStyles};
