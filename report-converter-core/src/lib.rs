// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `report-converter`.
//!
//! The basic flow of operations is:
//!
//! 1. [`input::resolve_input`] turns a user-supplied path into a report file.
//! 2. [`raw::RawDocument::load`] reads the self-describing node tree from that file.
//! 3. [`reader::ReportReader`] tries each [`report::ReportKind`] in turn, producing a typed
//!    [`report::TestReport`] with reconciled durations.
//! 4. A [`convert::ReportConverter`] renders one or more reports into an output format.

pub mod config;
pub mod convert;
pub mod errors;
pub mod input;
pub mod raw;
pub mod reader;
pub mod report;
#[cfg(test)]
mod test_helpers;
