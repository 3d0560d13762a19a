// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `report-converter` failures.
///
/// A conversion may fail for a variety of reasons. This structure documents the exit codes that
/// may occur in case of expected failures.
///
/// Unknown/unexpected failures will always result in exit code 1.
pub enum ConverterExitCode {}

impl ConverterExitCode {
    /// No errors occurred and the output was written.
    pub const OK: i32 = 0;

    /// A general error occurred.
    pub const GENERAL_ERROR: i32 = 1;

    /// A required command-line argument was not provided.
    pub const MISSING_ARGUMENT: i32 = 2;

    /// A command-line argument was provided but is not valid.
    ///
    /// This also covers aggregation destinations that collide with a source report or name an
    /// existing directory.
    pub const INVALID_ARGUMENT: i32 = 3;

    /// An input report exists but could not be read or is not well-formed XML.
    pub const CANNOT_READ_FILE: i32 = 4;

    /// The output report could not be written.
    pub const CANNOT_WRITE_FILE: i32 = 5;

    /// No input report was found at the given path.
    pub const FILE_NOT_FOUND: i32 = 6;

    /// An input report was read, but it is not a GUI, API or business process test report.
    pub const INVALID_INPUT: i32 = 7;

    /// The requested output format is not known.
    pub const UNKNOWN_OUTPUT_FORMAT: i32 = 20;
}
