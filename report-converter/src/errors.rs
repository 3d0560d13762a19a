// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use owo_colors::OwoColorize;
use report_converter_core::errors::*;
use report_converter_metadata::{ConverterExitCode, OutputFormatParseError};
use std::error::Error;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// The #[error()] strings are short placeholders: errors are meant to be printed with
// display_to_stderr, which adds context and colors.

/// An expected failure of report-converter, with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("config parse error")]
    ConfigParseError {
        #[from]
        err: ConfigParseError,
    },
    #[error("unknown output format")]
    UnknownOutputFormat {
        #[from]
        err: OutputFormatParseError,
    },
    #[error("multiple inputs without --aggregate")]
    MultipleInputs { count: usize },
    #[error("input not found")]
    InputNotFound {
        #[from]
        err: InputNotFound,
    },
    #[error("aggregation conflict")]
    AggregationConflict {
        #[from]
        err: AggregationConflict,
    },
    #[error("error reading report")]
    ReadReportError {
        #[from]
        err: ReadReportError,
    },
    #[error("error converting reports")]
    ConvertError {
        #[from]
        err: ConvertError,
    },
    #[error("error writing report")]
    WriteReportError {
        #[from]
        err: WriteReportError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::ConfigParseError { .. } => ConverterExitCode::GENERAL_ERROR,
            Self::UnknownOutputFormat { .. } => ConverterExitCode::UNKNOWN_OUTPUT_FORMAT,
            Self::MultipleInputs { .. } | Self::AggregationConflict { .. } => {
                ConverterExitCode::INVALID_ARGUMENT
            }
            Self::InputNotFound { .. } => ConverterExitCode::FILE_NOT_FOUND,
            Self::ReadReportError { err } => match err {
                ReadReportError::NoValidKind { .. } => ConverterExitCode::INVALID_INPUT,
                _ => ConverterExitCode::CANNOT_READ_FILE,
            },
            Self::ConvertError { .. } => ConverterExitCode::GENERAL_ERROR,
            Self::WriteReportError { .. } => ConverterExitCode::CANNOT_WRITE_FILE,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::ConfigParseError { err } => {
                error!(
                    "failed to parse config at `{}`",
                    err.config_file().style(styles.bold)
                );
                err.source()
            }
            Self::UnknownOutputFormat { err } => {
                error!("{err}");
                None
            }
            Self::MultipleInputs { count } => {
                error!(
                    "{count} inputs were passed in, but only one can be converted without {}",
                    "--aggregate".style(styles.bold)
                );
                None
            }
            Self::InputNotFound { err } => {
                error!("{err}");
                None
            }
            Self::AggregationConflict { err } => {
                error!("cannot write output: {err}");
                None
            }
            Self::ReadReportError { err } => match err {
                ReadReportError::NoValidKind { path, mismatches } => {
                    error!(
                        "`{}` is not a GUI, API or business process test report",
                        path.style(styles.bold)
                    );
                    for mismatch in mismatches {
                        error!(
                            target: NO_HEADING_TARGET,
                            "  - {}",
                            mismatch.style(styles.warning_text)
                        );
                    }
                    None
                }
                other => {
                    error!("{other}");
                    other.source()
                }
            },
            Self::ConvertError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteReportError { err } => {
                error!(
                    "failed to write report to `{}`",
                    err.path().style(styles.bold)
                );
                err.source()
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
