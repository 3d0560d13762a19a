// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Parser, error::ErrorKind};
use color_eyre::Result;
use report_converter::ReportConverterApp;
use report_converter_metadata::ConverterExitCode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    let opts = match ReportConverterApp::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ConverterExitCode::OK,
                ErrorKind::MissingRequiredArgument => ConverterExitCode::MISSING_ARGUMENT,
                _ => ConverterExitCode::INVALID_ARGUMENT,
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    let output = opts.init_output();

    match opts.exec() {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
