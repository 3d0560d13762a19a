// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Converting typed reports into output formats.

mod aggregate;
mod junit;
mod nunit3;

pub use aggregate::AggregationPlan;
pub use junit::JunitConverter;
pub use nunit3::Nunit3Converter;

use crate::{
    config::ConverterConfig,
    errors::{ConvertError, WriteReportError},
    reader::LoadedReport,
};
use camino::Utf8Path;
use report_converter_metadata::OutputFormat;
use std::fmt;

/// Renders reports into an output format.
pub trait ReportConverter: fmt::Debug {
    /// The format this converter produces.
    fn format(&self) -> OutputFormat;

    /// Renders `reports` into a single output document.
    ///
    /// Top-level results appear in the order of `reports`, and within each report, in document
    /// order.
    fn render(&self, reports: &[LoadedReport]) -> Result<Vec<u8>, ConvertError>;
}

/// Returns the converter for `format`.
pub fn converter_for(
    format: OutputFormat,
    config: &ConverterConfig,
) -> Result<Box<dyn ReportConverter + '_>, ConvertError> {
    match format {
        OutputFormat::Junit => Ok(Box::new(JunitConverter::new(config.junit()))),
        OutputFormat::Nunit3 => Ok(Box::new(Nunit3Converter::new())),
        other => Err(ConvertError::FormatNotSupported { format: other }),
    }
}

/// Writes a rendered document to `destination`, creating parent directories as needed.
pub fn write_output(destination: &Utf8Path, contents: &[u8]) -> Result<(), WriteReportError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|err| WriteReportError::new(parent, err))?;
        }
    }
    std::fs::write(destination, contents).map_err(|err| WriteReportError::new(destination, err))
}
