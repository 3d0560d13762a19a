// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::ReportConverter;
use crate::{errors::ConvertError, reader::LoadedReport};
use report_converter_metadata::OutputFormat;

/// Converts reports to NUnit 3 XML.
///
/// NUnit 3 output is not implemented yet: rendering always fails with
/// [`ConvertError::FormatNotSupported`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Nunit3Converter;

impl Nunit3Converter {
    /// Creates a new `Nunit3Converter`.
    pub fn new() -> Self {
        Self
    }
}

impl ReportConverter for Nunit3Converter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Nunit3
    }

    fn render(&self, _reports: &[LoadedReport]) -> Result<Vec<u8>, ConvertError> {
        Err(ConvertError::FormatNotSupported {
            format: OutputFormat::Nunit3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_not_supported() {
        let err = Nunit3Converter::new().render(&[]).unwrap_err();
        assert!(
            matches!(
                err,
                ConvertError::FormatNotSupported {
                    format: OutputFormat::Nunit3
                }
            ),
            "{err:?}"
        );
        assert_eq!(err.to_string(), "conversion to nunit3 is not supported yet");
    }
}
