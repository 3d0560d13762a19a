// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by report-converter.

use crate::report::ReportKind;
use camino::{Utf8Path, Utf8PathBuf};
use config::ConfigError;
use report_converter_metadata::OutputFormat;
use std::{error::Error, fmt};
use thiserror::Error;

/// An error that occurred while parsing the config.
#[derive(Debug, Error)]
#[error("failed to parse report-converter config at `{config_file}`")]
#[non_exhaustive]
pub struct ConfigParseError {
    config_file: Utf8PathBuf,
    #[source]
    err: ConfigError,
}

impl ConfigParseError {
    pub(crate) fn new(config_file: impl Into<Utf8PathBuf>, err: ConfigError) -> Self {
        Self {
            config_file: config_file.into(),
            err,
        }
    }

    /// Returns the config file that failed to parse.
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }
}

/// No report file exists at, or inside, the given input path.
#[derive(Clone, Debug)]
pub struct InputNotFound {
    path: Utf8PathBuf,
    probed: Vec<Utf8PathBuf>,
}

impl fmt::Display for InputNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no report found at `{}`", self.path)?;
        if !self.probed.is_empty() {
            let probed: Vec<_> = self.probed.iter().map(|p| p.as_str()).collect();
            write!(f, " (looked for {})", probed.join(", "))?;
        }
        Ok(())
    }
}

impl Error for InputNotFound {}

impl InputNotFound {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, probed: Vec<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            probed,
        }
    }

    /// Returns the path that was passed in.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the candidate report files that were checked, in order.
    pub fn probed(&self) -> &[Utf8PathBuf] {
        &self.probed
    }
}

/// A report document could not be loaded.
///
/// Returned by [`RawDocument::load`](crate::raw::RawDocument::load).
#[derive(Debug, Error)]
#[error("failed to read report at `{path}`")]
pub struct LoadError {
    path: Utf8PathBuf,
    #[source]
    kind: LoadErrorKind,
}

impl LoadError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, kind: LoadErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns the path of the report that failed to load.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the reason the report failed to load.
    pub fn kind(&self) -> &LoadErrorKind {
        &self.kind
    }
}

/// The reason a [`LoadError`] occurred.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// The file could not be read.
    #[error("error reading file")]
    Io(#[source] std::io::Error),

    /// The file is not well-formed XML, or does not have a `<Results>` root holding a top-level
    /// `<ReportNode>`.
    #[error("error parsing report XML")]
    Xml(#[source] quick_xml::de::DeError),
}

/// A document does not have the structure of one particular report kind.
///
/// This is expected while detecting the kind of a report: the reader moves on to the next kind.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} report check failed: {reason}")]
pub struct KindMismatch {
    kind: ReportKind,
    reason: MismatchReason,
}

impl KindMismatch {
    pub(crate) fn new(kind: ReportKind, reason: MismatchReason) -> Self {
        Self { kind, reason }
    }

    /// Returns the kind that was being checked.
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Returns the reason the check failed.
    pub fn reason(&self) -> &MismatchReason {
        &self.reason
    }
}

/// The reason a [`KindMismatch`] occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum MismatchReason {
    /// The top-level node has the wrong type.
    UnexpectedRoot {
        /// The expected node type.
        expected: &'static str,
        /// The node type that was found.
        found: String,
    },

    /// A node of the expected type was not found under its parent.
    MissingNode {
        /// The node type that was expected.
        expected: &'static str,
        /// The type of the parent node.
        parent: String,
        /// The name of the parent node.
        parent_name: String,
    },

    /// The expected path was present, but none of the nodes this kind is built from were found.
    NoQualifyingNodes {
        /// The node type that was expected somewhere in the report.
        expected: &'static str,
    },
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedRoot { expected, found } => {
                write!(f, "top-level node is `{found}`, expected `{expected}`")
            }
            Self::MissingNode {
                expected,
                parent,
                parent_name,
            } => {
                write!(
                    f,
                    "`{parent}` node `{parent_name}` has no `{expected}` child"
                )
            }
            Self::NoQualifyingNodes { expected } => {
                write!(f, "no `{expected}` nodes found")
            }
        }
    }
}

/// An error that occurred while reading a report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadReportError {
    /// The report document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The report loaded, but does not match any known report kind.
    #[error("report at `{path}` is not a GUI, API or business process test report")]
    NoValidKind {
        /// The path to the report.
        path: Utf8PathBuf,
        /// Why each kind was rejected, in detection order.
        mismatches: Vec<KindMismatch>,
    },
}

/// Extension data referenced by an activity could not be used.
///
/// This error is never fatal: the activity is kept without extension data.
#[derive(Debug, Error)]
#[error("extension data at `{path}` is unavailable")]
pub struct ExtensionDataError {
    path: Utf8PathBuf,
    #[source]
    kind: ExtensionDataErrorKind,
}

impl ExtensionDataError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, kind: ExtensionDataErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns the path to the extension file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the reason the data is unavailable.
    pub fn kind(&self) -> &ExtensionDataErrorKind {
        &self.kind
    }

    /// Returns true if the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            &self.kind,
            ExtensionDataErrorKind::Io(err) if err.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// The reason an [`ExtensionDataError`] occurred.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtensionDataErrorKind {
    /// The file could not be read.
    #[error("error reading file")]
    Io(#[source] std::io::Error),

    /// The file is not well-formed XML.
    #[error("error parsing XML")]
    Xml(#[source] quick_xml::Error),

    /// The file has no root element, or has text outside of it.
    #[error("file does not contain an XML document")]
    NotXml,
}

/// The output path of a conversion cannot be used.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum AggregationConflict {
    /// The destination is also one of the source reports.
    #[error("destination `{destination}` is also a source report")]
    DestinationIsSource {
        /// The destination path.
        destination: Utf8PathBuf,
    },

    /// The destination is an existing directory.
    #[error("destination `{destination}` is an existing directory")]
    DestinationIsDirectory {
        /// The destination path.
        destination: Utf8PathBuf,
    },
}

/// An error that occurred while converting reports to an output format.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The output format is known, but conversion to it is not supported.
    #[error("conversion to {format} is not supported yet")]
    FormatNotSupported {
        /// The requested format.
        format: OutputFormat,
    },

    /// The output document could not be serialized.
    #[error("error serializing {format} report")]
    Serialize {
        /// The format being serialized.
        format: OutputFormat,
        /// The underlying error.
        #[source]
        err: quick_junit::SerializeError,
    },
}

/// The converted report could not be written out.
#[derive(Debug, Error)]
#[error("failed to write report to `{path}`")]
pub struct WriteReportError {
    path: Utf8PathBuf,
    #[source]
    err: std::io::Error,
}

impl WriteReportError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path that could not be written.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Displays an error along with the chain of errors that caused it, on a single line.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        let mut source = self.error.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_chain_includes_sources() {
        let err = WriteReportError::new(
            "out/report.xml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        );
        assert_eq!(
            DisplayErrorChain::new(&err).to_string(),
            "failed to write report to `out/report.xml`: access denied"
        );
    }

    #[test]
    fn mismatch_reason_display() {
        let mismatch = KindMismatch::new(
            ReportKind::Api,
            MismatchReason::MissingNode {
                expected: "action",
                parent: "step".to_owned(),
                parent_name: "Flow".to_owned(),
            },
        );
        assert_eq!(
            mismatch.to_string(),
            "API test report check failed: `step` node `Flow` has no `action` child"
        );
    }
}
