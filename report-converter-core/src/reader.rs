// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading report files and detecting their kind.

use crate::{
    errors::{KindMismatch, ReadReportError},
    raw::RawDocument,
    report::{ReportKind, TestReport},
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// A report read from disk.
#[derive(Clone, Debug)]
pub struct LoadedReport {
    source: Utf8PathBuf,
    report: TestReport,
}

impl LoadedReport {
    /// Creates a new `LoadedReport`.
    pub fn new(source: impl Into<Utf8PathBuf>, report: TestReport) -> Self {
        Self {
            source: source.into(),
            report,
        }
    }

    /// Returns the file the report was read from.
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    /// Returns the typed report.
    pub fn report(&self) -> &TestReport {
        &self.report
    }
}

/// Reads report files, trying each [`ReportKind`] in detection order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReportReader;

impl ReportReader {
    /// Creates a new `ReportReader`.
    pub fn new() -> Self {
        Self
    }

    /// Reads the report at `path`.
    pub fn read(&self, path: &Utf8Path) -> Result<LoadedReport, ReadReportError> {
        let doc = RawDocument::load(path)?;
        let report = self
            .detect(&doc)
            .map_err(|mismatches| ReadReportError::NoValidKind {
                path: path.to_path_buf(),
                mismatches,
            })?;
        debug!(
            "read {} report `{}` from `{path}` ({} activities)",
            report.kind(),
            report.header().display_name(),
            report.activity_count(),
        );
        Ok(LoadedReport::new(path, report))
    }

    /// Builds a typed report from `doc` using the first kind that accepts it.
    ///
    /// Returns every rejection, in detection order, if no kind accepts the document.
    pub fn detect(&self, doc: &RawDocument) -> Result<TestReport, Vec<KindMismatch>> {
        let mut mismatches = Vec::new();
        for kind in ReportKind::DETECTION_ORDER {
            match kind.try_parse(doc) {
                Ok(report) => return Ok(report),
                Err(mismatch) => {
                    debug!("{mismatch}");
                    mismatches.push(mismatch);
                }
            }
        }
        Err(mismatches)
    }
}
