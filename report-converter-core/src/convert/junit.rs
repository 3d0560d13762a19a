// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JUnit XML output.

use super::ReportConverter;
use crate::{
    config::JunitConfig,
    errors::ConvertError,
    reader::LoadedReport,
    report::{ReportStatus, ResultView},
};
use quick_junit::{NonSuccessKind, Report, TestCase, TestCaseStatus, TestSuite};
use report_converter_metadata::OutputFormat;
use std::fmt::Write as _;
use tracing::debug;

/// Converts reports to JUnit XML.
///
/// Each top-level result of each report becomes a test suite, and the leaves beneath it become
/// test cases.
#[derive(Clone, Debug)]
pub struct JunitConverter<'cfg> {
    config: &'cfg JunitConfig,
}

impl<'cfg> JunitConverter<'cfg> {
    /// Creates a new `JunitConverter`.
    pub fn new(config: &'cfg JunitConfig) -> Self {
        Self { config }
    }

    /// Builds the JUnit report model for `reports`.
    pub fn to_junit(&self, reports: &[LoadedReport]) -> Report {
        let mut junit = Report::new(self.config.report_name());
        for loaded in reports {
            let report = loaded.report();
            let test_name = report.header().display_name();
            for result in report.top_level_results() {
                let suite = self.test_suite(&test_name, result, loaded);
                debug!(
                    "junit: suite `{}` with {} test cases",
                    suite.name.as_str(),
                    suite.test_cases.len(),
                );
                junit.add_test_suite(suite);
            }
        }
        junit
    }

    fn test_suite(
        &self,
        test_name: &str,
        result: &dyn ResultView,
        loaded: &LoadedReport,
    ) -> TestSuite {
        let mut suite = TestSuite::new(format!("{test_name} - {}", result.name()));
        suite
            .add_property(("kind", loaded.report().kind().as_str()))
            .add_property(("source", loaded.source().as_str()));
        if let Some(start_time) = result.start_time() {
            suite.set_timestamp(start_time);
        }
        suite.set_time(result.duration());

        let mut leaves = Vec::new();
        let mut path = Vec::new();
        let sub_results = result.sub_results();
        if sub_results.is_empty() {
            leaves.push((result.name(), result));
        }
        for sub_result in sub_results {
            collect_leaves(
                sub_result,
                &mut path,
                &mut leaves,
                self.config.testcase_separator(),
            );
        }

        let classname = suite.name.clone();
        for (name, leaf) in leaves {
            let mut test_case = TestCase::new(name, self.test_case_status(leaf));
            test_case
                .set_classname(classname.clone())
                .set_time(leaf.duration());
            if let Some(start_time) = leaf.start_time() {
                test_case.set_timestamp(start_time);
            }
            if self.config.store_extension_data() {
                if let Some(system_out) = extension_output(leaf) {
                    test_case.set_system_out(system_out);
                }
            }
            suite.add_test_case(test_case);
        }
        suite
    }

    fn test_case_status(&self, leaf: &dyn ResultView) -> TestCaseStatus {
        let kind = match leaf.status() {
            ReportStatus::Failed => NonSuccessKind::Failure,
            ReportStatus::Error => NonSuccessKind::Error,
            ReportStatus::Skipped => return TestCaseStatus::skipped(),
            _ => return TestCaseStatus::success(),
        };

        let mut status = TestCaseStatus::non_success(kind);
        match leaf.error_text() {
            Some(error_text) => {
                status
                    .set_message(error_text.lines().next().unwrap_or(error_text))
                    .set_description(error_text);
            }
            None => {
                status.set_message(format!("{} failed", leaf.name()));
            }
        }
        status
    }
}

impl ReportConverter for JunitConverter<'_> {
    fn format(&self) -> OutputFormat {
        OutputFormat::Junit
    }

    fn render(&self, reports: &[LoadedReport]) -> Result<Vec<u8>, ConvertError> {
        let mut buf = Vec::new();
        self.to_junit(reports)
            .serialize(&mut buf)
            .map_err(|err| ConvertError::Serialize {
                format: OutputFormat::Junit,
                err,
            })?;
        Ok(buf)
    }
}

/// Collects the leaves below `result` in pre-order, each named by its path joined with
/// `separator`.
fn collect_leaves<'a>(
    result: &'a dyn ResultView,
    path: &mut Vec<String>,
    leaves: &mut Vec<(String, &'a dyn ResultView)>,
    separator: &str,
) {
    path.push(result.name());
    let sub_results = result.sub_results();
    if sub_results.is_empty() {
        leaves.push((path.join(separator), result));
    }
    for sub_result in sub_results {
        collect_leaves(sub_result, path, leaves, separator);
    }
    path.pop();
}

fn extension_output(leaf: &dyn ResultView) -> Option<String> {
    let extension = leaf.extension()?;
    if extension.properties().is_empty() {
        return None;
    }
    let mut out = String::new();
    for property in extension.properties() {
        // Writing to a String never fails.
        let _ = writeln!(out, "{}: {}", property.name, property.value);
    }
    Some(out)
}
