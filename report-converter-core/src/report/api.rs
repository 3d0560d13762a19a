// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    activity::IterationReport,
    collection::{ParseContext, ReportNodeCollection},
    factory::ApiNodeFactory,
    header::ReportHeader,
    missing_child, require_activities, require_root,
};
use crate::{
    errors::KindMismatch,
    raw::{RawDocument, RawNode, tags},
};

/// An API test report: `testrun → step → action → iteration → activity…`.
#[derive(Clone, Debug)]
pub struct ApiTestReport {
    header: ReportHeader,
    iterations: Vec<IterationReport>,
}

impl ApiTestReport {
    /// Builds an API test report from a raw document.
    pub fn parse(doc: &RawDocument) -> Result<Self, KindMismatch> {
        let cx = ParseContext::new(&ApiNodeFactory, doc.base_dir());
        let root = doc.root();
        require_root(&cx, root)?;

        let step = first_child(&cx, root, tags::STEP)?;
        let action = first_child(&cx, step, tags::ACTION)?;
        let iterations = ReportNodeCollection::<IterationReport>::collect(action, &cx)?.into_vec();
        if iterations.is_empty() {
            return Err(missing_child(&cx, tags::ITERATION, action));
        }

        let report = Self {
            header: ReportHeader::from_raw(root),
            iterations,
        };
        require_activities(&cx, report.activity_count())?;
        Ok(report)
    }

    /// Returns the header of the test run.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the iterations of the test.
    pub fn iterations(&self) -> &[IterationReport] {
        &self.iterations
    }

    /// Returns the number of activities in all iterations.
    pub fn activity_count(&self) -> usize {
        self.iterations
            .iter()
            .map(|iteration| iteration.all_activities().count())
            .sum()
    }
}

fn first_child<'a>(
    cx: &ParseContext<'_>,
    parent: &'a RawNode,
    tag: &'static str,
) -> Result<&'a RawNode, KindMismatch> {
    parent
        .first_child_of_type(tag)
        .ok_or_else(|| missing_child(cx, tag, parent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::MismatchReason,
        report::ReportKind,
        test_helpers::{api_test, node},
    };
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn second_activity_bounds_first() {
        let doc = api_test([node("iteration", "").start(0).duration(10.0).children([
            node("request", "A").start(0).duration(0.0),
            node("request", "B").start(5),
        ])])
        .parse();

        let report = ApiTestReport::parse(&doc).unwrap();
        let activities = report.iterations()[0].activities();
        assert_eq!(activities[0].header().duration(), Duration::from_secs(5));
        assert_eq!(activities[1].header().duration(), Duration::from_secs(5));
    }

    #[test]
    fn trailing_activity_never_negative() {
        // The iteration's recorded duration ends before its last activity starts.
        let doc = api_test([node("iteration", "").start(0).duration(2.0).children([
            node("request", "A").start(0),
            node("request", "B").start(3).duration(-1.0),
        ])])
        .parse();

        let report = ApiTestReport::parse(&doc).unwrap();
        let activities = report.iterations()[0].activities();
        assert_eq!(activities[0].header().duration(), Duration::from_secs(3));
        assert_eq!(activities[1].header().duration(), Duration::ZERO);
    }

    #[test]
    fn irrelevant_nodes_are_skipped() {
        let doc = api_test([
            node("iteration", "first").children([
                node("testrun", "marker"),
                node("request", "A"),
            ]),
            node("testrun", "marker"),
            node("iteration", "second"),
        ])
        .parse();

        let report = ApiTestReport::parse(&doc).unwrap();
        let names: Vec<_> = report
            .iterations()
            .iter()
            .map(|iteration| iteration.header().name())
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        let activities = report.iterations()[0].activities();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].header().name(), "A");
    }

    #[test]
    fn missing_links_are_rejected() {
        let doc = node("testrun", "T")
            .child(node("step", "Flow").child(node("iteration", "")))
            .parse();
        let err = ApiTestReport::parse(&doc).unwrap_err();
        assert_eq!(err.kind(), ReportKind::Api);
        assert_eq!(
            err.reason(),
            &MismatchReason::MissingNode {
                expected: tags::ACTION,
                parent: "step".to_owned(),
                parent_name: "Flow".to_owned(),
            }
        );

        let doc = api_test([node("request", "no iterations")]).parse();
        let err = ApiTestReport::parse(&doc).unwrap_err();
        assert_eq!(
            err.reason(),
            &MismatchReason::MissingNode {
                expected: tags::ITERATION,
                parent: "action".to_owned(),
                parent_name: "Action".to_owned(),
            }
        );
    }

    #[test]
    fn no_activities() {
        let doc = api_test([node("iteration", "").start(0).duration(5.0)]).parse();
        let err = ApiTestReport::parse(&doc).unwrap_err();
        assert_eq!(
            err.reason(),
            &MismatchReason::NoQualifyingNodes {
                expected: "activity"
            }
        );
    }
}
