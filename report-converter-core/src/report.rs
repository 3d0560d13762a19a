// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed report trees.
//!
//! A raw document is tried as each [`ReportKind`] in turn. Each kind has a
//! [`ReportNodeFactory`] deciding what raw nodes become, and its own typed tree. Durations are
//! reconciled while each container is built, so a successfully parsed tree is final.

mod activity;
mod api;
mod bpt;
mod collection;
mod extension;
mod factory;
mod gui;
mod header;
mod reconcile;
mod view;

pub use activity::*;
pub use api::*;
pub use bpt::*;
pub use extension::*;
pub use factory::*;
pub use gui::*;
pub use header::*;
pub use reconcile::ReconcileScope;
pub use view::*;

use crate::{
    errors::{KindMismatch, MismatchReason},
    raw::{RawDocument, RawNode, tags},
};
use collection::ParseContext;
use std::fmt;

/// The kinds of test report that can be read.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReportKind {
    /// A GUI test.
    Gui,
    /// An API test.
    Api,
    /// A business process test.
    Bpt,
}

impl ReportKind {
    /// The order in which kinds are tried. The first kind that accepts a document wins.
    pub const DETECTION_ORDER: [ReportKind; 3] = [Self::Gui, Self::Api, Self::Bpt];

    /// Returns a short identifier for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gui => "gui",
            Self::Api => "api",
            Self::Bpt => "bpt",
        }
    }

    /// Tries to build a typed report of this kind from `doc`.
    pub fn try_parse(self, doc: &RawDocument) -> Result<TestReport, KindMismatch> {
        match self {
            Self::Gui => GuiTestReport::parse(doc).map(TestReport::Gui),
            Self::Api => ApiTestReport::parse(doc).map(TestReport::Api),
            Self::Bpt => BptTestReport::parse(doc).map(TestReport::Bpt),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gui => write!(f, "GUI test"),
            Self::Api => write!(f, "API test"),
            Self::Bpt => write!(f, "business process test"),
        }
    }
}

/// A fully parsed and reconciled test report.
#[derive(Clone, Debug)]
pub enum TestReport {
    /// A GUI test report.
    Gui(GuiTestReport),
    /// An API test report.
    Api(ApiTestReport),
    /// A business process test report.
    Bpt(BptTestReport),
}

impl TestReport {
    /// Returns the kind of this report.
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Gui(_) => ReportKind::Gui,
            Self::Api(_) => ReportKind::Api,
            Self::Bpt(_) => ReportKind::Bpt,
        }
    }

    /// Returns the header of the test run.
    pub fn header(&self) -> &ReportHeader {
        match self {
            Self::Gui(report) => report.header(),
            Self::Api(report) => report.header(),
            Self::Bpt(report) => report.header(),
        }
    }

    /// Returns the top-level results of the report: the iterations of the whole test.
    pub fn top_level_results(&self) -> Vec<&dyn ResultView> {
        match self {
            Self::Gui(report) => report.sub_results(),
            Self::Api(report) => report.sub_results(),
            Self::Bpt(report) => report.sub_results(),
        }
    }

    /// Returns the number of activities anywhere in the report.
    pub fn activity_count(&self) -> usize {
        match self {
            Self::Gui(report) => report.activity_count(),
            Self::Api(report) => report.activity_count(),
            Self::Bpt(report) => report.activity_count(),
        }
    }
}

/// Rejects a document whose top-level node is not a test run.
fn require_root(cx: &ParseContext<'_>, root: &RawNode) -> Result<(), KindMismatch> {
    if root.node_type().is(tags::TESTRUN) {
        Ok(())
    } else {
        Err(KindMismatch::new(
            cx.kind(),
            MismatchReason::UnexpectedRoot {
                expected: tags::TESTRUN,
                found: root.node_type().to_string(),
            },
        ))
    }
}

/// Rejects a report that has the expected shape but holds no activities.
fn require_activities(cx: &ParseContext<'_>, activity_count: usize) -> Result<(), KindMismatch> {
    if activity_count > 0 {
        Ok(())
    } else {
        Err(KindMismatch::new(
            cx.kind(),
            MismatchReason::NoQualifyingNodes {
                expected: "activity",
            },
        ))
    }
}

fn missing_child(cx: &ParseContext<'_>, expected: &'static str, parent: &RawNode) -> KindMismatch {
    KindMismatch::new(
        cx.kind(),
        MismatchReason::MissingNode {
            expected,
            parent: parent.node_type().to_string(),
            parent_name: parent.display_name().to_owned(),
        },
    )
}
