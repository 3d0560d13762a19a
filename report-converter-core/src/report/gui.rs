// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    activity::IterationReport,
    collection::{ParseContext, ReportNodeCollection, TypedNode},
    factory::{GuiNodeFactory, NodeRole},
    header::ReportHeader,
    missing_child, require_activities, require_root,
};
use crate::{
    errors::{KindMismatch, MismatchReason},
    raw::{RawDocument, RawNode, tags},
};

/// A GUI test report: `testrun → iteration → action → iteration → step…`.
#[derive(Clone, Debug)]
pub struct GuiTestReport {
    header: ReportHeader,
    iterations: Vec<GuiIterationReport>,
}

impl GuiTestReport {
    /// Builds a GUI test report from a raw document.
    pub fn parse(doc: &RawDocument) -> Result<Self, KindMismatch> {
        let cx = ParseContext::new(&GuiNodeFactory, doc.base_dir());
        let root = doc.root();
        require_root(&cx, root)?;

        let iterations =
            ReportNodeCollection::<GuiIterationReport>::collect(root, &cx)?.into_vec();
        if iterations.is_empty() {
            return Err(missing_child(&cx, tags::ITERATION, root));
        }
        if iterations.iter().all(|iteration| iteration.actions.is_empty()) {
            return Err(KindMismatch::new(
                cx.kind(),
                MismatchReason::NoQualifyingNodes {
                    expected: tags::ACTION,
                },
            ));
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

    /// Returns the iterations of the whole test.
    pub fn iterations(&self) -> &[GuiIterationReport] {
        &self.iterations
    }

    /// Returns the number of steps in all action iterations.
    pub fn activity_count(&self) -> usize {
        self.iterations
            .iter()
            .flat_map(|iteration| iteration.actions())
            .flat_map(|action| action.iterations())
            .map(|iteration| iteration.all_activities().count())
            .sum()
    }
}

/// One iteration of a whole GUI test.
#[derive(Clone, Debug)]
pub struct GuiIterationReport {
    header: ReportHeader,
    actions: Vec<ActionReport>,
}

impl GuiIterationReport {
    /// Returns the header of this iteration.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the actions run in this iteration.
    pub fn actions(&self) -> &[ActionReport] {
        &self.actions
    }
}

impl TypedNode for GuiIterationReport {
    fn accepts(role: NodeRole) -> bool {
        role == NodeRole::TestIteration
    }

    fn parse(raw: &RawNode, _role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        Ok(Self {
            header: ReportHeader::from_raw(raw),
            actions: ReportNodeCollection::<ActionReport>::collect(raw, cx)?.into_vec(),
        })
    }
}

/// A GUI test action and its iterations.
#[derive(Clone, Debug)]
pub struct ActionReport {
    header: ReportHeader,
    iterations: Vec<IterationReport>,
}

impl ActionReport {
    /// Returns the header of this action.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the iterations of this action.
    pub fn iterations(&self) -> &[IterationReport] {
        &self.iterations
    }
}

impl TypedNode for ActionReport {
    fn accepts(role: NodeRole) -> bool {
        role == NodeRole::Action
    }

    fn parse(raw: &RawNode, _role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let iterations = ReportNodeCollection::<IterationReport>::collect(raw, cx)?.into_vec();
        if iterations.is_empty() {
            return Err(missing_child(cx, tags::ITERATION, raw));
        }
        Ok(Self {
            header: ReportHeader::from_raw(raw),
            iterations,
        })
    }
}
