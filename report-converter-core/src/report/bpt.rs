// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    activity::{Activities, ActivityReport},
    collection::{ParseContext, ReportNodeCollection, TypedNode},
    factory::{BptNodeFactory, NodeRole},
    header::ReportHeader,
    missing_child,
    reconcile::ReconcileContext,
    require_activities, require_root,
};
use crate::{
    errors::{KindMismatch, MismatchReason},
    raw::{RawDocument, RawNode, tags},
};

/// A business process test report:
/// `testrun → iteration → (group | flow | branch)* → businesscomponent → step…`.
#[derive(Clone, Debug)]
pub struct BptTestReport {
    header: ReportHeader,
    iterations: Vec<BptIterationReport>,
}

impl BptTestReport {
    /// Builds a business process test report from a raw document.
    pub fn parse(doc: &RawDocument) -> Result<Self, KindMismatch> {
        let cx = ParseContext::new(&BptNodeFactory, doc.base_dir());
        let root = doc.root();
        require_root(&cx, root)?;

        let iterations =
            ReportNodeCollection::<BptIterationReport>::collect(root, &cx)?.into_vec();
        if iterations.is_empty() {
            return Err(missing_child(&cx, tags::ITERATION, root));
        }
        if iterations
            .iter()
            .all(|iteration| iteration.children.is_empty())
        {
            return Err(KindMismatch::new(
                cx.kind(),
                MismatchReason::NoQualifyingNodes {
                    expected: tags::BUSINESS_COMPONENT,
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

    /// Returns the iterations of the whole business process.
    pub fn iterations(&self) -> &[BptIterationReport] {
        &self.iterations
    }

    /// Returns the number of business component steps in all iterations.
    pub fn activity_count(&self) -> usize {
        self.iterations
            .iter()
            .flat_map(|iteration| iteration.children())
            .map(BptNode::activity_count)
            .sum()
    }
}

/// One iteration of a whole business process test.
#[derive(Clone, Debug)]
pub struct BptIterationReport {
    header: ReportHeader,
    children: Vec<BptNode>,
}

impl BptIterationReport {
    /// Returns the header of this iteration.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the top-level flow elements of this iteration.
    pub fn children(&self) -> &[BptNode] {
        &self.children
    }
}

impl TypedNode for BptIterationReport {
    fn accepts(role: NodeRole) -> bool {
        role == NodeRole::TestIteration
    }

    fn parse(raw: &RawNode, _role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        Ok(Self {
            header: ReportHeader::from_raw(raw),
            children: ReportNodeCollection::<BptNode>::collect(raw, cx)?.into_vec(),
        })
    }
}

/// An element of a business process: a container or a business component.
#[derive(Clone, Debug)]
pub enum BptNode {
    /// A group of flow elements.
    Group(BptContainerReport),
    /// A flow, itself made of flow elements.
    Flow(BptContainerReport),
    /// A conditional branch.
    Branch(BptContainerReport),
    /// A business component holding steps.
    BusinessComponent(BusinessComponentReport),
}

impl BptNode {
    /// Returns the header of this element.
    pub fn header(&self) -> &ReportHeader {
        match self {
            Self::Group(container) | Self::Flow(container) | Self::Branch(container) => {
                container.header()
            }
            Self::BusinessComponent(component) => component.header(),
        }
    }

    /// Returns the number of business component steps beneath this element.
    pub fn activity_count(&self) -> usize {
        match self {
            Self::Group(container) | Self::Flow(container) | Self::Branch(container) => {
                container.children().iter().map(Self::activity_count).sum()
            }
            Self::BusinessComponent(component) => Activities::new(component.steps()).count(),
        }
    }
}

impl TypedNode for BptNode {
    fn accepts(role: NodeRole) -> bool {
        matches!(
            role,
            NodeRole::Group | NodeRole::Flow | NodeRole::Branch | NodeRole::BusinessComponent
        )
    }

    fn parse(raw: &RawNode, role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let node = match role {
            NodeRole::Group => Self::Group(BptContainerReport::parse(raw, cx)?),
            NodeRole::Flow => Self::Flow(BptContainerReport::parse(raw, cx)?),
            NodeRole::Branch => Self::Branch(BptContainerReport::parse(raw, cx)?),
            _ => Self::BusinessComponent(BusinessComponentReport::parse(raw, cx)?),
        };
        Ok(node)
    }
}

/// A group, flow or branch.
#[derive(Clone, Debug)]
pub struct BptContainerReport {
    header: ReportHeader,
    children: Vec<BptNode>,
}

impl BptContainerReport {
    fn parse(raw: &RawNode, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        Ok(Self {
            header: ReportHeader::from_raw(raw),
            children: ReportNodeCollection::<BptNode>::collect(raw, cx)?.into_vec(),
        })
    }

    /// Returns the header of this container.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the flow elements inside this container.
    pub fn children(&self) -> &[BptNode] {
        &self.children
    }
}

/// A business component and its steps.
#[derive(Clone, Debug)]
pub struct BusinessComponentReport {
    header: ReportHeader,
    steps: Vec<ActivityReport>,
}

impl BusinessComponentReport {
    fn parse(raw: &RawNode, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let mut steps = ReportNodeCollection::<ActivityReport>::collect(raw, cx)?.into_vec();

        let mut reconcile = ReconcileContext::new();
        reconcile.visit_all(steps.iter_mut().map(ActivityReport::timing_mut));
        reconcile.finish();

        Ok(Self {
            header: ReportHeader::from_raw(raw),
            steps,
        })
    }

    /// Returns the header of this component.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the steps of this component.
    pub fn steps(&self) -> &[ActivityReport] {
        &self.steps
    }
}
