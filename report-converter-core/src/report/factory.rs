// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-kind mapping from raw node types to typed roles.

use super::{ReportKind, reconcile::ReconcileScope};
use crate::raw::{RawNode, tags};
use std::fmt;

/// The typed role a raw node takes within one report kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeRole {
    /// An iteration of the whole test.
    TestIteration,
    /// A GUI test action.
    Action,
    /// An iteration that directly holds activities.
    Iteration,
    /// A step, checkpoint or other activity.
    Activity,
    /// A business process group.
    Group,
    /// A business process flow.
    Flow,
    /// A business process branch.
    Branch,
    /// A business process component.
    BusinessComponent,
}

/// Decides what a raw node becomes within one report kind.
pub trait ReportNodeFactory: fmt::Debug {
    /// The report kind this factory builds.
    fn kind(&self) -> ReportKind;

    /// Returns the role of `node` when found under `parent`, or `None` if the node does not take
    /// part in this kind of report at that position.
    fn role_of(&self, node: &RawNode, parent: &RawNode) -> Option<NodeRole>;

    /// Returns how duration reconciliation reaches below iterations in this kind.
    fn reconcile_scope(&self) -> ReconcileScope {
        ReconcileScope::PerContainer
    }
}

/// Node roles for GUI tests: `testrun → iteration → action → iteration → step…`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GuiNodeFactory;

impl ReportNodeFactory for GuiNodeFactory {
    fn kind(&self) -> ReportKind {
        ReportKind::Gui
    }

    fn role_of(&self, node: &RawNode, parent: &RawNode) -> Option<NodeRole> {
        let node_type = node.node_type();
        if node_type.is(tags::TESTRUN) {
            None
        } else if node_type.is(tags::ITERATION) {
            if parent.node_type().is(tags::TESTRUN) {
                Some(NodeRole::TestIteration)
            } else {
                Some(NodeRole::Iteration)
            }
        } else if node_type.is(tags::ACTION) {
            Some(NodeRole::Action)
        } else {
            Some(NodeRole::Activity)
        }
    }
}

/// Node roles for API tests: `testrun → step → action → iteration → activity…`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiNodeFactory;

impl ReportNodeFactory for ApiNodeFactory {
    fn kind(&self) -> ReportKind {
        ReportKind::Api
    }

    fn role_of(&self, node: &RawNode, _parent: &RawNode) -> Option<NodeRole> {
        let node_type = node.node_type();
        if node_type.is(tags::TESTRUN) {
            None
        } else if node_type.is(tags::ITERATION) {
            Some(NodeRole::Iteration)
        } else {
            Some(NodeRole::Activity)
        }
    }

    fn reconcile_scope(&self) -> ReconcileScope {
        ReconcileScope::Flattened
    }
}

/// Node roles for business process tests:
/// `testrun → iteration → (group | flow | branch)* → businesscomponent → step…`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BptNodeFactory;

impl ReportNodeFactory for BptNodeFactory {
    fn kind(&self) -> ReportKind {
        ReportKind::Bpt
    }

    fn role_of(&self, node: &RawNode, parent: &RawNode) -> Option<NodeRole> {
        let node_type = node.node_type();
        if node_type.is(tags::TESTRUN) {
            None
        } else if node_type.is(tags::ITERATION) {
            parent
                .node_type()
                .is(tags::TESTRUN)
                .then_some(NodeRole::TestIteration)
        } else if node_type.is(tags::BUSINESS_COMPONENT) {
            Some(NodeRole::BusinessComponent)
        } else if node_type.is(tags::GROUP) {
            Some(NodeRole::Group)
        } else if node_type.is(tags::FLOW) {
            Some(NodeRole::Flow)
        } else if node_type.is(tags::BRANCH) {
            Some(NodeRole::Branch)
        } else {
            Some(NodeRole::Activity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawDocument;
    use indoc::indoc;
    use test_case::test_case;

    // testrun
    //   iteration
    //     action
    //       iteration
    //         step
    //       businesscomponent
    //   step
    //     action
    //       iteration
    //         testrun
    const MIXED: &str = indoc! {r#"
        <Results>
          <ReportNode type="testrun">
            <ReportNode type="iteration">
              <ReportNode type="action">
                <ReportNode type="iteration">
                  <ReportNode type="step"/>
                </ReportNode>
                <ReportNode type="businesscomponent"/>
              </ReportNode>
            </ReportNode>
            <ReportNode type="step">
              <ReportNode type="action">
                <ReportNode type="iteration">
                  <ReportNode type="TESTRUN"/>
                </ReportNode>
              </ReportNode>
            </ReportNode>
          </ReportNode>
        </Results>
    "#};

    /// Returns (node, parent) by following child indexes from the root.
    fn node_at<'a>(doc: &'a RawDocument, path: &[usize]) -> (&'a RawNode, &'a RawNode) {
        let mut parent = doc.root();
        let mut node = doc.root();
        for &index in path {
            parent = node;
            node = &node.children()[index];
        }
        (node, parent)
    }

    #[test_case(&[0], Some(NodeRole::TestIteration); "test iteration")]
    #[test_case(&[0, 0], Some(NodeRole::Action); "action")]
    #[test_case(&[0, 0, 0], Some(NodeRole::Iteration); "action iteration")]
    #[test_case(&[0, 0, 0, 0], Some(NodeRole::Activity); "step")]
    #[test_case(&[1, 0, 0, 0], None; "nested testrun")]
    fn gui_roles(path: &[usize], expected: Option<NodeRole>) {
        let doc = RawDocument::parse_str(MIXED, ".").unwrap();
        let (node, parent) = node_at(&doc, path);
        assert_eq!(GuiNodeFactory.role_of(node, parent), expected);
    }

    #[test_case(&[1], Some(NodeRole::Activity); "flow step")]
    #[test_case(&[1, 0, 0], Some(NodeRole::Iteration); "iteration")]
    #[test_case(&[1, 0, 0, 0], None; "testrun marker")]
    #[test_case(&[0, 0], Some(NodeRole::Activity); "anything else")]
    fn api_roles(path: &[usize], expected: Option<NodeRole>) {
        let doc = RawDocument::parse_str(MIXED, ".").unwrap();
        let (node, parent) = node_at(&doc, path);
        assert_eq!(ApiNodeFactory.role_of(node, parent), expected);
    }

    #[test_case(&[0], Some(NodeRole::TestIteration); "test iteration")]
    #[test_case(&[0, 0, 0], None; "nested iteration")]
    #[test_case(&[0, 0, 1], Some(NodeRole::BusinessComponent); "business component")]
    #[test_case(&[0, 0], Some(NodeRole::Activity); "action is a plain step")]
    fn bpt_roles(path: &[usize], expected: Option<NodeRole>) {
        let doc = RawDocument::parse_str(MIXED, ".").unwrap();
        let (node, parent) = node_at(&doc, path);
        assert_eq!(BptNodeFactory.role_of(node, parent), expected);
    }
}
