// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    collection::{ParseContext, ReportNodeCollection, TypedNode},
    extension::ExtensionData,
    factory::NodeRole,
    header::{ReportHeader, Timing},
    reconcile::{ReconcileContext, ReconcileScope},
};
use crate::{errors::KindMismatch, raw::RawNode};
use std::slice;

/// A step, checkpoint or other activity, with any nested activities.
#[derive(Clone, Debug)]
pub struct ActivityReport {
    header: ReportHeader,
    extension: Option<ExtensionData>,
    children: Vec<ActivityReport>,
}

impl ActivityReport {
    /// Returns the header of this activity.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the extension data attached to this activity, if it could be loaded.
    pub fn extension(&self) -> Option<&ExtensionData> {
        self.extension.as_ref()
    }

    /// Returns the activities nested under this one.
    pub fn children(&self) -> &[ActivityReport] {
        &self.children
    }

    pub(super) fn timing_mut(&mut self) -> &mut Timing {
        self.header.timing_mut()
    }
}

impl TypedNode for ActivityReport {
    fn accepts(role: NodeRole) -> bool {
        role == NodeRole::Activity
    }

    fn parse(raw: &RawNode, _role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let header = ReportHeader::from_raw(raw);
        let extension = cx.load_extension(raw);
        let mut children = ReportNodeCollection::<ActivityReport>::collect(raw, cx)?.into_vec();

        if cx.scope() == ReconcileScope::PerContainer {
            let mut reconcile = ReconcileContext::new();
            reconcile.visit_all(children.iter_mut().map(ActivityReport::timing_mut));
            reconcile.finish();
        }

        Ok(Self {
            header,
            extension,
            children,
        })
    }
}

/// An iteration that directly holds activities.
#[derive(Clone, Debug)]
pub struct IterationReport {
    header: ReportHeader,
    activities: Vec<ActivityReport>,
}

impl IterationReport {
    /// Returns the header of this iteration.
    pub fn header(&self) -> &ReportHeader {
        &self.header
    }

    /// Returns the top-level activities of this iteration.
    pub fn activities(&self) -> &[ActivityReport] {
        &self.activities
    }

    /// Returns every activity in this iteration, nested ones included, in document order.
    pub fn all_activities(&self) -> Activities<'_> {
        Activities::new(&self.activities)
    }
}

impl TypedNode for IterationReport {
    fn accepts(role: NodeRole) -> bool {
        role == NodeRole::Iteration
    }

    fn parse(raw: &RawNode, _role: NodeRole, cx: &ParseContext<'_>) -> Result<Self, KindMismatch> {
        let header = ReportHeader::from_raw(raw);
        let mut activities = ReportNodeCollection::<ActivityReport>::collect(raw, cx)?.into_vec();

        let mut reconcile = ReconcileContext::new();
        match cx.scope() {
            ReconcileScope::Flattened => reconcile.visit_all(TimingsMut::new(&mut activities)),
            ReconcileScope::PerContainer => {
                reconcile.visit_all(activities.iter_mut().map(ActivityReport::timing_mut))
            }
        }
        reconcile.finish_within(header.timing());

        Ok(Self { header, activities })
    }
}

/// Pre-order iterator over a forest of activities.
#[derive(Clone, Debug)]
pub struct Activities<'a> {
    stack: Vec<slice::Iter<'a, ActivityReport>>,
}

impl<'a> Activities<'a> {
    /// Creates an iterator over `activities` and everything nested under them.
    pub fn new(activities: &'a [ActivityReport]) -> Self {
        Self {
            stack: vec![activities.iter()],
        }
    }
}

impl<'a> Iterator for Activities<'a> {
    type Item = &'a ActivityReport;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(activity) => {
                    self.stack.push(activity.children.iter());
                    return Some(activity);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Like [`Activities`], but yielding mutable timings for reconciliation.
struct TimingsMut<'a> {
    stack: Vec<slice::IterMut<'a, ActivityReport>>,
}

impl<'a> TimingsMut<'a> {
    fn new(activities: &'a mut [ActivityReport]) -> Self {
        Self {
            stack: vec![activities.iter_mut()],
        }
    }
}

impl<'a> Iterator for TimingsMut<'a> {
    type Item = &'a mut Timing;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(ActivityReport {
                    header, children, ..
                }) => {
                    self.stack.push(children.iter_mut());
                    return Some(header.timing_mut());
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
