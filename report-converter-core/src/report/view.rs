// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A kind-agnostic view over typed report nodes, used by converters.

use super::{
    TestReport,
    activity::{ActivityReport, IterationReport},
    api::ApiTestReport,
    bpt::{BptContainerReport, BptIterationReport, BptNode, BptTestReport, BusinessComponentReport},
    extension::ExtensionData,
    gui::{ActionReport, GuiIterationReport, GuiTestReport},
    header::{ReportHeader, ReportStatus},
};
use chrono::{DateTime, FixedOffset};
use std::time::Duration;

/// A result in a report tree: a name, a status, timing and nested results.
pub trait ResultView {
    /// Returns the header of the underlying node.
    fn header(&self) -> &ReportHeader;

    /// Returns the results nested under this one, in document order.
    fn sub_results(&self) -> Vec<&dyn ResultView>;

    /// Returns extension data attached to this result, if any.
    fn extension(&self) -> Option<&ExtensionData> {
        None
    }

    /// Returns the display name of this result.
    fn name(&self) -> String {
        self.header().display_name()
    }

    /// Returns the status of this result.
    fn status(&self) -> ReportStatus {
        self.header().status()
    }

    /// Returns the (reconciled) duration of this result.
    fn duration(&self) -> Duration {
        self.header().duration()
    }

    /// Returns the start time of this result, if known.
    fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.header().start_time()
    }

    /// Returns the error text of this result, if any.
    fn error_text(&self) -> Option<&str> {
        self.header().error_text()
    }
}

fn views<T: ResultView>(items: &[T]) -> Vec<&dyn ResultView> {
    items.iter().map(|item| item as &dyn ResultView).collect()
}

impl ResultView for ActivityReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.children())
    }

    fn extension(&self) -> Option<&ExtensionData> {
        self.extension()
    }
}

impl ResultView for IterationReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.activities())
    }
}

impl ResultView for ActionReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.iterations())
    }
}

impl ResultView for GuiIterationReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.actions())
    }
}

impl ResultView for GuiTestReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.iterations())
    }
}

impl ResultView for ApiTestReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.iterations())
    }
}

impl ResultView for BusinessComponentReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.steps())
    }
}

impl ResultView for BptContainerReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.children())
    }
}

impl ResultView for BptNode {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        match self {
            Self::Group(container) | Self::Flow(container) | Self::Branch(container) => {
                container.sub_results()
            }
            Self::BusinessComponent(component) => component.sub_results(),
        }
    }
}

impl ResultView for BptIterationReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.children())
    }
}

impl ResultView for BptTestReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        views(self.iterations())
    }
}

impl ResultView for TestReport {
    fn header(&self) -> &ReportHeader {
        self.header()
    }

    fn sub_results(&self) -> Vec<&dyn ResultView> {
        self.top_level_results()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{bpt_test, node};
    use pretty_assertions::assert_eq;

    fn names(view: &dyn ResultView) -> Vec<String> {
        view.sub_results().iter().map(|result| result.name()).collect()
    }

    #[test]
    fn bpt_view_hides_node_variants() {
        let doc = bpt_test([
            node("flow", "Checkout").child(node("businesscomponent", "Pay")),
            node("businesscomponent", "Logout").child(node("step", "Click")),
        ])
        .parse();
        let report = TestReport::Bpt(BptTestReport::parse(&doc).unwrap());

        let iterations = report.sub_results();
        assert_eq!(iterations.len(), 1);
        assert_eq!(iterations[0].name(), "Iteration 1");
        assert_eq!(names(iterations[0]), vec!["Checkout", "Logout"]);

        let logout = iterations[0].sub_results()[1];
        assert_eq!(names(logout), vec!["Click"]);
        assert!(logout.sub_results()[0].sub_results().is_empty());
    }
}
