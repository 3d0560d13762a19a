// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for report documents used in tests.

use crate::raw::RawDocument;
use chrono::{DateTime, TimeDelta};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Returns an RFC 3339 timestamp `secs` seconds after a fixed base time.
pub(crate) fn ts(secs: i64) -> String {
    let base = DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap();
    (base + TimeDelta::seconds(secs)).to_rfc3339()
}

/// A report node under construction.
#[derive(Clone, Debug)]
pub(crate) struct NodeBuilder {
    node_type: String,
    data: Vec<(&'static str, String)>,
    children: Vec<NodeBuilder>,
}

/// Starts building a node with the given type and name.
pub(crate) fn node(node_type: &str, name: &str) -> NodeBuilder {
    NodeBuilder {
        node_type: node_type.to_owned(),
        data: vec![("Name", name.to_owned())],
        children: Vec::new(),
    }
}

impl NodeBuilder {
    pub(crate) fn result(self, result: &str) -> Self {
        self.data("Result", result)
    }

    /// Sets the start time to `secs` seconds after the base time.
    pub(crate) fn start(self, secs: i64) -> Self {
        self.data("StartTime", &ts(secs))
    }

    pub(crate) fn duration(self, secs: f64) -> Self {
        self.data("Duration", &secs.to_string())
    }

    pub(crate) fn error(self, text: &str) -> Self {
        self.data("ErrorText", text)
    }

    pub(crate) fn index(self, index: u32) -> Self {
        self.data("Index", &index.to_string())
    }

    /// Points the node at an extension file, relative to the report.
    pub(crate) fn extension(self, path: &str) -> Self {
        let mut xml = String::new();
        write!(xml, "<BottomFilePath>{}</BottomFilePath>", escape(path)).unwrap();
        self.raw_data("Extension", xml)
    }

    pub(crate) fn child(mut self, child: NodeBuilder) -> Self {
        self.children.push(child);
        self
    }

    pub(crate) fn children(mut self, children: impl IntoIterator<Item = NodeBuilder>) -> Self {
        self.children.extend(children);
        self
    }

    fn data(self, key: &'static str, value: &str) -> Self {
        let value = escape(value).into_owned();
        self.raw_data(key, value)
    }

    fn raw_data(mut self, key: &'static str, xml: String) -> Self {
        self.data.retain(|(k, _)| *k != key);
        self.data.push((key, xml));
        self
    }

    fn write_xml(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        writeln!(out, r#"{indent}<ReportNode type="{}">"#, escape(&self.node_type)).unwrap();
        write!(out, "{indent}  <Data>").unwrap();
        for (key, value) in &self.data {
            write!(out, "<{key}>{value}</{key}>").unwrap();
        }
        writeln!(out, "</Data>").unwrap();
        for child in &self.children {
            child.write_xml(out, depth + 1);
        }
        writeln!(out, "{indent}</ReportNode>").unwrap();
    }

    /// Renders a complete report document with this node at the top.
    pub(crate) fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Results>\n");
        self.write_xml(&mut out, 1);
        out.push_str("</Results>\n");
        out
    }

    /// Parses the rendered document, resolving extension files against `.`.
    pub(crate) fn parse(&self) -> RawDocument {
        RawDocument::parse_str(&self.to_xml(), ".").unwrap()
    }
}

/// A GUI test with one test iteration, one action and one action iteration holding `steps`.
pub(crate) fn gui_test(steps: impl IntoIterator<Item = NodeBuilder>) -> NodeBuilder {
    node("testrun", "GuiTest").result("Passed").start(0).duration(10.0).child(
        node("iteration", "").index(1).start(0).duration(10.0).child(
            node("action", "Action1").result("Passed").start(0).child(
                node("iteration", "")
                    .index(1)
                    .start(0)
                    .duration(10.0)
                    .children(steps),
            ),
        ),
    )
}

/// An API test: `testrun → step → action → iteration*`.
pub(crate) fn api_test(iterations: impl IntoIterator<Item = NodeBuilder>) -> NodeBuilder {
    node("testrun", "ApiTest").result("Passed").start(0).duration(10.0).child(
        node("step", "Flow")
            .child(node("action", "Action").children(iterations)),
    )
}

/// A business process test with a single test iteration holding `children`.
pub(crate) fn bpt_test(children: impl IntoIterator<Item = NodeBuilder>) -> NodeBuilder {
    node("testrun", "BusinessProcess").result("Passed").start(0).duration(10.0).child(
        node("iteration", "")
            .index(1)
            .start(0)
            .duration(10.0)
            .children(children),
    )
}
