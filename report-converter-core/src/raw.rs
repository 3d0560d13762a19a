// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The raw, self-describing report node tree.
//!
//! Every report variant shares the same outer schema: a `<Results>` element holding one top-level
//! `<ReportNode>`. Each node carries a `type` attribute, a `<Data>` payload and any number of
//! child nodes. Which types may appear where is not fixed by the schema; that is decided later
//! by the typed trees in [`crate::report`].

use crate::errors::{LoadError, LoadErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::{fmt, time::Duration};

/// Node type tags with special meaning to at least one report kind.
pub mod tags {
    /// The top-level node of every report kind.
    pub const TESTRUN: &str = "testrun";
    /// A test iteration or an action iteration, depending on the parent.
    pub const ITERATION: &str = "iteration";
    /// A GUI action or an API test flow action.
    pub const ACTION: &str = "action";
    /// The API test flow wrapper below the top-level node.
    pub const STEP: &str = "step";
    /// A business process component.
    pub const BUSINESS_COMPONENT: &str = "businesscomponent";
    /// A business process group.
    pub const GROUP: &str = "group";
    /// A business process flow.
    pub const FLOW: &str = "flow";
    /// A business process branch.
    pub const BRANCH: &str = "branch";
}

/// A loaded report document.
#[derive(Clone, Debug)]
pub struct RawDocument {
    base_dir: Utf8PathBuf,
    root: RawNode,
}

impl RawDocument {
    /// Reads a report document from disk.
    ///
    /// The directory containing `path` becomes the base directory for extension files.
    pub fn load(path: &Utf8Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| LoadError::new(path, LoadErrorKind::Io(err)))?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };
        Self::parse_str(&contents, base_dir).map_err(|kind| LoadError::new(path, kind))
    }

    /// Parses a report document from a string.
    pub fn parse_str(
        contents: &str,
        base_dir: impl Into<Utf8PathBuf>,
    ) -> Result<Self, LoadErrorKind> {
        let results: ResultsXml = quick_xml::de::from_str(contents).map_err(LoadErrorKind::Xml)?;
        Ok(Self {
            base_dir: base_dir.into(),
            root: results.report_node,
        })
    }

    /// Returns the directory that relative extension file paths are resolved against.
    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    /// Returns the top-level node.
    pub fn root(&self) -> &RawNode {
        &self.root
    }
}

#[derive(Debug, Deserialize)]
struct ResultsXml {
    #[serde(rename = "ReportNode")]
    report_node: RawNode,
}

/// A single node in the raw report tree.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
    #[serde(rename = "@type")]
    node_type: NodeType,
    #[serde(rename = "Data", default)]
    data: RawData,
    #[serde(rename = "ReportNode", default)]
    children: Vec<RawNode>,
}

impl RawNode {
    /// Returns the type tag of this node.
    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Returns the data payload of this node.
    pub fn data(&self) -> &RawData {
        &self.data
    }

    /// Returns the child nodes, in document order.
    pub fn children(&self) -> &[RawNode] {
        &self.children
    }

    /// Returns the first child with the given type tag.
    pub fn first_child_of_type(&self, tag: &str) -> Option<&RawNode> {
        self.children.iter().find(|child| child.node_type.is(tag))
    }

    /// Returns the display name of this node, for diagnostics.
    pub fn display_name(&self) -> &str {
        self.data.name()
    }
}

/// The type tag of a [`RawNode`].
///
/// Type tags are compared case-insensitively and are stored lowercased.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeType(String);

impl NodeType {
    /// Creates a new node type, normalizing case.
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_ascii_lowercase())
    }

    /// Returns true if this node type matches `tag`, ignoring case.
    pub fn is(&self, tag: &str) -> bool {
        self.0.eq_ignore_ascii_case(tag)
    }

    /// Returns the normalized tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// The `<Data>` payload of a [`RawNode`].
///
/// All fields are kept as the strings found in the document. Accessors interpret them, treating
/// missing or malformed values as absent rather than as errors.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawData {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "ID", default)]
    id: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Index", default)]
    index: Option<String>,
    #[serde(rename = "Result", default)]
    result: Option<String>,
    #[serde(rename = "StartTime", default)]
    start_time: Option<String>,
    #[serde(rename = "Duration", default)]
    duration: Option<String>,
    #[serde(rename = "ErrorText", default)]
    error_text: Option<String>,
    #[serde(rename = "Extension", default)]
    extension: Option<RawExtension>,
}

impl RawData {
    /// Returns the name of the node, or an empty string.
    pub fn name(&self) -> &str {
        self.name.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Returns the ID of the node, if any.
    pub fn id(&self) -> Option<&str> {
        non_empty(self.id.as_deref())
    }

    /// Returns the description of the node, if any.
    pub fn description(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    /// Returns the one-based index of the node among its siblings, if recorded.
    pub fn index(&self) -> Option<u32> {
        self.index.as_deref().and_then(|s| s.trim().parse().ok())
    }

    /// Returns the raw result string, if any.
    pub fn result(&self) -> Option<&str> {
        non_empty(self.result.as_deref())
    }

    /// Returns the start time of the node, if present and parseable.
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.start_time.as_deref().and_then(parse_timestamp)
    }

    /// Returns the recorded duration of the node.
    ///
    /// A missing, malformed or negative duration is returned as zero.
    pub fn duration(&self) -> Duration {
        self.duration
            .as_deref()
            .and_then(parse_duration_secs)
            .unwrap_or_default()
    }

    /// Returns the error text of the node, if any.
    pub fn error_text(&self) -> Option<&str> {
        non_empty(self.error_text.as_deref())
    }

    /// Returns the path to this node's extension file, relative to the report, if any.
    pub fn extension_file(&self) -> Option<&str> {
        self.extension
            .as_ref()
            .and_then(|extension| non_empty(extension.bottom_file_path.as_deref()))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawExtension {
    #[serde(rename = "BottomFilePath", default)]
    bottom_file_path: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parses an RFC 3339 timestamp, or a timestamp without an offset, which is taken to be UTC.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Some(timestamp);
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().into())
}

/// Parses a decimal number of seconds.
pub(crate) fn parse_duration_secs(s: &str) -> Option<Duration> {
    let secs: f64 = s.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn parse_nested_nodes() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <Results>
              <GeneralInfo><RunStartTime>ignored</RunStartTime></GeneralInfo>
              <ReportNode type="TestRun">
                <Data>
                  <Name>Checkout</Name>
                  <Result>Passed</Result>
                  <StartTime>2024-05-01T10:00:00+02:00</StartTime>
                  <Duration>12.5</Duration>
                </Data>
                <ReportNode type="iteration">
                  <Data><Name>Iteration 1</Name><Index>1</Index></Data>
                </ReportNode>
                <ReportNode type="Iteration">
                  <Data>
                    <Name>Iteration 2</Name>
                    <Extension><BottomFilePath>res/ext.xml</BottomFilePath></Extension>
                  </Data>
                </ReportNode>
              </ReportNode>
            </Results>
        "#};

        let doc = RawDocument::parse_str(xml, "reports").expect("document parses");
        let root = doc.root();
        assert!(root.node_type().is("testrun"));
        assert_eq!(root.node_type().as_str(), "testrun");
        assert_eq!(root.data().name(), "Checkout");
        assert_eq!(root.data().result(), Some("Passed"));
        assert_eq!(root.data().duration(), Duration::from_millis(12_500));
        assert_eq!(
            root.data().start_time(),
            DateTime::parse_from_rfc3339("2024-05-01T08:00:00Z").ok()
        );

        let names: Vec<_> = root.children().iter().map(|c| c.data().name()).collect();
        assert_eq!(names, vec!["Iteration 1", "Iteration 2"]);
        assert_eq!(root.children()[0].data().index(), Some(1));
        assert_eq!(root.children()[0].data().extension_file(), None);
        assert_eq!(root.children()[1].data().extension_file(), Some("res/ext.xml"));
        assert_eq!(doc.base_dir().as_str(), "reports");
    }

    #[test]
    fn children_interleaved_with_other_elements() {
        let xml = indoc! {r#"
            <Results>
              <ReportNode type="testrun">
                <ReportNode type="a"><Data><Name>first</Name></Data></ReportNode>
                <Data><Name>root</Name></Data>
                <ReportNode type="b"><Data><Name>second</Name></Data></ReportNode>
              </ReportNode>
            </Results>
        "#};

        let doc = RawDocument::parse_str(xml, ".").expect("document parses");
        assert_eq!(doc.root().data().name(), "root");
        let types: Vec<_> = doc
            .root()
            .children()
            .iter()
            .map(|c| c.node_type().as_str())
            .collect();
        assert_eq!(types, vec!["a", "b"]);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = RawDocument::parse_str("<Results><ReportNode type=\"testrun\">", ".")
            .expect_err("unterminated document fails");
        assert!(matches!(err, LoadErrorKind::Xml(_)), "{err:?}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RawDocument::load(Utf8Path::new("does/not/exist/run_results.xml"))
            .expect_err("missing file fails");
        assert_eq!(err.path().as_str(), "does/not/exist/run_results.xml");
        assert!(matches!(err.kind(), LoadErrorKind::Io(_)), "{err:?}");
    }

    #[test_case("2024-05-01T10:00:00Z", Some("2024-05-01T10:00:00+00:00"); "utc")]
    #[test_case("2024-05-01T10:00:00.250+08:00", Some("2024-05-01T10:00:00.250+08:00"); "offset")]
    #[test_case(" 2024-05-01T10:00:00 ", Some("2024-05-01T10:00:00+00:00"); "naive")]
    #[test_case("yesterday", None; "garbage")]
    fn timestamps(input: &str, expected: Option<&str>) {
        let expected = expected.map(|s| DateTime::parse_from_rfc3339(s).unwrap());
        assert_eq!(parse_timestamp(input), expected);
    }

    #[test_case("5", Some(Duration::from_secs(5)); "integer")]
    #[test_case("0.5", Some(Duration::from_millis(500)); "fraction")]
    #[test_case("-1", None; "negative")]
    #[test_case("", None; "empty")]
    #[test_case("NaN", None; "nan")]
    fn durations(input: &str, expected: Option<Duration>) {
        assert_eq!(parse_duration_secs(input), expected);
    }
}
