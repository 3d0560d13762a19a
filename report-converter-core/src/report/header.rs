// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::raw::{NodeType, RawNode};
use chrono::{DateTime, FixedOffset};
use std::{fmt, time::Duration};

/// The outcome recorded for a report node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReportStatus {
    /// The node passed.
    Passed,
    /// The node failed.
    Failed,
    /// The node passed with warnings.
    Warning,
    /// The node ran and has no pass/fail semantics.
    Done,
    /// The node only carries information.
    Information,
    /// The node could not be run due to an error.
    Error,
    /// The node was skipped.
    Skipped,
    /// The recorded result is missing or not recognized.
    Unknown,
}

impl ReportStatus {
    /// Parses a result string, ignoring case. Unrecognized values become `Unknown`.
    pub fn from_result(result: Option<&str>) -> Self {
        let Some(result) = result else {
            return Self::Unknown;
        };
        match result.trim().to_ascii_lowercase().as_str() {
            "passed" | "pass" => Self::Passed,
            "failed" | "fail" => Self::Failed,
            "warning" => Self::Warning,
            "done" => Self::Done,
            "information" | "info" => Self::Information,
            "error" => Self::Error,
            "skipped" | "skip" => Self::Skipped,
            _ => Self::Unknown,
        }
    }

    /// Returns true if this status counts as a failure.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }

    /// Returns the canonical name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Warning => "Warning",
            Self::Done => "Done",
            Self::Information => "Information",
            Self::Error => "Error",
            Self::Skipped => "Skipped",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When a node started and how long it took.
///
/// The duration starts out as recorded in the document and may be replaced once by duration
/// reconciliation while the enclosing container is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Timing {
    start_time: Option<DateTime<FixedOffset>>,
    duration: Duration,
}

impl Timing {
    /// Creates a new `Timing`.
    pub fn new(start_time: Option<DateTime<FixedOffset>>, duration: Duration) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// Returns the start time, if known.
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.start_time
    }

    /// Returns the duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub(super) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }
}

/// Attributes shared by every typed report node.
#[derive(Clone, Debug)]
pub struct ReportHeader {
    node_type: NodeType,
    name: String,
    id: Option<String>,
    description: Option<String>,
    index: Option<u32>,
    status: ReportStatus,
    timing: Timing,
    error_text: Option<String>,
}

impl ReportHeader {
    pub(super) fn from_raw(raw: &RawNode) -> Self {
        let data = raw.data();
        Self {
            node_type: raw.node_type().clone(),
            name: data.name().to_owned(),
            id: data.id().map(ToOwned::to_owned),
            description: data.description().map(ToOwned::to_owned),
            index: data.index(),
            status: ReportStatus::from_result(data.result()),
            timing: Timing::new(data.start_time(), data.duration()),
            error_text: data.error_text().map(ToOwned::to_owned),
        }
    }

    /// Returns the type tag of the node this header was read from.
    pub fn node_type(&self) -> &NodeType {
        &self.node_type
    }

    /// Returns the name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ID of the node, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the description of the node, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the one-based index of the node, if recorded.
    pub fn index(&self) -> Option<u32> {
        self.index
    }

    /// Returns the status of the node.
    pub fn status(&self) -> ReportStatus {
        self.status
    }

    /// Returns the timing of the node.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Returns the start time of the node, if known.
    pub fn start_time(&self) -> Option<DateTime<FixedOffset>> {
        self.timing.start_time
    }

    /// Returns the duration of the node.
    pub fn duration(&self) -> Duration {
        self.timing.duration
    }

    /// Returns the error text of the node, if any.
    pub fn error_text(&self) -> Option<&str> {
        self.error_text.as_deref()
    }

    /// Returns a name suitable for display: the recorded name, or the node type and index.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        let mut node_type = self.node_type.as_str().to_owned();
        if let Some(first) = node_type.get_mut(..1) {
            first.make_ascii_uppercase();
        }
        match self.index {
            Some(index) => format!("{node_type} {index}"),
            None => node_type,
        }
    }

    pub(super) fn timing_mut(&mut self) -> &mut Timing {
        &mut self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("Passed"), ReportStatus::Passed; "passed")]
    #[test_case(Some("FAILED"), ReportStatus::Failed; "failed uppercase")]
    #[test_case(Some(" warning "), ReportStatus::Warning; "warning padded")]
    #[test_case(Some("Done"), ReportStatus::Done; "done")]
    #[test_case(Some("Information"), ReportStatus::Information; "information")]
    #[test_case(Some("Error"), ReportStatus::Error; "error")]
    #[test_case(Some("Skipped"), ReportStatus::Skipped; "skipped")]
    #[test_case(Some("Blocked"), ReportStatus::Unknown; "unrecognized")]
    #[test_case(None, ReportStatus::Unknown; "missing")]
    fn status_from_result(input: Option<&str>, expected: ReportStatus) {
        assert_eq!(ReportStatus::from_result(input), expected);
    }
}
