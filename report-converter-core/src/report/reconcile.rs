// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duration reconciliation.
//!
//! Report documents reliably record when each activity started, but an activity's own duration
//! is often a placeholder. Durations are repaired in document order while each container is
//! built:
//!
//! * When an activity is visited, the previously visited activity's duration becomes the time
//!   between the two start times.
//! * When an iteration finishes, its last activity's duration becomes whatever remains of the
//!   iteration's own duration after that activity started.
//!
//! The last activity of any other container keeps its recorded duration.

use super::header::Timing;
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::time::Duration;
use tracing::trace;

/// How far a reconciliation context reaches below the container that owns it.
///
/// Every iteration starts a fresh context, so an iteration's last activity is never bounded by
/// the first activity of the next iteration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReconcileScope {
    /// The owning iteration reconciles every activity beneath it in pre-order, across nesting
    /// levels.
    Flattened,

    /// Each container reconciles only its direct children.
    PerContainer,
}

/// Tracks the last activity seen while walking one container in document order.
#[derive(Debug, Default)]
pub(crate) struct ReconcileContext<'a> {
    last: Option<&'a mut Timing>,
}

impl<'a> ReconcileContext<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Visits the next activity in document order, bounding the previous activity by its start.
    pub(crate) fn visit(&mut self, next: &'a mut Timing) {
        if let Some(prev) = self.last.take() {
            match elapsed_between(prev.start_time(), next.start_time()) {
                Some(elapsed) => {
                    trace!(
                        "reconciled duration from next start: {:?} -> {:?}",
                        prev.duration(),
                        elapsed,
                    );
                    prev.set_duration(elapsed);
                }
                None => {
                    trace!("start time missing, keeping recorded duration");
                }
            }
        }
        self.last = Some(next);
    }

    pub(crate) fn visit_all(&mut self, timings: impl IntoIterator<Item = &'a mut Timing>) {
        for timing in timings {
            self.visit(timing);
        }
    }

    /// Finishes an iteration: the last activity gets the time remaining in `container` after it
    /// started.
    pub(crate) fn finish_within(self, container: &Timing) {
        let Some(last) = self.last else {
            return;
        };
        let (Some(container_start), Some(last_start)) =
            (container.start_time(), last.start_time())
        else {
            return;
        };
        let Ok(total) = TimeDelta::from_std(container.duration()) else {
            return;
        };
        let remaining = total
            .checked_sub(&last_start.signed_duration_since(container_start))
            .and_then(|remaining| remaining.to_std().ok())
            .unwrap_or(Duration::ZERO);
        trace!(
            "reconciled trailing duration from container: {:?} -> {:?}",
            last.duration(),
            remaining,
        );
        last.set_duration(remaining);
    }

    /// Finishes a container that does not bound its last activity.
    pub(crate) fn finish(self) {}
}

/// Returns the non-negative time between two start times, if both are known.
fn elapsed_between(
    earlier: Option<DateTime<FixedOffset>>,
    later: Option<DateTime<FixedOffset>>,
) -> Option<Duration> {
    let elapsed = later?.signed_duration_since(earlier?);
    Some(elapsed.to_std().unwrap_or(Duration::ZERO))
}
