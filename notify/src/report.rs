//! Aggregated results of a dispatch run

use crate::notifier::NotificationOutcome;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The status code an indexing service uses to signal an exhausted quota.
pub const QUOTA_EXCEEDED: u16 = 429;

/// The result of a dispatch run, one outcome recorded per dispatched URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    /// Number of URLs handed to the dispatcher
    pub total: usize,
    pub succeeded: usize,
    pub rejected: usize,
    pub failed: usize,
    /// Number of URLs not dispatched due to a limit
    pub skipped: usize,
    /// Rejections, grouped by status code
    pub rejected_by_status: BTreeMap<u16, usize>,
}

impl DispatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Record the outcome of a single URL.
    pub fn record(&mut self, outcome: &NotificationOutcome) {
        match outcome {
            NotificationOutcome::Succeeded => self.succeeded += 1,
            NotificationOutcome::RejectedByServer(status) => {
                self.rejected += 1;
                *self.rejected_by_status.entry(*status).or_default() += 1;
            }
            NotificationOutcome::TransportFailed(_) => self.failed += 1,
        }
    }

    /// Number of recorded outcomes
    pub fn processed(&self) -> usize {
        self.succeeded + self.rejected + self.failed
    }

    /// Number of rejections due to an exhausted quota
    pub fn quota_exceeded(&self) -> usize {
        self.rejected_by_status
            .get(&QUOTA_EXCEEDED)
            .copied()
            .unwrap_or_default()
    }

    /// Check if every URL got notified successfully.
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }
}

impl Display for DispatchReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Notified {} of {} URLs ({} rejected, {} failed",
            self.succeeded, self.total, self.rejected, self.failed
        )?;

        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }

        f.write_str(")")?;

        match self.quota_exceeded() {
            0 => Ok(()),
            n => write!(f, ", quota exceeded for {n} URLs"),
        }
    }
}
