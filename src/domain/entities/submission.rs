use std::collections::VecDeque;

use crate::constants::{DEFAULT_SUBMISSION_LIMIT, DEFAULT_WINDOW_MS};

/// How many admitted submissions a client may make within a sliding window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionPolicy {
    pub limit: usize,
    pub window_ms: i64,
}

impl Default for SubmissionPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUBMISSION_LIMIT,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

impl SubmissionPolicy {
    pub fn new(limit: usize, window_ms: i64) -> Self {
        Self { limit, window_ms }
    }

    /// Timestamps at or before the cutoff no longer count.
    pub fn cutoff(&self, now: i64) -> i64 {
        now - self.window_ms
    }
}

/// Admitted submission timestamps (epoch millis) for one client, oldest first.
#[derive(Debug, Default, Clone)]
pub struct SubmissionRecord {
    timestamps: VecDeque<i64>,
}

impl SubmissionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every timestamp that is not strictly newer than `cutoff`.
    pub fn prune(&mut self, cutoff: i64) {
        self.timestamps.retain(|&ts| ts > cutoff);
    }

    /// Prunes, then records `now` if the client is still under the limit.
    /// A denied attempt leaves the record untouched apart from pruning.
    pub fn admit(&mut self, now: i64, policy: &SubmissionPolicy) -> bool {
        self.prune(policy.cutoff(now));

        if self.timestamps.len() >= policy.limit {
            return false;
        }

        self.timestamps.push_back(now);
        true
    }

    pub fn is_expired(&self, cutoff: i64) -> bool {
        self.timestamps.iter().all(|&ts| ts <= cutoff)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}
