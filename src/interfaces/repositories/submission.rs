use async_trait::async_trait;

use crate::{entities::submission::SubmissionPolicy, errors::StoreError};

/// Backing storage for per-client submission timestamps.
///
/// `admit` must run prune, check and append as one atomic step for a given
/// key; concurrent calls for different keys may proceed independently.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Returns `true` and records `now` when the key is under the policy limit.
    async fn admit(&self, key: &str, now: i64, policy: &SubmissionPolicy) -> Result<bool, StoreError>;

    /// Forgets keys whose timestamps are all at or before `cutoff`.
    /// Returns how many keys were removed.
    async fn prune_expired(&self, cutoff: i64) -> Result<usize, StoreError>;

    /// Short name for health output and logs.
    fn backend(&self) -> &'static str;
}
