use std::sync::Arc;

use crate::{
    entities::submission::SubmissionPolicy,
    repositories::submission::SubmissionStore,
};

/// Decides whether a client may submit the contact form right now.
#[derive(Clone)]
pub struct SubmissionGuard {
    store: Arc<dyn SubmissionStore>,
    policy: SubmissionPolicy,
}

impl SubmissionGuard {
    pub fn new(store: Arc<dyn SubmissionStore>, policy: SubmissionPolicy) -> Self {
        SubmissionGuard { store, policy }
    }

    /// Sliding-window admission for `identifier` at `now` (epoch millis).
    ///
    /// Only admitted attempts are recorded. If the backing store cannot be
    /// reached the submission is admitted and a warning is logged.
    pub async fn admit(&self, identifier: &str, now: i64) -> bool {
        match self.store.admit(identifier, now, &self.policy).await {
            Ok(admitted) => admitted,
            Err(e) => {
                tracing::warn!(
                    backend = self.store.backend(),
                    "Submission store unavailable, admitting: {}",
                    e
                );
                true
            }
        }
    }

    /// Drops identifiers with no timestamp inside the window ending at `now`.
    pub async fn prune(&self, now: i64) -> usize {
        match self.store.prune_expired(self.policy.cutoff(now)).await {
            Ok(removed) => removed,
            Err(e) => {
                tracing::warn!("Submission store prune failed: {}", e);
                0
            }
        }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}
