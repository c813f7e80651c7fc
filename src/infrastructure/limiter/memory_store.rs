use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::{
    entities::submission::{SubmissionPolicy, SubmissionRecord},
    errors::StoreError,
    repositories::submission::SubmissionStore,
};

/// Process-local store. Each instance keeps its own table, so the limit holds
/// per process only.
#[derive(Clone, Default)]
pub struct InMemorySubmissionStore {
    map: Arc<DashMap<String, SubmissionRecord>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timestamps currently held for `key`, if it was ever seen.
    pub fn tracked_len(&self, key: &str) -> Option<usize> {
        self.map.get(key).map(|record| record.len())
    }

    /// Number of client identifiers in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // The shard lock taken by `get_mut`/`entry` is held for the whole
    // prune-check-append, which makes it atomic per key.
    fn admit_at(&self, key: &str, now: i64, policy: &SubmissionPolicy) -> bool {
        if let Some(mut record) = self.map.get_mut(key) {
            return record.admit(now, policy);
        }

        self.map
            .entry(key.to_string())
            .or_default()
            .admit(now, policy)
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn admit(&self, key: &str, now: i64, policy: &SubmissionPolicy) -> Result<bool, StoreError> {
        Ok(self.admit_at(key, now, policy))
    }

    async fn prune_expired(&self, cutoff: i64) -> Result<usize, StoreError> {
        let mut removed = 0;
        self.map.retain(|_, record| {
            let keep = !record.is_expired(cutoff);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
