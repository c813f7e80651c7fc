use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use deadpool_redis::Pool;
use once_cell::sync::Lazy;
use redis::Script;

use crate::{
    entities::submission::SubmissionPolicy,
    errors::StoreError,
    repositories::submission::SubmissionStore,
};

// KEYS[1] = sorted set of admitted timestamps
// ARGV = now, cutoff, limit, window_ms, member
static ADMIT_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        redis.call('ZREMRANGEBYSCORE', KEYS[1], '-inf', ARGV[2])
        if redis.call('ZCARD', KEYS[1]) >= tonumber(ARGV[3]) then
            return 0
        end
        redis.call('ZADD', KEYS[1], ARGV[1], ARGV[5])
        redis.call('PEXPIRE', KEYS[1], ARGV[4])
        return 1
        "#,
    )
});

/// Shared store backed by Redis sorted sets, one per client identifier.
/// Keys carry a TTL of one window, so stale clients expire on their own.
#[derive(Clone)]
pub struct RedisSubmissionStore {
    pool: Pool,
    instance: String,
    seq: Arc<AtomicU64>,
}

impl RedisSubmissionStore {
    pub fn new(pool: Pool) -> Self {
        let started = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        RedisSubmissionStore {
            pool,
            instance: format!("{}-{}", std::process::id(), started),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Identifiers come from request headers, so they are URL-encoded to keep
    /// the key space clean.
    pub fn key_for(identifier: &str) -> String {
        format!("rl:contact:{}", urlencoding::encode(identifier))
    }

    // Sorted set members must be unique or same-millisecond submissions
    // would collapse into one.
    fn member_for(&self, now: i64) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("{now}:{}:{seq}", self.instance)
    }
}

#[async_trait]
impl SubmissionStore for RedisSubmissionStore {
    async fn admit(&self, key: &str, now: i64, policy: &SubmissionPolicy) -> Result<bool, StoreError> {
        let mut conn = self.pool.get().await?;

        let admitted: i64 = ADMIT_SCRIPT
            .key(Self::key_for(key))
            .arg(now)
            .arg(policy.cutoff(now))
            .arg(policy.limit)
            .arg(policy.window_ms)
            .arg(self.member_for(now))
            .invoke_async(&mut conn)
            .await?;

        Ok(admitted == 1)
    }

    async fn prune_expired(&self, _cutoff: i64) -> Result<usize, StoreError> {
        Ok(0)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
