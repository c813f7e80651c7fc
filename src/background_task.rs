use chrono::Utc;
use tokio::time::{interval, Duration};

use crate::limiter::submission_guard::SubmissionGuard;

/// Periodically forgets clients with no submission left in the window, so
/// the in-memory table does not grow without bound.
pub async fn start_prune_task(guard: SubmissionGuard, every: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;

        let removed = guard.prune(Utc::now().timestamp_millis()).await;
        if removed > 0 {
            tracing::info!("Pruned {} idle submission records", removed);
        } else {
            tracing::debug!(backend = guard.backend(), "No submission records to prune");
        }
    }
}
