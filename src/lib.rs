use std::sync::Arc;

use deadpool_redis::{Config as RedisConfig, Pool, Runtime};

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;
pub mod telemetry;

pub use domain::{contact_rules, entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{cors, limiter, notify, utils};

use errors::NotifyError;
use limiter::{
    memory_store::InMemorySubmissionStore,
    redis_store::RedisSubmissionStore,
    submission_guard::SubmissionGuard,
};
use notify::telegram::TelegramNotifier;
use repositories::submission::SubmissionStore;
use use_cases::contact::ContactHandler;

pub struct AppState {
    pub contact_handler: ContactHandler,
    pub redis_pool: Option<Pool>,
}

impl AppState {
    pub fn new(config: &settings::AppConfig) -> Result<Self, NotifyError> {
        let redis_pool = config.redis_url.as_ref().and_then(|url| {
            RedisConfig::from_url(url)
                .create_pool(Some(Runtime::Tokio1))
                .map_err(|e| tracing::error!("Redis pool creation error, using in-memory limiter: {}", e))
                .ok()
        });

        let store: Arc<dyn SubmissionStore> = match &redis_pool {
            Some(pool) => Arc::new(RedisSubmissionStore::new(pool.clone())),
            None => Arc::new(InMemorySubmissionStore::new()),
        };

        let guard = SubmissionGuard::new(store, config.submission_policy());
        let notifier = TelegramNotifier::from_config(config)?;

        Ok(AppState {
            contact_handler: ContactHandler::new(guard, Arc::new(notifier)),
            redis_pool,
        })
    }

    pub fn from_handler(contact_handler: ContactHandler) -> Self {
        AppState {
            contact_handler,
            redis_pool: None,
        }
    }
}
