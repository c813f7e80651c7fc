use async_trait::async_trait;

use crate::errors::NotifyError;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Whether the credentials needed to deliver a message are present
    fn is_configured(&self) -> bool;

    /// Delivers a plain-text message to the configured destination
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
