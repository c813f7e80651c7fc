use std::sync::Arc;

use chrono::Utc;

use crate::{
    domain::contact_rules::compose_message,
    entities::contact::{ContactPayload, ContactResponse},
    errors::ContactError,
    limiter::submission_guard::SubmissionGuard,
    repositories::notifier::Notifier,
};

pub struct ContactHandler {
    pub guard: SubmissionGuard,
    pub notifier: Arc<dyn Notifier>,
}

impl ContactHandler {
    pub fn new(guard: SubmissionGuard, notifier: Arc<dyn Notifier>) -> Self {
        ContactHandler { guard, notifier }
    }

    /// Handles one contact form submission at the current time
    pub async fn submit(
        &self,
        client_id: &str,
        payload: ContactPayload,
    ) -> Result<ContactResponse, ContactError> {
        self.submit_at(client_id, payload, Utc::now().timestamp_millis()).await
    }

    /// Admission, validation, sanitization, then delivery.
    ///
    /// Configuration is only consulted once the payload is known to be valid,
    /// so malformed submissions never learn whether the notifier is set up.
    pub async fn submit_at(
        &self,
        client_id: &str,
        payload: ContactPayload,
        now: i64,
    ) -> Result<ContactResponse, ContactError> {
        if !self.guard.admit(client_id, now).await {
            tracing::info!(client_id, "Contact submission rate limited");
            return Err(ContactError::RateLimited);
        }

        let submission = payload.into_submission()?;

        if !self.notifier.is_configured() {
            tracing::error!("Missing Telegram bot token or chat id");
            return Err(ContactError::Configuration);
        }

        let text = compose_message(&submission.name, &submission.email, &submission.message);

        self.notifier.send(&text).await.map_err(|e| {
            tracing::error!("Error sending contact message: {}", e);
            ContactError::from(e)
        })?;

        tracing::info!(client_id, "Contact message forwarded");
        Ok(ContactResponse::sent())
    }
}
