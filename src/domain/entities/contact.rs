use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::contact_rules::{sanitize_input, EMAIL_REGEX};
use crate::errors::ContactError;

/// Raw contact form body. A field that is absent, `null` or not a string
/// decodes as `None`, so it surfaces as a validation error after admission
/// instead of a JSON error before it.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct ContactPayload {
    #[serde(default, deserialize_with = "text_or_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "text_or_none")]
    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email address"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "text_or_none")]
    pub message: Option<String>,
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn is_missing(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

impl ContactPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        ContactPayload {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    /// Required fields first, then the email pattern.
    pub fn check(&self) -> Result<(), ContactError> {
        if is_missing(&self.name) || is_missing(&self.email) || is_missing(&self.message) {
            return Err(ContactError::Validation("All fields are required".to_string()));
        }

        self.validate()?;
        Ok(())
    }

    /// Validates and sanitizes the payload into a submission ready to forward.
    pub fn into_submission(self) -> Result<ContactSubmission, ContactError> {
        self.check()?;

        Ok(ContactSubmission {
            name: sanitize_input(self.name.as_deref().unwrap_or_default()),
            email: sanitize_input(self.email.as_deref().unwrap_or_default()),
            message: sanitize_input(self.message.as_deref().unwrap_or_default()),
        })
    }
}

/// A validated, sanitized submission. Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

impl ContactResponse {
    pub fn sent() -> Self {
        ContactResponse {
            success: true,
            message: "Message sent successfully".to_string(),
        }
    }
}
