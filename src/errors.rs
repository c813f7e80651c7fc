use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use validator::ValidationErrors;

/// Failures of the contact pipeline, each mapped to the status a caller sees.
#[derive(Debug, Display, PartialEq)]
pub enum ContactError {
    #[display("Too many submissions. Please try again later.")]
    RateLimited,

    #[display("{_0}")]
    Validation(String),

    #[display("Server configuration error")]
    Configuration,

    // Detail is logged where the failure happens, never rendered.
    #[display("Failed to send message. Please try again.")]
    Upstream(String),
}

impl ResponseError for ContactError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(serde_json::json!({"error": self.to_string()}))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
            ContactError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ContactError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<ValidationErrors> for ContactError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errors| errors.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid value".to_string());

        ContactError::Validation(message)
    }
}

impl From<NotifyError> for ContactError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::NotConfigured => ContactError::Configuration,
            other => ContactError::Upstream(other.to_string()),
        }
    }
}

#[derive(Debug, Display)]
pub enum NotifyError {
    #[display("Notification credentials are not configured")]
    NotConfigured,

    #[display("Notification endpoint returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[display("Notification request failed: {_0}")]
    Transport(String),

    #[display("Invalid notification endpoint: {_0}")]
    InvalidEndpoint(String),
}

impl std::error::Error for NotifyError {}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for NotifyError {
    fn from(err: url::ParseError) -> Self {
        NotifyError::InvalidEndpoint(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum StoreError {
    #[display("Redis connection failed: {_0}")]
    Connection(String),

    #[display("Redis operation failed: {_0}")]
    Operation(String),
}

impl std::error::Error for StoreError {}

impl From<deadpool_redis::PoolError> for StoreError {
    fn from(err: deadpool_redis::PoolError) -> Self {
        StoreError::Connection(err.to_string())
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Operation(err.to_string())
    }
}
