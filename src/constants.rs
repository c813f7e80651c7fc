use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Admitted submissions allowed per client within one window.
pub const DEFAULT_SUBMISSION_LIMIT: usize = 2;

/// One hour, in milliseconds.
pub const DEFAULT_WINDOW_MS: i64 = 60 * 60 * 1000;

/// Upper bound on every contact field after trimming, counted in chars.
pub const MAX_FIELD_CHARS: usize = 1000;

/// Shared bucket for callers that carry no forwarding headers.
pub const UNKNOWN_CLIENT: &str = "unknown";

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
