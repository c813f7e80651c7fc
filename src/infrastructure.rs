pub mod cors;
pub mod limiter;
pub mod notify;
pub mod utils;
