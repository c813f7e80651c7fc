pub mod notifier;
pub mod submission;
