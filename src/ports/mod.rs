pub mod content_source;
pub mod notifier;
