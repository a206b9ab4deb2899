pub mod body_rules;
pub mod locator;
pub mod matcher;
pub mod notify;
pub mod resolver;

pub use body_rules::RequestViolation;
pub use resolver::{Outcome, Resolver};
