pub mod loader;
pub mod models;
pub mod validation;

pub use models::{GuardedRule, MockConfig, NotificationPolicy, Rule};

/// Well-known name of the mock definition file inside a user repository.
///
/// A document whose `dbFile` equals this name serves response data out of the
/// definition document itself instead of a separate data file.
pub const DEFINITION_FILE: &str = "mockgate.yml";
