//! logtail-core: pure types for the live log tailing controller.
//! Targets, generations, polling periods, fetch attempts, and the
//! observable controller state with its result classifier. No IO, no async.

pub mod error;
pub mod period;
pub mod state;
pub mod types;

pub use error::ConfigError;
pub use period::Period;
pub use state::{ControllerState, Phase};
pub use types::{FetchAttempt, FetchOutcome, Generation, Target};
