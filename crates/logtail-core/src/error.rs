//! Configuration errors. Raised at construction time, never at tick time.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("polling period must be a positive number of milliseconds")]
    ZeroPeriod,

    #[error("target must not be empty")]
    EmptyTarget,

    #[error("invalid target {target:?}: {detail}")]
    InvalidTarget { target: String, detail: String },
}
