use logtail_core::ConfigError;
use thiserror::Error;

/// Caller-visible controller failures. Fetch outcomes never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("controller has been disposed")]
    Disposed,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
