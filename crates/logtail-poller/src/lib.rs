//! logtail-poller: live log tailing controller.
//! Polls one target at a fixed period, classifies each read as success or
//! failure, and publishes the latest accepted state. Retargeting tears the
//! previous session down; results from superseded sessions are dropped by
//! generation.

pub mod controller;
pub mod error;
pub mod executor;
pub mod publisher;
pub mod session;

pub use controller::TailController;
pub use error::ControllerError;
pub use executor::fetch_attempt;
pub use publisher::StatePublisher;
pub use session::PollSession;

pub use logtail_core::{ControllerState, Period, Phase, Target};
pub use logtail_http::{FetchError, LogSource};
