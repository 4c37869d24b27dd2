//! logtail-http: log data collaborator IO boundary.
//! Reads the current content of a log target and lists available targets
//! over the dashboard HTTP API. No polling logic — pure IO boundary.

pub mod client;
pub mod error;
pub mod source;

pub use client::HttpLogSource;
pub use error::FetchError;
pub use source::LogSource;
