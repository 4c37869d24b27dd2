use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ─── Target ───────────────────────────────────────────────────────

/// Identifier of a tailed log resource. Non-empty, a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Target(String);

impl Target {
    /// Parse a target identifier. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if trimmed.contains('/') {
            return Err(ConfigError::InvalidTarget {
                target: trimmed.to_string(),
                detail: "must not contain '/'".to_string(),
            });
        }
        if trimmed == "." || trimmed == ".." {
            return Err(ConfigError::InvalidTarget {
                target: trimmed.to_string(),
                detail: "relative path components are not targets".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Target {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.0
    }
}

// ─── Generation ───────────────────────────────────────────────────

/// Session generation. Bumped on every retarget so results from a
/// superseded session can be recognized and dropped.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

// ─── Fetch attempt ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    Success { body: String },
    Failure { message: String },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One completed read of a target, tagged with the generation of the
/// session that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAttempt {
    pub target: Target,
    pub generation: Generation,
    pub outcome: FetchOutcome,
    pub completed_at: DateTime<Utc>,
}

impl FetchAttempt {
    pub fn success(target: Target, generation: Generation, body: impl Into<String>) -> Self {
        Self {
            target,
            generation,
            outcome: FetchOutcome::Success { body: body.into() },
            completed_at: Utc::now(),
        }
    }

    pub fn failure(target: Target, generation: Generation, message: impl Into<String>) -> Self {
        Self {
            target,
            generation,
            outcome: FetchOutcome::Failure {
                message: message.into(),
            },
            completed_at: Utc::now(),
        }
    }
}
