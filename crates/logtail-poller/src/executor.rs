//! Fetch executor: one read per tick, always folded into a `FetchAttempt`.

use logtail_core::{FetchAttempt, Generation, Target};
use logtail_http::LogSource;

/// Read `target` once and tag the result with `generation`.
///
/// Transport and status failures become `FetchOutcome::Failure`; nothing is
/// filtered here, staleness is decided by the classifier.
pub async fn fetch_attempt(
    source: &dyn LogSource,
    target: &Target,
    generation: Generation,
) -> FetchAttempt {
    match source.fetch(target).await {
        Ok(body) => FetchAttempt::success(target.clone(), generation, body),
        Err(e) => {
            tracing::debug!("fetch failed for {target} ({generation}): {e}");
            FetchAttempt::failure(target.clone(), generation, e.to_string())
        }
    }
}
