//! PollSession: one (target, generation, timer) run.
//!
//! The session owns its ticker task. Dropping the session aborts the ticker,
//! so retargeting and disposal share a single teardown path and the timer
//! cannot outlive its session. Fetches already in flight are not aborted;
//! their results come back tagged with the old generation and are dropped
//! by the publisher.

use std::sync::Arc;

use logtail_core::{Generation, Period, Target};
use logtail_http::LogSource;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::executor::fetch_attempt;
use crate::publisher::StatePublisher;

pub struct PollSession {
    target: Target,
    generation: Generation,
    period: Period,
    ticker: JoinHandle<()>,
}

impl PollSession {
    /// Spawn the ticker. The first tick fires one full period from now.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        target: Target,
        generation: Generation,
        period: Period,
        source: Arc<dyn LogSource>,
        publisher: StatePublisher,
    ) -> Self {
        tracing::debug!("poll session {generation} started for {target} every {period}");
        let ticker = tokio::spawn(run_ticker(
            target.clone(),
            generation,
            period,
            source,
            publisher,
        ));
        Self {
            target,
            generation,
            period,
            ticker,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.ticker.is_finished()
    }
}

impl std::fmt::Debug for PollSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollSession")
            .field("target", &self.target)
            .field("generation", &self.generation)
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.ticker.abort();
        tracing::debug!(
            "poll session {} stopped for {}",
            self.generation,
            self.target
        );
    }
}

async fn run_ticker(
    target: Target,
    generation: Generation,
    period: Period,
    source: Arc<dyn LogSource>,
    publisher: StatePublisher,
) {
    let every = period.as_duration();
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        // Superseded between abort and the next poll of this task.
        if publisher.generation() != generation {
            break;
        }
        publisher.begin_tick(generation);

        // Fetches may overlap; a slow read never holds back the next tick.
        let source = Arc::clone(&source);
        let publisher = publisher.clone();
        let target = target.clone();
        tokio::spawn(async move {
            let attempt = fetch_attempt(source.as_ref(), &target, generation).await;
            publisher.publish(&attempt);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use logtail_http::FetchError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LogSource for Counting {
        async fn fetch(&self, target: &Target) -> Result<String, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(format!("{target} #{n}"))
        }

        async fn list_targets(&self) -> Result<Vec<String>, FetchError> {
            Ok(Vec::new())
        }
    }

    fn start(source: &Arc<Counting>, publisher: &StatePublisher, ms: u64) -> PollSession {
        let target = Target::parse("a.log").expect("valid target");
        let generation = publisher.retarget(Some(target.clone()));
        let source: Arc<dyn LogSource> = Arc::clone(source) as Arc<dyn LogSource>;
        PollSession::start(
            target,
            generation,
            Period::from_millis(ms).expect("period"),
            source,
            publisher.clone(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_waits_one_period() {
        let source = Arc::new(Counting::default());
        let publisher = StatePublisher::new();
        let _session = start(&source, &publisher, 100);

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(publisher.snapshot().last_content.as_deref(), Some("a.log #1"));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_period() {
        let source = Arc::new(Counting::default());
        let publisher = StatePublisher::new();
        let _session = start(&source, &publisher, 100);

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_stops_ticking() {
        let source = Arc::new(Counting::default());
        let publisher = StatePublisher::new();
        let session = start(&source, &publisher, 100);

        tokio::time::sleep(Duration::from_millis(250)).await;
        drop(session);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_ticker_exits() {
        let source = Arc::new(Counting::default());
        let publisher = StatePublisher::new();
        let session = start(&source, &publisher, 100);

        publisher.retarget(None);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(session.is_finished());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn accessors_report_session() {
        let source = Arc::new(Counting::default());
        let publisher = StatePublisher::new();
        let session = start(&source, &publisher, 250);

        assert_eq!(session.target().as_str(), "a.log");
        assert_eq!(session.generation(), publisher.generation());
        assert_eq!(session.period().as_millis(), 250);
        assert!(format!("{session:?}").contains("a.log"));
    }
}
