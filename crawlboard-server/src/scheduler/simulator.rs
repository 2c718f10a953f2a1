//! Crawl simulator
//!
//! Newly submitted jobs get a one-shot auto-start timer. A single ticker
//! walks the running jobs on a fixed interval and completes each one with
//! the configured probability. Every timer and the ticker hang off one root
//! cancellation token, so shutdown stops all of them.
//!
//! Timers never assume the job is still in the state it was in when they
//! were armed: they go through the repository's checked transitions, which
//! turn stale starts and completions into no-ops.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crawlboard_core::domain::job::JobStatus;
use crawlboard_core::domain::lifecycle::{Outcome, Transition};
use crawlboard_core::simulation::{RandomSource, generate_payload};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::Config;
use crate::repository::JobRepository;

/// Timing knobs of the simulated crawl
#[derive(Debug, Clone)]
pub struct SchedulerSettings {
    pub auto_start_delay: Duration,
    pub tick_interval: Duration,
    pub completion_probability: f64,
}

impl From<&Config> for SchedulerSettings {
    fn from(config: &Config) -> Self {
        Self {
            auto_start_delay: config.auto_start_delay,
            tick_interval: config.tick_interval,
            completion_probability: config.completion_probability,
        }
    }
}

/// Owns the auto-start timers and the completion ticker
#[derive(Clone)]
pub struct CrawlScheduler {
    repository: Arc<dyn JobRepository>,
    random: Arc<dyn RandomSource>,
    settings: SchedulerSettings,
    shutdown: CancellationToken,
    pending: Arc<Mutex<HashMap<Uuid, CancellationToken>>>,
}

impl CrawlScheduler {
    pub fn new(
        repository: Arc<dyn JobRepository>,
        random: Arc<dyn RandomSource>,
        settings: SchedulerSettings,
    ) -> Self {
        Self {
            repository,
            random,
            settings,
            shutdown: CancellationToken::new(),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Arm the default auto-start timer for a newly created job
    pub fn schedule_default_start(&self, id: Uuid) {
        self.schedule_auto_start(id, self.settings.auto_start_delay);
    }

    /// Start job `id` after `delay` unless cancelled first
    ///
    /// Re-arming an id replaces its previous timer.
    pub fn schedule_auto_start(&self, id: Uuid, delay: Duration) {
        let token = self.shutdown.child_token();
        {
            let mut pending = self.pending_lock();
            if let Some(previous) = pending.insert(id, token.clone()) {
                previous.cancel();
            }
        }

        debug!("Auto-start for job {} armed ({:?})", id, delay);

        let repository = Arc::clone(&self.repository);
        let pending = Arc::clone(&self.pending);

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Auto-start for job {} cancelled", id);
                    return;
                }
                _ = time::sleep(delay) => {}
            }

            {
                let mut pending = pending.lock().unwrap_or_else(PoisonError::into_inner);
                // Cancelled while waking up; a replacement may own the entry now
                if token.is_cancelled() {
                    return;
                }
                pending.remove(&id);
            }

            match repository.transition(id, Transition::AutoStart).await {
                Ok((Outcome::Applied, _)) => info!("Job {} started", id),
                Ok((Outcome::NoOp, job)) => {
                    debug!("Auto-start for job {} skipped, job is {}", id, job.status)
                }
                Err(e) => debug!("Auto-start for job {} dropped: {}", id, e),
            }
        });
    }

    /// Disarm the auto-start timer of `id`, if any
    pub fn cancel(&self, id: Uuid) -> bool {
        match self.pending_lock().remove(&id) {
            Some(token) => {
                token.cancel();
                debug!("Auto-start for job {} disarmed", id);
                true
            }
            None => false,
        }
    }

    /// Number of auto-start timers still waiting
    pub fn pending_count(&self) -> usize {
        self.pending_lock().len()
    }

    /// Run one completion pass over the running jobs
    ///
    /// Returns the number of jobs that completed.
    pub async fn tick_once(&self) -> usize {
        let running = self.repository.find_by_status(JobStatus::Running).await;
        let mut completed = 0;

        for job in running {
            if !self.random.chance(self.settings.completion_probability) {
                continue;
            }

            let payload = generate_payload(&job.url, self.random.as_ref());
            match self
                .repository
                .transition(job.id, Transition::Complete(payload))
                .await
            {
                Ok((Outcome::Applied, _)) => {
                    info!("Job {} completed", job.id);
                    completed += 1;
                }
                Ok((Outcome::NoOp, current)) => {
                    debug!("Job {} left running before completion ({})", job.id, current.status)
                }
                Err(e) => debug!("Job {} gone before completion: {}", job.id, e),
            }
        }

        completed
    }

    /// Spawn the completion ticker
    pub fn spawn_ticker(&self) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move { scheduler.run_ticker().await })
    }

    async fn run_ticker(&self) {
        info!(
            "Starting crawl simulator (tick: {:?}, completion probability: {})",
            self.settings.tick_interval, self.settings.completion_probability
        );

        let period = self.settings.tick_interval;
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Crawl simulator stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let completed = self.tick_once().await;
                    if completed > 0 {
                        info!("Completed {} job(s) this tick", completed);
                    } else {
                        debug!("Simulator tick, nothing completed");
                    }
                }
            }
        }
    }

    /// Cancel the ticker and every pending timer
    pub fn shutdown(&self) {
        info!("Shutting down crawl scheduler");
        self.shutdown.cancel();
        self.pending_lock().clear();
    }

    fn pending_lock(&self) -> MutexGuard<'_, HashMap<Uuid, CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryJobRepository;
    use crate::scheduler::TokioClock;

    /// Completes every running job, always draws the lower bound
    struct AlwaysComplete;

    impl RandomSource for AlwaysComplete {
        fn between(&self, low: u32, _high: u32) -> u32 {
            low
        }

        fn chance(&self, _p: f64) -> bool {
            true
        }
    }

    struct NeverComplete;

    impl RandomSource for NeverComplete {
        fn between(&self, low: u32, _high: u32) -> u32 {
            low
        }

        fn chance(&self, _p: f64) -> bool {
            false
        }
    }

    fn settings() -> SchedulerSettings {
        SchedulerSettings {
            auto_start_delay: Duration::from_millis(1000),
            tick_interval: Duration::from_millis(2000),
            completion_probability: 0.3,
        }
    }

    fn scheduler(random: Arc<dyn RandomSource>) -> (CrawlScheduler, Arc<dyn JobRepository>) {
        let repository: Arc<dyn JobRepository> =
            Arc::new(InMemoryJobRepository::new(Arc::new(TokioClock::new())));
        let scheduler = CrawlScheduler::new(Arc::clone(&repository), random, settings());
        (scheduler, repository)
    }

    /// Let spawned tasks observe the current (paused) time
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_to_completion() {
        let (scheduler, repository) = scheduler(Arc::new(AlwaysComplete));
        let ticker = scheduler.spawn_ticker();

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_default_start(job.id);

        time::sleep(Duration::from_millis(1100)).await;
        settle().await;
        assert_eq!(
            repository.find_by_id(job.id).await.unwrap().status,
            JobStatus::Running
        );

        time::sleep(Duration::from_millis(1000)).await;
        settle().await;

        let done = repository.find_by_id(job.id).await.unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        let data = done.data.as_ref().unwrap();
        assert!((1..=5).contains(&data.heading_counts.h1));
        let started = done.started_at.unwrap();
        let completed = done.completed_at.unwrap();
        assert!(started >= done.created_at);
        assert!(completed >= started);

        scheduler.shutdown();
        ticker.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_auto_start_never_fires() {
        let (scheduler, repository) = scheduler(Arc::new(AlwaysComplete));

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_default_start(job.id);
        assert_eq!(scheduler.pending_count(), 1);

        repository.delete(job.id).await.unwrap();
        assert!(scheduler.cancel(job.id));

        time::sleep(Duration::from_secs(5)).await;
        settle().await;

        assert!(repository.list_all().await.is_empty());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_start_on_deleted_job_is_dropped() {
        let (scheduler, repository) = scheduler(Arc::new(AlwaysComplete));

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_default_start(job.id);
        repository.delete(job.id).await.unwrap();

        time::sleep(Duration::from_secs(2)).await;
        settle().await;

        assert!(repository.find_by_id(job.id).await.is_none());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_auto_start_never_revives_stopped_job() {
        let (scheduler, repository) = scheduler(Arc::new(NeverComplete));

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_default_start(job.id);

        // Straight through the repository, leaving the timer armed
        repository.transition(job.id, Transition::Start).await.unwrap();
        repository.transition(job.id, Transition::Stop).await.unwrap();
        assert_eq!(scheduler.pending_count(), 1);

        time::sleep(Duration::from_millis(1100)).await;
        settle().await;

        let job = repository.find_by_id(job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Stopped);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_job_is_not_completed() {
        let (scheduler, repository) = scheduler(Arc::new(AlwaysComplete));
        let ticker = scheduler.spawn_ticker();

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        repository.transition(job.id, Transition::Start).await.unwrap();
        repository.transition(job.id, Transition::Stop).await.unwrap();

        time::sleep(Duration::from_millis(4500)).await;
        settle().await;

        let job = repository.find_by_id(job.id).await.unwrap();
        assert_eq!(job.status, JobStatus::Stopped);
        assert!(job.data.is_none());

        scheduler.shutdown();
        ticker.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_respects_probability() {
        let (scheduler, repository) = scheduler(Arc::new(NeverComplete));

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        repository.transition(job.id, Transition::Start).await.unwrap();

        assert_eq!(scheduler.tick_once().await, 0);
        assert_eq!(
            repository.find_by_id(job.id).await.unwrap().status,
            JobStatus::Running
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_replaces_previous_timer() {
        let (scheduler, repository) = scheduler(Arc::new(NeverComplete));

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_auto_start(job.id, Duration::from_millis(500));
        scheduler.schedule_auto_start(job.id, Duration::from_millis(3000));
        assert_eq!(scheduler.pending_count(), 1);

        time::sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert_eq!(
            repository.find_by_id(job.id).await.unwrap().status,
            JobStatus::Queued
        );

        time::sleep(Duration::from_millis(2500)).await;
        settle().await;
        assert_eq!(
            repository.find_by_id(job.id).await.unwrap().status,
            JobStatus::Running
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_disarms_everything() {
        let (scheduler, repository) = scheduler(Arc::new(AlwaysComplete));
        let ticker = scheduler.spawn_ticker();

        let job = repository.create("https://example.com".to_string()).await.unwrap();
        scheduler.schedule_default_start(job.id);

        scheduler.shutdown();
        ticker.await.unwrap();

        time::sleep(Duration::from_secs(5)).await;
        settle().await;

        assert_eq!(
            repository.find_by_id(job.id).await.unwrap().status,
            JobStatus::Queued
        );
        assert_eq!(scheduler.pending_count(), 0);
    }
}
