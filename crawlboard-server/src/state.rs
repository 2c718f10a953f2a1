//! Shared application state

use std::sync::Arc;

use crawlboard_core::simulation::{RandomSource, SeededRandom, ThreadRandom};

use crate::config::Config;
use crate::repository::{InMemoryJobRepository, JobRepository};
use crate::scheduler::{CrawlScheduler, SchedulerSettings, TokioClock};

/// State handed to every handler and service call
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn JobRepository>,
    pub scheduler: CrawlScheduler,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire up the in-memory repository and scheduler described by `config`
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(config: Config) -> Self {
        let random: Arc<dyn RandomSource> = match config.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };
        Self::with_random(config, random)
    }

    pub fn with_random(config: Config, random: Arc<dyn RandomSource>) -> Self {
        let repository: Arc<dyn JobRepository> =
            Arc::new(InMemoryJobRepository::new(Arc::new(TokioClock::new())));
        let scheduler = CrawlScheduler::new(
            Arc::clone(&repository),
            random,
            SchedulerSettings::from(&config),
        );

        Self {
            repository,
            scheduler,
            config: Arc::new(config),
        }
    }
}
