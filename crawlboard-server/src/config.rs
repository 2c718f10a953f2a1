//! Server configuration
//!
//! Defines the bind address and the timing of the simulated crawl.
//! Every value has a default and can be overridden from the environment.

use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP API listens on
    pub bind_addr: String,

    /// Delay between submitting a job and its automatic start
    pub auto_start_delay: Duration,

    /// How often running jobs are considered for completion
    pub tick_interval: Duration,

    /// Chance that a running job completes on a given tick
    pub completion_probability: f64,

    /// Auto-start delay of the first demo job
    pub demo_start_delay: Duration,

    /// Extra auto-start delay added per subsequent demo job
    pub demo_stagger: Duration,

    /// Seed for reproducible synthetic results; OS randomness when unset
    pub seed: Option<u64>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(bind_addr: String) -> Self {
        Self {
            bind_addr,
            auto_start_delay: Duration::from_millis(1000),
            tick_interval: Duration::from_millis(2000),
            completion_probability: 0.3,
            demo_start_delay: Duration::from_millis(2000),
            demo_stagger: Duration::from_millis(500),
            seed: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables (all optional):
    /// - CRAWLBOARD_BIND_ADDR (default: 0.0.0.0:8080)
    /// - CRAWLBOARD_AUTO_START_MS (default: 1000)
    /// - CRAWLBOARD_TICK_MS (default: 2000)
    /// - CRAWLBOARD_COMPLETION_PROBABILITY (default: 0.3)
    /// - CRAWLBOARD_SEED (default: unset)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("CRAWLBOARD_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let mut config = Self::new(bind_addr);

        if let Some(delay) = env_millis("CRAWLBOARD_AUTO_START_MS")? {
            config.auto_start_delay = delay;
        }

        if let Some(interval) = env_millis("CRAWLBOARD_TICK_MS")? {
            config.tick_interval = interval;
        }

        if let Ok(raw) = std::env::var("CRAWLBOARD_COMPLETION_PROBABILITY") {
            config.completion_probability = raw.trim().parse().map_err(|_| {
                anyhow::anyhow!("CRAWLBOARD_COMPLETION_PROBABILITY must be a number, got '{}'", raw)
            })?;
        }

        if let Ok(raw) = std::env::var("CRAWLBOARD_SEED") {
            let seed = raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("CRAWLBOARD_SEED must be an integer, got '{}'", raw))?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.trim().is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.tick_interval.is_zero() {
            anyhow::bail!("tick_interval must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.completion_probability) {
            anyhow::bail!(
                "completion_probability must be between 0 and 1, got {}",
                self.completion_probability
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("0.0.0.0:8080".to_string())
    }
}

fn env_millis(name: &str) -> anyhow::Result<Option<Duration>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| anyhow::anyhow!("{} must be a number of milliseconds, got '{}'", name, raw)),
        Err(_) => Ok(None),
    }
}
