//! Simulated crawl support
//!
//! There is no real crawler. Jobs are completed with synthetic analysis
//! payloads drawn from a [`RandomSource`], and timestamps come from a
//! [`Clock`], so both can be replaced by deterministic fakes in tests.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use url::Url;

use crate::domain::payload::{AnalysisPayload, BrokenLink, HeadingCounts};

/// URLs used to seed a demo collection
pub const DEMO_URLS: [&str; 5] = [
    "https://example.com",
    "https://github.com",
    "https://stackoverflow.com",
    "https://developer.mozilla.org",
    "https://react.dev",
];

/// Broken links a synthetic payload may report, taken as a prefix
pub const BROKEN_LINK_SAMPLES: [(&str, u16); 3] = [
    ("/broken-page", 404),
    ("/server-error", 500),
    ("/forbidden", 403),
];

/// Source of timestamps for lifecycle transitions
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Source of randomness for the simulated crawl
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`
    fn between(&self, low: u32, high: u32) -> u32;

    /// `true` with probability `p` (clamped to `0.0..=1.0`)
    fn chance(&self, p: f64) -> bool;
}

/// Thread-local OS-seeded randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high.max(low))
    }

    fn chance(&self, p: f64) -> bool {
        rand::thread_rng().gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Reproducible randomness from a fixed seed
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn between(&self, low: u32, high: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high.max(low))
    }

    fn chance(&self, p: f64) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Generate the synthetic analysis for `url`
///
/// Ranges: h1 1-5, h2 2-11, h3 3-17, h4 0-7, h5 0-4, h6 0-2, internal links
/// 10-59, external links 5-24, 0-3 broken links, login form on a coin flip.
pub fn generate_payload(url: &str, random: &dyn RandomSource) -> AnalysisPayload {
    let host = Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());

    let heading_counts = HeadingCounts {
        h1: random.between(1, 5),
        h2: random.between(2, 11),
        h3: random.between(3, 17),
        h4: random.between(0, 7),
        h5: random.between(0, 4),
        h6: random.between(0, 2),
    };

    let broken = random.between(0, BROKEN_LINK_SAMPLES.len() as u32) as usize;
    let broken_links = BROKEN_LINK_SAMPLES[..broken]
        .iter()
        .map(|(path, code)| BrokenLink::new(*path, *code))
        .collect();

    AnalysisPayload {
        html_version: "HTML5".to_string(),
        title: format!("Sample Title for {}", host),
        heading_counts,
        internal_links: random.between(10, 59),
        external_links: random.between(5, 24),
        broken_links,
        has_login_form: random.chance(0.5),
    }
}
