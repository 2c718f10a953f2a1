//! Status lifecycle
//!
//! Every change to a job's status goes through [`apply`]. Transitions that do
//! not make sense for the job's current status are silently ignored and
//! reported as [`Outcome::NoOp`]; only unknown ids or unknown action names are
//! errors, and those are raised by the callers.
//!
//! | From              | To        | Transition  |
//! |-------------------|-----------|-------------|
//! | queued, stopped   | running   | `Start`     |
//! | queued            | running   | `AutoStart` |
//! | running           | stopped   | `Stop`      |
//! | running           | completed | `Complete`  |
//! | any               | queued    | `Rerun`     |
//!
//! Nothing here ever moves a job into `error`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};
use crate::domain::payload::AnalysisPayload;
use crate::error::{CrawlError, Result};

/// A requested status change
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Start,
    /// Scheduled start armed at submission; never revives a stopped job
    AutoStart,
    Stop,
    Complete(AnalysisPayload),
    Rerun,
}

impl Transition {
    /// Whether this transition applies to a job in `status`
    pub fn is_allowed_from(&self, status: JobStatus) -> bool {
        match self {
            Transition::Start => matches!(status, JobStatus::Queued | JobStatus::Stopped),
            Transition::AutoStart => status == JobStatus::Queued,
            Transition::Stop | Transition::Complete(_) => status == JobStatus::Running,
            Transition::Rerun => true,
        }
    }

    /// Status the job ends up in when the transition applies
    pub fn target(&self) -> JobStatus {
        match self {
            Transition::Start | Transition::AutoStart => JobStatus::Running,
            Transition::Stop => JobStatus::Stopped,
            Transition::Complete(_) => JobStatus::Completed,
            Transition::Rerun => JobStatus::Queued,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transition::Start => "start",
            Transition::AutoStart => "auto-start",
            Transition::Stop => "stop",
            Transition::Complete(_) => "complete",
            Transition::Rerun => "rerun",
        }
    }
}

/// Whether a transition changed the job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Applied,
    NoOp,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

/// Apply `transition` to `job` at time `now`
pub fn apply(job: &mut Job, transition: Transition, now: DateTime<Utc>) -> Outcome {
    if !transition.is_allowed_from(job.status) {
        return Outcome::NoOp;
    }

    job.status = transition.target();

    match transition {
        Transition::Start | Transition::AutoStart => {
            job.started_at = Some(now);
        }
        Transition::Stop => {}
        Transition::Complete(payload) => {
            job.completed_at = Some(now);
            job.data = Some(payload);
        }
        Transition::Rerun => {
            job.data = None;
            job.started_at = None;
            job.completed_at = None;
        }
    }

    Outcome::Applied
}

/// Action a user may trigger on a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobAction {
    Start,
    Stop,
    Rerun,
}

impl JobAction {
    pub fn as_str(self) -> &'static str {
        match self {
            JobAction::Start => "start",
            JobAction::Stop => "stop",
            JobAction::Rerun => "rerun",
        }
    }
}

impl From<JobAction> for Transition {
    fn from(action: JobAction) -> Self {
        match action {
            JobAction::Start => Transition::Start,
            JobAction::Stop => Transition::Stop,
            JobAction::Rerun => Transition::Rerun,
        }
    }
}

impl std::fmt::Display for JobAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobAction {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(JobAction::Start),
            "stop" => Ok(JobAction::Stop),
            "rerun" => Ok(JobAction::Rerun),
            _ => Err(CrawlError::InvalidAction(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::HeadingCounts;
    use chrono::Duration;

    fn payload() -> AnalysisPayload {
        AnalysisPayload {
            html_version: "HTML5".to_string(),
            title: "Sample Title for example.com".to_string(),
            heading_counts: HeadingCounts::default(),
            internal_links: 10,
            external_links: 5,
            broken_links: Vec::new(),
            has_login_form: false,
        }
    }

    fn job_in(status: JobStatus) -> Job {
        let mut job = Job::new("https://example.com", Utc::now());
        job.status = status;
        job
    }

    #[test]
    fn test_stop_on_queued_is_noop() {
        let mut job = job_in(JobStatus::Queued);
        let before = job.clone();

        assert_eq!(apply(&mut job, Transition::Stop, Utc::now()), Outcome::NoOp);
        assert_eq!(job, before);
    }

    #[test]
    fn test_start_on_queued_sets_started_at() {
        let created = Utc::now();
        let mut job = Job::new("https://example.com", created);
        let now = created + Duration::seconds(1);

        assert_eq!(apply(&mut job, Transition::Start, now), Outcome::Applied);
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.started_at, Some(now));
        assert!(job.data.is_none());
    }

    #[test]
    fn test_start_on_completed_is_noop() {
        let mut job = job_in(JobStatus::Completed);
        assert_eq!(apply(&mut job, Transition::Start, Utc::now()), Outcome::NoOp);
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[test]
    fn test_start_on_stopped_overwrites_started_at() {
        let mut job = job_in(JobStatus::Queued);
        let first = Utc::now();
        let second = first + Duration::seconds(5);

        apply(&mut job, Transition::Start, first);
        apply(&mut job, Transition::Stop, first);
        assert_eq!(job.status, JobStatus::Stopped);

        assert_eq!(apply(&mut job, Transition::Start, second), Outcome::Applied);
        assert_eq!(job.started_at, Some(second));
    }

    #[test]
    fn test_auto_start_only_from_queued() {
        let mut queued = job_in(JobStatus::Queued);
        let now = Utc::now();
        assert_eq!(apply(&mut queued, Transition::AutoStart, now), Outcome::Applied);
        assert_eq!(queued.status, JobStatus::Running);
        assert_eq!(queued.started_at, Some(now));

        for status in [
            JobStatus::Running,
            JobStatus::Stopped,
            JobStatus::Completed,
            JobStatus::Error,
        ] {
            let mut job = job_in(status);
            let before = job.clone();
            assert_eq!(apply(&mut job, Transition::AutoStart, now), Outcome::NoOp);
            assert_eq!(job, before);
        }
    }

    #[test]
    fn test_complete_only_from_running() {
        let mut queued = job_in(JobStatus::Queued);
        assert_eq!(
            apply(&mut queued, Transition::Complete(payload()), Utc::now()),
            Outcome::NoOp
        );
        assert!(queued.data.is_none());

        let mut stopped = job_in(JobStatus::Stopped);
        assert_eq!(
            apply(&mut stopped, Transition::Complete(payload()), Utc::now()),
            Outcome::NoOp
        );

        let mut running = job_in(JobStatus::Running);
        let now = Utc::now();
        assert_eq!(
            apply(&mut running, Transition::Complete(payload()), now),
            Outcome::Applied
        );
        assert_eq!(running.status, JobStatus::Completed);
        assert_eq!(running.completed_at, Some(now));
        assert_eq!(running.data, Some(payload()));
    }

    #[test]
    fn test_rerun_resets_run_state_and_keeps_identity() {
        let mut job = Job::new("https://example.com", Utc::now());
        let (id, url, created_at) = (job.id, job.url.clone(), job.created_at);

        apply(&mut job, Transition::Start, Utc::now());
        apply(&mut job, Transition::Complete(payload()), Utc::now());
        assert_eq!(apply(&mut job, Transition::Rerun, Utc::now()), Outcome::Applied);

        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.data.is_none());
        assert!(job.started_at.is_none());
        assert!(job.completed_at.is_none());
        assert_eq!((job.id, job.url.as_str(), job.created_at), (id, url.as_str(), created_at));
    }

    #[test]
    fn test_error_jobs_only_leave_by_rerun() {
        for transition in [Transition::Start, Transition::Stop, Transition::Complete(payload())] {
            let mut job = job_in(JobStatus::Error);
            assert_eq!(apply(&mut job, transition, Utc::now()), Outcome::NoOp);
        }

        let mut job = job_in(JobStatus::Error);
        assert_eq!(apply(&mut job, Transition::Rerun, Utc::now()), Outcome::Applied);
    }

    #[test]
    fn test_no_transition_targets_error() {
        for transition in [
            Transition::Start,
            Transition::AutoStart,
            Transition::Stop,
            Transition::Complete(payload()),
            Transition::Rerun,
        ] {
            assert_ne!(transition.target(), JobStatus::Error);
        }
    }

    #[test]
    fn test_parse_action() {
        assert_eq!("start".parse::<JobAction>(), Ok(JobAction::Start));
        assert_eq!("STOP".parse::<JobAction>(), Ok(JobAction::Stop));
        assert_eq!(" rerun ".parse::<JobAction>(), Ok(JobAction::Rerun));
        assert_eq!(
            "explode".parse::<JobAction>(),
            Err(CrawlError::InvalidAction("explode".to_string()))
        );
    }
}
