//! Overview counts

use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};

/// Total and per-status counts over an unfiltered job set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub queued: usize,
    pub running: usize,
    pub completed: usize,
    pub error: usize,
    pub stopped: usize,
}

impl StatusCounts {
    pub fn from_jobs<'a>(jobs: impl IntoIterator<Item = &'a Job>) -> Self {
        let mut counts = StatusCounts::default();
        for job in jobs {
            counts.total += 1;
            *counts.slot(job.status) += 1;
        }
        counts
    }

    pub fn get(&self, status: JobStatus) -> usize {
        match status {
            JobStatus::Queued => self.queued,
            JobStatus::Running => self.running,
            JobStatus::Completed => self.completed,
            JobStatus::Error => self.error,
            JobStatus::Stopped => self.stopped,
        }
    }

    fn slot(&mut self, status: JobStatus) -> &mut usize {
        match status {
            JobStatus::Queued => &mut self.queued,
            JobStatus::Running => &mut self.running,
            JobStatus::Completed => &mut self.completed,
            JobStatus::Error => &mut self.error,
            JobStatus::Stopped => &mut self.stopped,
        }
    }

    /// `(status, count)` pairs in overview order
    pub fn by_status(&self) -> [(JobStatus, usize); 5] {
        JobStatus::ALL.map(|status| (status, self.get(status)))
    }
}
