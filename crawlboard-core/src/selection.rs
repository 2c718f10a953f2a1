//! Bulk selection and batch actions
//!
//! A [`Selection`] only ever holds ids. "Select all" takes exactly the ids of
//! the currently visible (filtered) view; changing the filter afterwards does
//! not prune ids that fell out of view. A batch action applies the single-job
//! transition to every selected id independently, with no rollback.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::collection::JobCollection;
use crate::domain::lifecycle::{JobAction, Outcome, Transition};
use crate::error::CrawlError;

/// Set of selected job ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<Uuid>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with exactly the visible ids
    pub fn select_all(&mut self, visible: impl IntoIterator<Item = Uuid>) {
        self.ids = visible.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Flip one id, returning whether it is now selected
    pub fn toggle(&mut self, id: Uuid) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Row checkbox: select or deselect one id
    pub fn set(&mut self, id: Uuid, checked: bool) {
        if checked {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.ids.iter().copied()
    }

    /// Header checkbox state: a non-empty visible set that is entirely selected
    pub fn all_selected(&self, visible: impl IntoIterator<Item = Uuid>) -> bool {
        let mut any = false;
        for id in visible {
            any = true;
            if !self.ids.contains(&id) {
                return false;
            }
        }
        any
    }
}

impl FromIterator<Uuid> for Selection {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Action applied to every selected job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    Start,
    Stop,
    Rerun,
    Delete,
}

impl BulkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            BulkAction::Start => "start",
            BulkAction::Stop => "stop",
            BulkAction::Rerun => "rerun",
            BulkAction::Delete => "delete",
        }
    }

    /// Lifecycle transition behind the action; `None` for delete
    pub fn transition(self) -> Option<Transition> {
        match self {
            BulkAction::Start => Some(Transition::Start),
            BulkAction::Stop => Some(Transition::Stop),
            BulkAction::Rerun => Some(Transition::Rerun),
            BulkAction::Delete => None,
        }
    }
}

impl From<JobAction> for BulkAction {
    fn from(action: JobAction) -> Self {
        match action {
            JobAction::Start => BulkAction::Start,
            JobAction::Stop => BulkAction::Stop,
            JobAction::Rerun => BulkAction::Rerun,
        }
    }
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BulkAction {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("delete") {
            return Ok(BulkAction::Delete);
        }
        s.parse::<JobAction>().map(BulkAction::from)
    }
}

/// What a batch did to each selected id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkReport {
    pub action: BulkAction,
    /// Ids whose job changed (or was removed), in collection order
    pub applied: Vec<Uuid>,
    /// Ids whose job was present but the action did not apply to its status
    pub skipped: Vec<Uuid>,
    /// Selected ids that are no longer in the collection
    pub missing: Vec<Uuid>,
}

impl BulkReport {
    fn new(action: BulkAction) -> Self {
        Self {
            action,
            applied: Vec::new(),
            skipped: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Apply `action` to every job in `selection`
///
/// Members are visited in collection order and each succeeds or no-ops on
/// its own. A delete batch clears the selection afterwards.
pub fn apply_bulk(
    collection: &mut JobCollection,
    selection: &mut Selection,
    action: BulkAction,
    now: DateTime<Utc>,
) -> BulkReport {
    let mut report = BulkReport::new(action);

    let targets: Vec<Uuid> = collection
        .iter()
        .map(|job| job.id)
        .filter(|id| selection.contains(*id))
        .collect();
    report.missing = selection
        .ids()
        .filter(|id| !collection.contains(*id))
        .collect();

    match action.transition() {
        Some(transition) => {
            for id in targets {
                match collection.apply(id, transition.clone(), now) {
                    Ok((Outcome::Applied, _)) => report.applied.push(id),
                    Ok((Outcome::NoOp, _)) => report.skipped.push(id),
                    Err(_) => report.missing.push(id),
                }
            }
        }
        None => {
            for id in targets {
                if collection.remove(id).is_some() {
                    report.applied.push(id);
                }
            }
            selection.clear();
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{Job, JobStatus};
    use crate::view::{Filter, StatusFilter, filter_jobs};

    fn collection(urls: &[&str]) -> JobCollection {
        urls.iter().map(|url| Job::new(*url, Utc::now())).collect()
    }

    fn visible_ids(collection: &JobCollection, filter: &Filter) -> Vec<Uuid> {
        filter_jobs(collection.as_slice(), filter)
            .iter()
            .map(|job| job.id)
            .collect()
    }

    #[test]
    fn test_select_all_takes_only_visible_ids() {
        let jobs = collection(&["https://alpha.test", "https://beta.test", "https://alpha.org"]);
        let filter = Filter::new(StatusFilter::All, "alpha");

        let mut selection = Selection::new();
        selection.select_all(visible_ids(&jobs, &filter));

        assert_eq!(selection.len(), 2);
        assert!(!selection.contains(jobs.as_slice()[1].id));
    }

    #[test]
    fn test_clearing_filter_does_not_expand_selection() {
        let jobs = collection(&["https://alpha.test", "https://beta.test"]);

        let mut selection = Selection::new();
        selection.select_all(visible_ids(&jobs, &Filter::new(StatusFilter::All, "alpha")));
        let before = selection.clone();

        let now_visible = visible_ids(&jobs, &Filter::default());
        assert_eq!(now_visible.len(), 2);
        assert_eq!(selection, before);
        assert!(!selection.all_selected(now_visible));
    }

    #[test]
    fn test_select_all_replaces_previous_selection() {
        let jobs = collection(&["https://a.test", "https://b.test"]);
        let ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();

        let mut selection = Selection::new();
        selection.set(ids[0], true);
        selection.select_all([ids[1]]);

        assert!(!selection.contains(ids[0]));
        assert!(selection.contains(ids[1]));
    }

    #[test]
    fn test_toggle_and_set() {
        let id = Uuid::new_v4();
        let mut selection = Selection::new();

        assert!(selection.toggle(id));
        assert!(selection.contains(id));
        assert!(!selection.toggle(id));
        assert!(selection.is_empty());

        selection.set(id, true);
        selection.set(id, true);
        assert_eq!(selection.len(), 1);
        selection.set(id, false);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_all_selected_needs_rows() {
        let selection = Selection::new();
        assert!(!selection.all_selected(std::iter::empty()));
    }

    #[test]
    fn test_bulk_stop_applies_only_where_valid() {
        let mut jobs = collection(&["https://a.test", "https://b.test"]);
        let ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
        jobs.apply(ids[0], Transition::Start, Utc::now()).unwrap();

        let mut selection: Selection = ids.iter().copied().collect();
        let report = apply_bulk(&mut jobs, &mut selection, BulkAction::Stop, Utc::now());

        assert_eq!(report.applied, vec![ids[0]]);
        assert_eq!(report.skipped, vec![ids[1]]);
        assert!(report.missing.is_empty());
        assert_eq!(jobs.get(ids[0]).unwrap().status, JobStatus::Stopped);
        assert_eq!(jobs.get(ids[1]).unwrap().status, JobStatus::Queued);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_bulk_delete_clears_selection_and_reports_missing() {
        let mut jobs = collection(&["https://a.test", "https://b.test", "https://c.test"]);
        let ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
        let ghost = Uuid::new_v4();

        let mut selection: Selection = [ids[0], ids[2], ghost].into_iter().collect();
        let report = apply_bulk(&mut jobs, &mut selection, BulkAction::Delete, Utc::now());

        assert_eq!(report.applied, vec![ids[0], ids[2]]);
        assert_eq!(report.missing, vec![ghost]);
        assert!(selection.is_empty());
        assert_eq!(jobs.len(), 1);
        assert!(jobs.contains(ids[1]));
    }

    #[test]
    fn test_bulk_rerun_requeues_everything_selected() {
        let mut jobs = collection(&["https://a.test", "https://b.test"]);
        let ids: Vec<Uuid> = jobs.iter().map(|j| j.id).collect();
        jobs.apply(ids[0], Transition::Start, Utc::now()).unwrap();

        let mut selection: Selection = ids.iter().copied().collect();
        let report = apply_bulk(&mut jobs, &mut selection, BulkAction::Rerun, Utc::now());

        assert_eq!(report.applied.len(), 2);
        assert!(jobs.iter().all(|j| j.status == JobStatus::Queued && j.started_at.is_none()));
    }

    #[test]
    fn test_parse_bulk_action() {
        assert_eq!("delete".parse::<BulkAction>(), Ok(BulkAction::Delete));
        assert_eq!("Start".parse::<BulkAction>(), Ok(BulkAction::Start));
        assert!(matches!(
            "pause".parse::<BulkAction>(),
            Err(CrawlError::InvalidAction(_))
        ));
    }
}
