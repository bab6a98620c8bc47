//! Data access seam and the in-memory project store

use crate::{IntegrationError, Result};
use chrono::NaiveDate;
use evm_charts_config::ConfigParser;
use evm_charts_shared::{CostEntry, DatedValue, ScopeSelector, Series, WorkItem};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Source of schedule, cost and baseline data for one project
pub trait ProjectStore: Send + Sync {
    /// Scheduled work items in scope
    fn scope_issues(&self, selector: &ScopeSelector) -> Vec<WorkItem>;

    /// Hours spent per day in scope on scheduled issues, ascending by date
    fn scope_costs(&self, selector: &ScopeSelector) -> Vec<DatedValue>;

    /// Work items of a baseline. `None` picks the most recent one.
    fn baseline_for(&self, baseline_id: Option<u64>) -> Option<Vec<WorkItem>>;
}

/// A frozen copy of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub issues: Vec<WorkItem>,
}

/// Everything the in-memory store holds, as read from a dataset file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub issues: Vec<WorkItem>,
    pub costs: Vec<CostEntry>,
    pub baselines: Vec<Baseline>,
}

impl Dataset {
    /// Read a YAML, JSON or TOML dataset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut dataset: Dataset = ConfigParser::parse_document(path)?;
        dataset.link_costs()?;
        log::debug!(
            "Loaded dataset {}: {} issues, {} cost entries, {} baselines",
            path.display(),
            dataset.issues.len(),
            dataset.costs.len(),
            dataset.baselines.len()
        );
        Ok(dataset)
    }

    /// Fill in the scope attributes of cost entries logged against a known
    /// issue, and reject duplicate issue ids.
    pub fn link_costs(&mut self) -> Result<()> {
        let mut seen = HashSet::new();
        for issue in &self.issues {
            if !seen.insert(issue.id) {
                return Err(IntegrationError::Dataset(format!(
                    "Duplicate issue id: {}",
                    issue.id
                )));
            }
        }

        for cost in &mut self.costs {
            let Some(issue_id) = cost.issue_id else {
                continue;
            };
            match self.issues.iter().find(|issue| issue.id == issue_id) {
                Some(issue) => {
                    cost.tracker_id = cost.tracker_id.or(issue.tracker_id);
                    cost.fixed_version_id = cost.fixed_version_id.or(issue.fixed_version_id);
                    cost.assignee_id = cost.assignee_id.or(issue.assignee_id);
                }
                None => log::warn!(
                    "Cost entry on {} refers to unknown issue {}",
                    cost.spent_on,
                    issue_id
                ),
            }
        }
        Ok(())
    }
}

/// Whether a work item belongs to the selected scope
pub fn item_in_scope(item: &WorkItem, selector: &ScopeSelector) -> bool {
    in_scope(
        selector,
        item.tracker_id,
        item.fixed_version_id,
        item.assignee_id,
    )
}

fn cost_in_scope(cost: &CostEntry, selector: &ScopeSelector) -> bool {
    in_scope(
        selector,
        cost.tracker_id,
        cost.fixed_version_id,
        cost.assignee_id,
    )
}

fn in_scope(
    selector: &ScopeSelector,
    tracker_id: Option<u64>,
    version_id: Option<u64>,
    assignee_id: Option<u64>,
) -> bool {
    match selector {
        ScopeSelector::Project => true,
        ScopeSelector::Trackers(ids) => tracker_id.is_some_and(|id| ids.contains(&id)),
        ScopeSelector::Version(id) => version_id == Some(*id),
        ScopeSelector::Assignee(id) => assignee_id == Some(*id),
    }
}

/// Project store backed by in-memory tables
#[derive(Debug, Default)]
pub struct InMemoryStore {
    issues: RwLock<Vec<WorkItem>>,
    costs: RwLock<Vec<CostEntry>>,
    baselines: RwLock<Vec<Baseline>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        let store = Self::new();
        *store.issues.write() = dataset.issues;
        *store.costs.write() = dataset.costs;
        for baseline in dataset.baselines {
            store.add_baseline(baseline)?;
        }
        Ok(store)
    }

    pub fn insert_issue(&self, issue: WorkItem) {
        self.issues.write().push(issue);
    }

    pub fn insert_cost(&self, cost: CostEntry) {
        self.costs.write().push(cost);
    }

    pub fn add_baseline(&self, baseline: Baseline) -> Result<()> {
        let mut baselines = self.baselines.write();
        if baselines.iter().any(|b| b.id == baseline.id) {
            return Err(IntegrationError::Store(format!(
                "Baseline {} already exists",
                baseline.id
            )));
        }
        baselines.push(baseline);
        Ok(())
    }

    pub fn issue_count(&self) -> usize {
        self.issues.read().len()
    }
}

impl ProjectStore for InMemoryStore {
    fn scope_issues(&self, selector: &ScopeSelector) -> Vec<WorkItem> {
        self.issues
            .read()
            .iter()
            .filter(|issue| issue.is_scheduled() && item_in_scope(issue, selector))
            .cloned()
            .collect()
    }

    fn scope_costs(&self, selector: &ScopeSelector) -> Vec<DatedValue> {
        let scheduled: HashSet<u64> = self
            .issues
            .read()
            .iter()
            .filter(|issue| issue.is_scheduled())
            .map(|issue| issue.id)
            .collect();

        // only time logged on scheduled issues counts
        let daily: Series = self
            .costs
            .read()
            .iter()
            .filter(|cost| cost.issue_id.is_some_and(|id| scheduled.contains(&id)))
            .filter(|cost| cost_in_scope(cost, selector))
            .map(|cost| (cost.spent_on, cost.hours))
            .collect();
        daily.iter().map(DatedValue::from).collect()
    }

    fn baseline_for(&self, baseline_id: Option<u64>) -> Option<Vec<WorkItem>> {
        let baselines = self.baselines.read();
        let baseline = match baseline_id {
            Some(id) => baselines.iter().find(|b| b.id == id),
            // ties on the creation day go to the higher id
            None => baselines.iter().max_by_key(|b| (b.created_on, b.id)),
        }?;
        Some(baseline.issues.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        let design = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 20.0)
            .with_tracker(1)
            .with_version(10, None)
            .with_assignee(100);
        let build = WorkItem::new(2, date(2024, 1, 3), date(2024, 1, 9), 30.0)
            .with_tracker(2)
            .with_assignee(101);
        let mut unscheduled = WorkItem::new(3, date(2024, 1, 1), date(2024, 1, 2), 5.0);
        unscheduled.start_date = None;

        store.insert_cost(CostEntry::new(date(2024, 1, 2), 4.0).for_item(&design));
        store.insert_cost(CostEntry::new(date(2024, 1, 2), 3.0).for_item(&build));
        store.insert_cost(CostEntry::new(date(2024, 1, 1), 2.0).for_item(&design));
        store.insert_issue(design);
        store.insert_issue(build);
        store.insert_issue(unscheduled);
        store
    }

    #[test]
    fn test_scope_issues_skip_unscheduled() {
        let store = store();
        let ids: Vec<u64> = store
            .scope_issues(&ScopeSelector::Project)
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(store.issue_count(), 3);
    }

    #[test]
    fn test_scope_selectors() {
        let store = store();
        let ids = |selector: ScopeSelector| -> Vec<u64> {
            store.scope_issues(&selector).iter().map(|i| i.id).collect()
        };
        assert_eq!(ids(ScopeSelector::Trackers(vec![2, 5])), vec![2]);
        assert_eq!(ids(ScopeSelector::Version(10)), vec![1]);
        assert_eq!(ids(ScopeSelector::Assignee(101)), vec![2]);
        assert!(ids(ScopeSelector::Assignee(7)).is_empty());
    }

    #[test]
    fn test_scope_costs_are_daily_sums_ascending() {
        let store = store();
        let costs = store.scope_costs(&ScopeSelector::Project);
        assert_eq!(
            costs,
            vec![
                DatedValue::new(date(2024, 1, 1), 2.0),
                DatedValue::new(date(2024, 1, 2), 7.0),
            ]
        );

        let version_costs = store.scope_costs(&ScopeSelector::Version(10));
        assert_eq!(version_costs[1], DatedValue::new(date(2024, 1, 2), 4.0));
    }

    #[test]
    fn test_costs_on_unscheduled_or_missing_issues_are_excluded() {
        let store = InMemoryStore::new();
        let scheduled = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 20.0);
        let mut unscheduled = WorkItem::new(2, date(2024, 1, 1), date(2024, 1, 5), 20.0);
        unscheduled.start_date = None;

        store.insert_cost(CostEntry::new(date(2024, 1, 2), 4.0).for_item(&scheduled));
        store.insert_cost(CostEntry::new(date(2024, 1, 2), 100.0).for_item(&unscheduled));
        store.insert_cost(CostEntry::new(date(2024, 1, 3), 8.0));
        store.insert_issue(scheduled);
        store.insert_issue(unscheduled);

        assert_eq!(
            store.scope_costs(&ScopeSelector::Project),
            vec![DatedValue::new(date(2024, 1, 2), 4.0)]
        );
    }

    #[test]
    fn test_baseline_selection() {
        let store = InMemoryStore::new();
        let item = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 20.0);
        for (id, created_on) in [(1, date(2024, 1, 1)), (2, date(2024, 2, 1)), (3, date(2023, 12, 1))] {
            store
                .add_baseline(Baseline {
                    id,
                    subject: format!("baseline {id}"),
                    created_on,
                    issues: vec![item.clone().with_subject(format!("from {id}"))],
                })
                .unwrap();
        }

        let latest = store.baseline_for(None).unwrap();
        assert_eq!(latest[0].subject, "from 2");
        let chosen = store.baseline_for(Some(3)).unwrap();
        assert_eq!(chosen[0].subject, "from 3");
        assert!(store.baseline_for(Some(42)).is_none());
        assert!(InMemoryStore::new().baseline_for(None).is_none());
    }

    #[test]
    fn test_duplicate_baseline_rejected() {
        let store = InMemoryStore::new();
        let baseline = Baseline {
            id: 1,
            subject: String::new(),
            created_on: date(2024, 1, 1),
            issues: Vec::new(),
        };
        store.add_baseline(baseline.clone()).unwrap();
        assert!(matches!(
            store.add_baseline(baseline),
            Err(IntegrationError::Store(_))
        ));
    }

    #[test]
    fn test_link_costs_copies_issue_scope() {
        let issue = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 20.0).with_tracker(4);
        let mut cost = CostEntry::new(date(2024, 1, 2), 1.5);
        cost.issue_id = Some(1);
        let mut dataset = Dataset {
            issues: vec![issue],
            costs: vec![cost],
            baselines: Vec::new(),
        };
        dataset.link_costs().unwrap();
        assert_eq!(dataset.costs[0].tracker_id, Some(4));

        dataset.issues.push(dataset.issues[0].clone());
        assert!(matches!(
            dataset.link_costs(),
            Err(IntegrationError::Dataset(_))
        ));
    }
}
