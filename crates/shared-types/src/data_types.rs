//! Work items and cost records supplied by the project store

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled unit of work (an issue, or its frozen baseline snapshot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Due date of the item's version, used when the item has none of its own
    #[serde(default)]
    pub fixed_version_due_date: Option<NaiveDate>,
    /// Planned effort in hours
    #[serde(default)]
    pub planned_effort: f64,
    /// Percent done, 0 to 100
    #[serde(default)]
    pub done_ratio: u8,
    #[serde(default)]
    pub closed_on: Option<NaiveDate>,
    #[serde(default)]
    pub updated_on: Option<NaiveDate>,
    #[serde(default)]
    pub tracker_id: Option<u64>,
    #[serde(default)]
    pub fixed_version_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
}

impl WorkItem {
    pub fn new(id: u64, start_date: NaiveDate, due_date: NaiveDate, planned_effort: f64) -> Self {
        Self {
            id,
            subject: String::new(),
            start_date: Some(start_date),
            due_date: Some(due_date),
            fixed_version_due_date: None,
            planned_effort,
            done_ratio: 0,
            closed_on: None,
            updated_on: None,
            tracker_id: None,
            fixed_version_id: None,
            assignee_id: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_done_ratio(mut self, done_ratio: u8) -> Self {
        self.done_ratio = done_ratio.min(100);
        self
    }

    pub fn with_updated_on(mut self, updated_on: NaiveDate) -> Self {
        self.updated_on = Some(updated_on);
        self
    }

    /// Mark the item closed; a closed item is fully done
    pub fn closed(mut self, closed_on: NaiveDate) -> Self {
        self.closed_on = Some(closed_on);
        self.done_ratio = 100;
        self
    }

    pub fn with_tracker(mut self, tracker_id: u64) -> Self {
        self.tracker_id = Some(tracker_id);
        self
    }

    pub fn with_version(mut self, version_id: u64, version_due_date: Option<NaiveDate>) -> Self {
        self.fixed_version_id = Some(version_id);
        self.fixed_version_due_date = version_due_date;
        self
    }

    pub fn with_assignee(mut self, assignee_id: u64) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Own due date, falling back to the version's due date
    pub fn effective_due_date(&self) -> Option<NaiveDate> {
        self.due_date.or(self.fixed_version_due_date)
    }

    /// Has both a start date and an effective due date
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() && self.effective_due_date().is_some()
    }

    /// Closed on or before `basis_date`
    pub fn is_closed_by(&self, basis_date: NaiveDate) -> bool {
        matches!(self.closed_on, Some(closed) if closed <= basis_date)
    }

    /// Started on or before `basis_date` and still open at its end
    pub fn is_incomplete_at(&self, basis_date: NaiveDate) -> bool {
        matches!(self.start_date, Some(start) if start <= basis_date)
            && !self.is_closed_by(basis_date)
    }
}

/// Hours spent on a day, with the scope attributes of the item it was logged on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    pub spent_on: NaiveDate,
    pub hours: f64,
    #[serde(default)]
    pub issue_id: Option<u64>,
    #[serde(default)]
    pub tracker_id: Option<u64>,
    #[serde(default)]
    pub fixed_version_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
}

impl CostEntry {
    pub fn new(spent_on: NaiveDate, hours: f64) -> Self {
        Self {
            spent_on,
            hours,
            issue_id: None,
            tracker_id: None,
            fixed_version_id: None,
            assignee_id: None,
        }
    }

    /// Copy the scope attributes of the item the time was logged on
    pub fn for_item(mut self, item: &WorkItem) -> Self {
        self.issue_id = Some(item.id);
        self.tracker_id = item.tracker_id;
        self.fixed_version_id = item.fixed_version_id;
        self.assignee_id = item.assignee_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_version_due_date_fallback() {
        let mut item = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 8.0);
        item.due_date = None;
        assert!(!item.is_scheduled());

        let item = item.with_version(3, Some(date(2024, 2, 1)));
        assert_eq!(item.effective_due_date(), Some(date(2024, 2, 1)));
        assert!(item.is_scheduled());
    }

    #[test]
    fn test_closed_state_relative_to_basis() {
        let item = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 8.0).closed(date(2024, 1, 4));
        assert_eq!(item.done_ratio, 100);
        assert!(item.is_closed_by(date(2024, 1, 4)));
        assert!(!item.is_closed_by(date(2024, 1, 3)));
        assert!(item.is_incomplete_at(date(2024, 1, 3)));
        assert!(!item.is_incomplete_at(date(2024, 1, 10)));
    }

    #[test]
    fn test_not_started_is_not_incomplete() {
        let item = WorkItem::new(1, date(2024, 3, 1), date(2024, 3, 5), 8.0);
        assert!(!item.is_incomplete_at(date(2024, 2, 28)));
    }

    #[test]
    fn test_done_ratio_capped() {
        let item = WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 5), 8.0).with_done_ratio(150);
        assert_eq!(item.done_ratio, 100);
    }

    #[test]
    fn test_work_item_defaults_from_json() {
        let item: WorkItem = serde_json::from_str(
            r#"{"id": 7, "start_date": "2024-01-01", "due_date": null, "planned_effort": 4.0}"#,
        )
        .unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.done_ratio, 0);
        assert!(item.closed_on.is_none());
        assert!(!item.is_scheduled());
    }
}
