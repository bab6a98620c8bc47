//! Request-level EVM rendering

use crate::store::{item_in_scope, ProjectStore};
use chrono::NaiveDate;
use evm_charts_calc::{EvmCalculator, EvmIndicators, EvmResult, ValueUnit};
use evm_charts_chart::{evm_chart_data, performance_chart_data};
use evm_charts_shared::{
    EvmChartData, EvmOptions, PerformanceChartData, ScopeSelector, WorkItem,
};
use serde::Serialize;

/// Everything shown for one request: the indicator table, the EVM chart and
/// the optional performance chart and incomplete listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvmView {
    pub basis_date: NaiveDate,
    pub scope: ScopeSelector,
    pub indicators: Option<EvmIndicators>,
    pub chart: EvmChartData,
    pub performance: Option<PerformanceChartData>,
    pub incomplete: Vec<WorkItem>,
    #[serde(skip)]
    pub evm: Option<EvmResult>,
}

impl EvmView {
    /// View of a scope with nothing scheduled in it
    pub fn empty(basis_date: NaiveDate, scope: ScopeSelector) -> Self {
        Self {
            basis_date,
            scope,
            indicators: None,
            chart: EvmChartData::default(),
            performance: None,
            incomplete: Vec::new(),
            evm: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.evm.is_none()
    }
}

pub struct EvmService<S> {
    store: S,
    unit: ValueUnit,
}

impl<S: ProjectStore> EvmService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            unit: ValueUnit::Hours,
        }
    }

    /// Express indicator values in this unit
    pub fn with_unit(mut self, unit: ValueUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Build the view for one request. Never fails: a scope without
    /// scheduled work yields [`EvmView::empty`].
    pub fn render(&self, options: &EvmOptions) -> EvmView {
        let selector = options.selector();
        let issues = self.store.scope_issues(&selector);
        if issues.is_empty() {
            log::warn!("No scheduled issues in scope {:?}", selector);
            return EvmView::empty(options.basis_date, selector);
        }

        let costs = self.store.scope_costs(&selector);
        let baseline = self.baseline(options, &selector);
        let evm = EvmCalculator::new(baseline.as_deref(), &issues, &costs, options).calculate();

        let indicators = EvmIndicators::new(&evm, self.unit, options.working_hours);
        let chart = evm_chart_data(&evm);
        let performance = options
            .display_performance
            .then(|| performance_chart_data(&evm));
        let incomplete = if options.display_incomplete {
            incomplete_issues(&issues, options.basis_date)
        } else {
            Vec::new()
        };

        EvmView {
            basis_date: options.basis_date,
            scope: selector,
            indicators: Some(indicators),
            chart,
            performance,
            incomplete,
            evm: Some(evm),
        }
    }

    fn baseline(&self, options: &EvmOptions, selector: &ScopeSelector) -> Option<Vec<WorkItem>> {
        if options.no_use_baseline {
            return None;
        }
        let Some(items) = self.store.baseline_for(options.baseline_id) else {
            match options.baseline_id {
                Some(id) => log::warn!("Baseline {} not found, charting without one", id),
                None => log::debug!("Project has no baseline"),
            }
            return None;
        };

        let items: Vec<WorkItem> = items
            .into_iter()
            .filter(|item| item.is_scheduled() && item_in_scope(item, selector))
            .collect();
        if items.is_empty() {
            log::warn!("Baseline has no scheduled issues in scope {:?}", selector);
            return None;
        }
        Some(items)
    }
}

/// Items started by `basis_date` and still open, soonest due first
pub fn incomplete_issues(issues: &[WorkItem], basis_date: NaiveDate) -> Vec<WorkItem> {
    let mut incomplete: Vec<WorkItem> = issues
        .iter()
        .filter(|issue| issue.is_incomplete_at(basis_date))
        .cloned()
        .collect();
    incomplete.sort_by_key(|issue| (issue.effective_due_date(), issue.id));
    incomplete
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_incomplete_issues_ordering() {
        let issues = vec![
            WorkItem::new(1, date(2024, 1, 1), date(2024, 1, 20), 8.0),
            WorkItem::new(2, date(2024, 1, 1), date(2024, 1, 10), 8.0),
            WorkItem::new(3, date(2024, 1, 1), date(2024, 1, 5), 8.0).closed(date(2024, 1, 4)),
            WorkItem::new(4, date(2024, 2, 1), date(2024, 2, 5), 8.0),
            WorkItem::new(5, date(2024, 1, 1), date(2024, 1, 10), 8.0),
        ];
        let ids: Vec<u64> = incomplete_issues(&issues, date(2024, 1, 15))
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec![2, 5, 1]);
    }

    #[test]
    fn test_empty_view() {
        let view = EvmView::empty(date(2024, 1, 1), ScopeSelector::Project);
        assert!(view.is_empty());
        assert!(view.chart.is_empty());
        assert!(view.indicators.is_none());
    }
}
