// src/api/filters.rs
// List filters, rendered as JSON:API query parameters

use crate::error::{ProductiveError, Result};
use crate::timesheet::BudgetType;

/// Page size used when the caller gives no limit
pub const DEFAULT_PAGE_SIZE: u32 = 30;
/// Largest page Productive serves
pub const MAX_PAGE_SIZE: u32 = 200;

/// Validate a caller-supplied limit
pub fn page_size(limit: Option<i64>) -> Result<u32> {
    match limit {
        None => Ok(DEFAULT_PAGE_SIZE),
        Some(n) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&n) => Ok(n as u32),
        Some(n) => Err(ProductiveError::InvalidInputShape(format!(
            "limit must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, n
        ))),
    }
}

/// Query parameters for a list request
pub trait ListFilter {
    fn query(&self) -> Vec<(&'static str, String)>;
}

fn push(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&String>) {
    if let Some(v) = value {
        query.push((key, v.clone()));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub page_size: u32,
}

impl ListFilter for ProjectFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter[status]", "1".to_string()),
            ("page[size]", self.page_size.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealFilter {
    pub project_id: String,
    /// None returns both deals and budgets
    pub budget_type: Option<BudgetType>,
    pub page_size: u32,
}

impl ListFilter for DealFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = vec![("filter[project_id]", self.project_id.clone())];
        if let Some(t) = self.budget_type {
            q.push(("filter[budget_type]", t.filter_value().to_string()));
        }
        q.push(("page[size]", self.page_size.to_string()));
        q
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFilter {
    pub deal_id: String,
    pub page_size: u32,
}

impl ListFilter for ServiceFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter[deal_id]", self.deal_id.clone()),
            ("page[size]", self.page_size.to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: String,
    pub page_size: u32,
}

impl ListFilter for TaskFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("filter[project_id]", self.project_id.clone()),
            ("page[size]", self.page_size.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeEntryFilter {
    pub date: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub person_id: Option<String>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub service_id: Option<String>,
    pub page_size: u32,
}

impl ListFilter for TimeEntryFilter {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        push(&mut q, "filter[date]", self.date.as_ref());
        push(&mut q, "filter[after]", self.after.as_ref());
        push(&mut q, "filter[before]", self.before.as_ref());
        push(&mut q, "filter[person_id]", self.person_id.as_ref());
        push(&mut q, "filter[project_id]", self.project_id.as_ref());
        push(&mut q, "filter[task_id]", self.task_id.as_ref());
        push(&mut q, "filter[service_id]", self.service_id.as_ref());
        q.push(("page[size]", self.page_size.to_string()));
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert_eq!(page_size(None).unwrap(), DEFAULT_PAGE_SIZE);
        assert_eq!(page_size(Some(1)).unwrap(), 1);
        assert_eq!(page_size(Some(200)).unwrap(), 200);
        assert!(matches!(
            page_size(Some(0)),
            Err(ProductiveError::InvalidInputShape(_))
        ));
        assert!(matches!(
            page_size(Some(201)),
            Err(ProductiveError::InvalidInputShape(_))
        ));
        assert!(page_size(Some(-5)).is_err());
    }

    #[test]
    fn test_deal_filter_without_type() {
        let f = DealFilter {
            project_id: "P1".into(),
            budget_type: None,
            page_size: 30,
        };
        assert_eq!(
            f.query(),
            vec![
                ("filter[project_id]", "P1".to_string()),
                ("page[size]", "30".to_string()),
            ]
        );
    }

    #[test]
    fn test_deal_filter_with_type() {
        let f = DealFilter {
            project_id: "P1".into(),
            budget_type: Some(BudgetType::Budget),
            page_size: 10,
        };
        let budgets_only = ("filter[budget_type]", "2".to_string());
        assert!(f.query().contains(&budgets_only));
    }

    #[test]
    fn test_time_entry_filter_only_set_fields() {
        let f = TimeEntryFilter {
            person_id: Some("42".into()),
            after: Some("2026-10-01".into()),
            page_size: 50,
            ..Default::default()
        };
        assert_eq!(
            f.query(),
            vec![
                ("filter[after]", "2026-10-01".to_string()),
                ("filter[person_id]", "42".to_string()),
                ("page[size]", "50".to_string()),
            ]
        );
    }
}
