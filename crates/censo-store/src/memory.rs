//! In-memory storage implementation for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For production workloads, use the PostgreSQL backend.

use async_trait::async_trait;
use censo_core::error::{CensoError, Result};
use censo_core::models::{CensusIssue, CustomFieldId, Project, ProjectRef};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::CensusStore;

#[derive(Debug, Clone)]
struct StoredIssue {
    project_id: i32,
    tracker_id: i32,
    closed: bool,
    issue: CensusIssue,
}

/// In-memory implementation of CensusStore
#[derive(Debug, Clone, Default)]
pub struct MemoryCensusStore {
    projects: Arc<RwLock<Vec<Project>>>,
    issues: Arc<RwLock<Vec<StoredIssue>>>,
    fields: Arc<RwLock<HashMap<CustomFieldId, Vec<String>>>>,
}

impl MemoryCensusStore {
    /// Create a new in-memory census store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project(&self, project: Project) {
        self.projects.write().unwrap().push(project);
    }

    pub fn add_issue(&self, project_id: i32, tracker_id: i32, closed: bool, issue: CensusIssue) {
        self.issues.write().unwrap().push(StoredIssue {
            project_id,
            tracker_id,
            closed,
            issue,
        });
    }

    pub fn set_possible_values(&self, field: CustomFieldId, values: Vec<String>) {
        self.fields.write().unwrap().insert(field, values);
    }
}

#[async_trait]
impl CensusStore for MemoryCensusStore {
    async fn find_project(&self, project: &ProjectRef) -> Result<Option<Project>> {
        let projects = self.projects.read().unwrap();
        Ok(projects.iter().find(|p| project.matches(p)).cloned())
    }

    async fn open_issues(
        &self,
        project_id: i32,
        tracker_id: i32,
        fields: &[CustomFieldId],
    ) -> Result<Vec<CensusIssue>> {
        let issues = self.issues.read().unwrap();

        let mut open: Vec<CensusIssue> = issues
            .iter()
            .filter(|s| s.project_id == project_id && s.tracker_id == tracker_id && !s.closed)
            .map(|s| {
                let mut issue = s.issue.clone();
                issue.custom_values.retain(|field, _| fields.contains(field));
                issue
            })
            .collect();

        open.sort_by_key(|i| i.id);
        Ok(open)
    }

    async fn possible_values(&self, field: CustomFieldId) -> Result<Vec<String>> {
        let fields = self.fields.read().unwrap();
        fields
            .get(&field)
            .cloned()
            .ok_or(CensoError::CustomFieldNotFound { id: field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: i32, values: &[(CustomFieldId, &str)]) -> CensusIssue {
        CensusIssue {
            id,
            subject: format!("Censo {}", id),
            status_id: 1,
            status_name: "Nuevo".to_string(),
            updated_on: None,
            custom_values: values.iter().map(|(k, v)| (*k, v.to_string())).collect(),
        }
    }

    fn store() -> MemoryCensusStore {
        let store = MemoryCensusStore::new();
        store.add_project(Project {
            id: 2,
            name: "Censo".to_string(),
            identifier: "censo".to_string(),
        });
        store.add_issue(2, 9, false, issue(5, &[(118, "4.6"), (999, "ignored")]));
        store.add_issue(2, 9, false, issue(3, &[(118, "4.7")]));
        store.add_issue(2, 9, true, issue(4, &[]));
        store.add_issue(2, 1, false, issue(6, &[]));
        store.add_issue(7, 9, false, issue(8, &[]));
        store
    }

    #[tokio::test]
    async fn test_find_project_by_id_or_identifier() {
        let store = store();
        assert!(store.find_project(&ProjectRef::Id(2)).await.unwrap().is_some());
        assert!(store.find_project(&ProjectRef::parse("censo")).await.unwrap().is_some());
        assert!(store.find_project(&ProjectRef::Id(3)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_issues_filters_and_orders() {
        let store = store();
        let issues = store.open_issues(2, 9, &[118]).await.unwrap();

        let ids: Vec<i32> = issues.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 5]);
        assert_eq!(issues[1].custom_value(118), Some("4.6"));
        assert_eq!(issues[1].custom_value(999), None);
    }

    #[tokio::test]
    async fn test_possible_values() {
        let store = store();
        store.set_possible_values(102, vec!["Suba".to_string(), "Bosa".to_string()]);

        assert_eq!(store.possible_values(102).await.unwrap(), vec!["Suba", "Bosa"]);
        assert!(matches!(
            store.possible_values(106).await,
            Err(CensoError::CustomFieldNotFound { id: 106 })
        ));
    }
}
