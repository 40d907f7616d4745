use async_trait::async_trait;
use censo_core::error::Result;
use censo_core::models::{CensusIssue, CustomFieldId, Project, ProjectRef};

/// Port for reading census data out of the tracker
#[async_trait]
pub trait CensusStore: Send + Sync {
    /// Resolve a project by numeric id or identifier
    async fn find_project(&self, project: &ProjectRef) -> Result<Option<Project>>;

    /// Open issues of the given tracker in a project, ordered by id.
    /// Only the requested custom field values are loaded.
    async fn open_issues(
        &self,
        project_id: i32,
        tracker_id: i32,
        fields: &[CustomFieldId],
    ) -> Result<Vec<CensusIssue>>;

    /// Allowed values of a list custom field, in configured order
    async fn possible_values(&self, field: CustomFieldId) -> Result<Vec<String>>;
}
