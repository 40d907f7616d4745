use std::collections::HashMap;

use async_trait::async_trait;
use censo_core::error::{CensoError, Result};
use censo_core::models::{CensusIssue, CustomFieldId, Project, ProjectRef};
use chrono::NaiveDateTime;
use sqlx::Row;

use super::PostgresStore;
use crate::ports::CensusStore;

#[async_trait]
impl CensusStore for PostgresStore {
    async fn find_project(&self, project: &ProjectRef) -> Result<Option<Project>> {
        let query = match project {
            ProjectRef::Id(id) => {
                sqlx::query("SELECT id, name, identifier FROM projects WHERE id = $1").bind(*id)
            }
            ProjectRef::Identifier(identifier) => {
                sqlx::query("SELECT id, name, identifier FROM projects WHERE identifier = $1")
                    .bind(identifier.as_str())
            }
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CensoError::Storage(format!("Failed to load project: {}", e)))?;

        Ok(row.map(|row| Project {
            id: row.get("id"),
            name: row.get("name"),
            identifier: row.get("identifier"),
        }))
    }

    async fn open_issues(
        &self,
        project_id: i32,
        tracker_id: i32,
        fields: &[CustomFieldId],
    ) -> Result<Vec<CensusIssue>> {
        let rows = sqlx::query(
            r#"
            SELECT i.id, i.subject, i.updated_on, s.id AS status_id, s.name AS status_name
            FROM issues i
            JOIN issue_statuses s ON s.id = i.status_id
            WHERE i.project_id = $1
              AND i.tracker_id = $2
              AND s.is_closed = FALSE
            ORDER BY i.id
            "#,
        )
        .bind(project_id)
        .bind(tracker_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CensoError::Storage(format!("Failed to load census issues: {}", e)))?;

        let mut issues: Vec<CensusIssue> = rows
            .into_iter()
            .map(|row| {
                let updated_on: Option<NaiveDateTime> = row.get("updated_on");
                CensusIssue {
                    id: row.get("id"),
                    subject: row.get("subject"),
                    status_id: row.get("status_id"),
                    status_name: row.get("status_name"),
                    updated_on,
                    custom_values: HashMap::new(),
                }
            })
            .collect();

        if issues.is_empty() || fields.is_empty() {
            return Ok(issues);
        }

        let issue_ids: Vec<i32> = issues.iter().map(|i| i.id).collect();
        let value_rows = sqlx::query(
            r#"
            SELECT customized_id, custom_field_id, value
            FROM custom_values
            WHERE customized_type = 'Issue'
              AND customized_id = ANY($1)
              AND custom_field_id = ANY($2)
            ORDER BY id
            "#,
        )
        .bind(&issue_ids)
        .bind(fields)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CensoError::Storage(format!("Failed to load custom values: {}", e)))?;

        let mut values: HashMap<i32, HashMap<CustomFieldId, String>> = HashMap::new();
        for row in value_rows {
            let Some(value) = row.get::<Option<String>, _>("value") else {
                continue;
            };
            let issue_id: i32 = row.get("customized_id");
            let field_id: CustomFieldId = row.get("custom_field_id");
            // Multi-value fields keep their first value
            values.entry(issue_id).or_default().entry(field_id).or_insert(value);
        }

        for issue in &mut issues {
            if let Some(found) = values.remove(&issue.id) {
                issue.custom_values = found;
            }
        }

        tracing::debug!(project_id, tracker_id, count = issues.len(), "Loaded open census issues");
        Ok(issues)
    }

    async fn possible_values(&self, field: CustomFieldId) -> Result<Vec<String>> {
        let row = sqlx::query("SELECT possible_values FROM custom_fields WHERE id = $1")
            .bind(field)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CensoError::Storage(format!("Failed to load custom field: {}", e)))?
            .ok_or(CensoError::CustomFieldNotFound { id: field })?;

        let raw: Option<String> = row.get("possible_values");
        parse_possible_values(raw.as_deref())
    }
}

/// Decode a custom field's `possible_values` column.
///
/// The tracker stores the list as a YAML sequence (`"---\n- Suba\n- Bosa\n"`);
/// a NULL or blank column means no configured values.
pub fn parse_possible_values(raw: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let values: Option<Vec<serde_yaml::Value>> = serde_yaml::from_str(raw)
        .map_err(|e| CensoError::Serialization(format!("Invalid possible_values: {}", e)))?;

    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            serde_yaml::Value::String(s) => Some(s),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect())
}
