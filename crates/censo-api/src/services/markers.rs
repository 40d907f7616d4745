use censo_core::config::FieldMapping;
use censo_core::error::CensoError;
use censo_core::models::{CensusIssue, CustomFieldId, MapPayload, MarkerPayload, Project, ProjectRef};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// Everything the map page needs for one project
#[derive(Debug, Clone)]
pub struct ProjectMap {
    pub project: Project,
    pub payload: MapPayload,
}

/// Builds marker records from the project's open census issues
pub struct MarkerProvider;

impl MarkerProvider {
    pub async fn load(state: &AppState, project: &ProjectRef) -> Result<ProjectMap, ApiError> {
        let project = state
            .store
            .find_project(project)
            .await?
            .ok_or_else(|| CensoError::ProjectNotFound {
                project: project.to_string(),
            })?;

        let tracker_id = state.settings.tracker_id.value;
        let fields = &state.settings.fields.value;

        let issues = state.store.open_issues(project.id, tracker_id, &fields.all()).await?;

        let localities = state.store.possible_values(fields.locality).await?;
        let building_types = state.store.possible_values(fields.building_type).await?;

        let markers: Vec<MarkerPayload> =
            issues.iter().map(|issue| Self::to_payload(issue, fields)).collect();

        tracing::info!(
            project = %project.identifier,
            tracker_id,
            markers = markers.len(),
            "Loaded census markers"
        );

        Ok(ProjectMap {
            project,
            payload: MapPayload {
                markers,
                localities,
                building_types,
            },
        })
    }

    /// Coordinates are passed through as raw text; the view decides what plots.
    pub fn to_payload(issue: &CensusIssue, fields: &FieldMapping) -> MarkerPayload {
        let text = |field: CustomFieldId| issue.custom_value(field).map(str::to_string);

        MarkerPayload {
            id: json!(issue.id),
            lat: text(fields.latitude).map(Value::String).unwrap_or(Value::Null),
            lng: text(fields.longitude).map(Value::String).unwrap_or(Value::Null),
            location: text(fields.locality),
            address: text(fields.address),
            building_type: text(fields.building_type),
            status: Some(issue.status_name.clone()),
            status_id: json!(issue.status_id),
            title: Some(issue.subject.clone()),
            updated_on: issue.updated_on.map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use censo_core::models::MarkerRecord;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn issue() -> CensusIssue {
        let fields = FieldMapping::default();
        let mut custom_values = HashMap::new();
        custom_values.insert(fields.latitude, "4.61".to_string());
        custom_values.insert(fields.longitude, "-74.08".to_string());
        custom_values.insert(fields.locality, "Chapinero".to_string());
        custom_values.insert(fields.address, "".to_string());

        CensusIssue {
            id: 77,
            subject: "Census 77".to_string(),
            status_id: 12,
            status_name: "Rejected".to_string(),
            updated_on: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(9, 30, 0)),
            custom_values,
        }
    }

    #[test]
    fn test_payload_carries_custom_values() {
        let payload = MarkerProvider::to_payload(&issue(), &FieldMapping::default());

        assert_eq!(payload.id, json!(77));
        assert_eq!(payload.lat, json!("4.61"));
        assert_eq!(payload.location.as_deref(), Some("Chapinero"));
        assert!(payload.building_type.is_none());
        assert_eq!(payload.status_id, json!(12));
        assert_eq!(payload.updated_on.as_deref(), Some("2024-03-01 09:30"));
    }

    #[test]
    fn test_payload_becomes_plottable_record() {
        let payload = MarkerProvider::to_payload(&issue(), &FieldMapping::default());
        let record = MarkerRecord::from_payload(&payload).unwrap();

        assert!(record.is_plottable());
        assert!(record.address.is_none());
        assert_eq!(record.id.as_str(), "77");
    }
}
