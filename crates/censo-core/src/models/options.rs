use serde::{Deserialize, Serialize};

use super::StatusId;

/// A selectable status in the filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusOption {
    pub id: StatusId,
    pub name: String,
}

/// Values offered by the filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Allowed values of the locality custom field
    pub localities: Vec<String>,

    /// Allowed values of the building type custom field
    pub building_types: Vec<String>,

    /// Statuses present in the loaded set
    pub statuses: Vec<StatusOption>,
}
