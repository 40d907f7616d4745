use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tracker custom field identifier
pub type CustomFieldId = i32;

/// How a project is addressed in URLs: numeric id or string identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectRef {
    Id(i32),
    Identifier(String),
}

impl ProjectRef {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i32>() {
            Ok(id) => ProjectRef::Id(id),
            Err(_) => ProjectRef::Identifier(raw.to_string()),
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectRef::Id(id) => project.id == *id,
            ProjectRef::Identifier(identifier) => project.identifier == *identifier,
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "{}", id),
            ProjectRef::Identifier(identifier) => f.write_str(identifier),
        }
    }
}

/// Tracker project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub identifier: String,
}

/// An open issue of the census tracker with its custom field values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusIssue {
    pub id: i32,
    pub subject: String,
    pub status_id: i32,
    pub status_name: String,
    pub updated_on: Option<NaiveDateTime>,

    /// Custom field id to stored text value
    pub custom_values: HashMap<CustomFieldId, String>,
}

impl CensusIssue {
    pub fn custom_value(&self, field: CustomFieldId) -> Option<&str> {
        self.custom_values.get(&field).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ref_parse() {
        assert_eq!(ProjectRef::parse("2"), ProjectRef::Id(2));
        assert_eq!(ProjectRef::parse("censo"), ProjectRef::Identifier("censo".to_string()));
    }

    #[test]
    fn test_project_ref_matches() {
        let project = Project {
            id: 2,
            name: "Censo".to_string(),
            identifier: "censo".to_string(),
        };
        assert!(ProjectRef::Id(2).matches(&project));
        assert!(ProjectRef::parse("censo").matches(&project));
        assert!(!ProjectRef::Id(3).matches(&project));
    }
}
