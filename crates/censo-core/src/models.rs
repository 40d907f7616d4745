pub mod ids;
pub mod marker;
pub mod options;
pub mod payload;
pub mod position;
pub mod tracker;

pub use ids::{RecordId, StatusId};
pub use marker::{MarkerRecord, MarkerSet};
pub use options::{FilterOptions, StatusOption};
pub use payload::{MapPayload, MarkerPayload};
pub use position::LatLng;
pub use tracker::{CensusIssue, CustomFieldId, Project, ProjectRef};
