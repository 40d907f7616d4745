mod request;
mod response;

pub use request::MarkerQuery;
pub use response::{HealthResponse, MarkersResponse};
