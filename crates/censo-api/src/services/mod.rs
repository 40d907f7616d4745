mod markers;
mod page;
mod snapshot;

pub use markers::{MarkerProvider, ProjectMap};
pub use page::{render_map_page, ClientSettings};
pub use snapshot::{render_snapshot, ViewSnapshot};
