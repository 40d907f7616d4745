mod assets;
mod health;
mod map;
mod markers;

pub use assets::map_script;
pub use health::health_check;
pub use map::show_map;
pub use markers::list_markers;
