pub mod config;
pub mod town_map;

pub use config::MapConfig;
pub use town_map::{GestureOutcome, MapEvent, TownMap};
