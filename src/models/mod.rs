pub mod config;
pub mod map;

pub use config::AppConfig;
pub use map::{MapColors, MapView, MAP_HEIGHT, MAP_PIXELS, MAP_WIDTH, MAX_SCALE};
