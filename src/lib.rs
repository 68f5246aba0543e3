pub mod complications;
pub mod config;
pub mod events;
pub mod face;
pub mod render;
pub mod style;
