pub mod config;
pub mod physics;
pub mod scene;
