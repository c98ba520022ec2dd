pub mod animation;
pub mod camera;
pub mod clock;
pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod field;
pub mod journey;
pub mod loader;
pub mod overlay;
pub mod picking;
pub mod placement;
pub mod rng;
pub mod scene;
pub mod snapshot;
pub mod system;
pub mod types;
