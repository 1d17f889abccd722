pub mod config;
pub mod mapper;
pub mod posture;
pub mod render;
pub mod sensor;
pub mod skeleton;
pub mod viewer;
