// Library exports for testing
pub mod config;
pub mod constants;
pub mod generator;
pub mod icon_set;
pub mod manifest;
pub mod pipeline;
