pub mod config;
pub mod output;
pub mod prospects;
pub mod scoring;
pub mod telemetry;
