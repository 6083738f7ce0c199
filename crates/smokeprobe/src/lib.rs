pub mod app;
pub mod config;
pub mod reporter;
pub mod runner;
pub mod telemetry;
