//! # Infrastructure Layer
//!
//! Process-level adapters used by the binaries.
//!
//! - [`config`]: Layered settings (file, environment)
//! - [`telemetry`]: `tracing` subscriber bootstrap

pub mod config;
pub mod telemetry;

pub use config::{EngineSettings, LogFormat, LoggingSettings, Settings};
pub use telemetry::init_tracing;
