pub mod config;
pub mod file_discovery;
pub mod openapi;
pub mod processor;
pub mod progress;
pub mod analyzer;
pub mod reporter;

pub use config::Config;
pub use file_discovery::FileDiscovery;
pub use openapi::Stats;
pub use analyzer::{Analyzer, ResultEntry};
pub use reporter::{OutputMode, Reporter};

pub type Result<T> = anyhow::Result<T>;
