pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::bridge::ExchangeBridge;
pub use adapters::model_file::ModelFileAdapter;
pub use config::store::SettingsStore;
pub use config::Settings;
pub use core::engine::{CutlistEngine, RunSummary};
pub use utils::error::{CutlistError, Result};
