//! SunoHub CLI
//!
//! Library half of the `sunohub` binary: configuration loading and the
//! command handlers.

pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::CliConfig;
pub use error::{CliError, Result};
