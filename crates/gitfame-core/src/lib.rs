//! Shared foundation for the gitfame workspace.
//!
//! This crate provides the pieces used by every other gitfame crate:
//! - [`FameError`] — unified error type using `thiserror`
//! - [`FameConfig`] — configuration loaded from `.gitfame.toml`
//! - [`OutputFormat`] — listing format selector for the CLI

mod config;
mod error;
mod types;

pub use config::{ChartsConfig, FameConfig, OutputConfig};
pub use error::FameError;
pub use types::OutputFormat;

/// A convenience `Result` type for gitfame operations.
pub type Result<T> = std::result::Result<T, FameError>;
