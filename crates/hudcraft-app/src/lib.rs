//! HUDCraft command-line shell.
//!
//! Loads documents from disk, drives an [`hudcraft_core::Editor`] and writes
//! the results back.

pub mod cli;
pub mod commands;
pub mod config;
pub mod file_ops;

pub use cli::{Cli, Command};
pub use config::AppConfig;
