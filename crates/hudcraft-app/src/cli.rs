//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hudcraft_core::{AnchorType, ConfigVersion};

#[derive(Debug, Parser)]
#[command(name = "hudcraft", version, about = "Inspect and edit HUD configuration documents")]
pub struct Cli {
    /// JSON settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the built-in default document of a version.
    Defaults {
        version: ConfigVersion,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the setting groups of a section.
    Groups {
        file: PathBuf,
        /// Section to classify (defaults to the first one).
        #[arg(long)]
        section: Option<String>,
        /// Only show groups and settings matching this term.
        #[arg(long)]
        search: Option<String>,
    },
    /// List positionable HUD modules.
    Modules { file: PathBuf },
    /// Drag a module to a surface position.
    Drag {
        file: PathBuf,
        id: String,
        x: f64,
        y: f64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Pin a module to an anchor with a zero offset.
    Snap {
        file: PathBuf,
        id: String,
        anchor: AnchorType,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Feed a JSON array of pointer events to the editor.
    Replay {
        file: PathBuf,
        script: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a document.
    Check { file: PathBuf },
}

impl Cli {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
