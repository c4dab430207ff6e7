use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::emitter::{InitKind, RenderOptions};
use crate::pipeline::Converter;

pub mod batch;
pub mod convert;
pub mod init;
pub mod inspect;
pub mod order;
pub mod scene;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an export into every scene and init file
    Convert {
        /// articy JSON export (defaults to `project.input` from the config)
        input: Option<PathBuf>,

        /// Output directory (defaults to `project.output_dir` from the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only write these scene files (repeatable)
        #[arg(short, long = "scene")]
        scenes: Vec<String>,

        /// Render labels in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Exit successfully even when some labels were skipped
        #[arg(long)]
        allow_partial: bool,
    },

    /// Write a single scene file
    Scene {
        /// articy JSON export
        input: PathBuf,

        /// Target file name as set on the dialogues (e.g. "script.rpy")
        target: String,

        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write a character or variable declarations file
    Init {
        /// articy JSON export
        input: PathBuf,

        /// Declarations to write: character or variable
        kind: InitKind,

        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Summarize the dialogues of an export and check that each one orders
    Inspect {
        /// articy JSON export
        input: PathBuf,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the linear order of one dialogue
    Order {
        /// articy JSON export
        input: PathBuf,

        /// Label id or label name
        label: String,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert every export found below a directory
    Batch {
        /// Directory searched recursively for .json exports
        source: PathBuf,

        /// Output directory; each export gets a subdirectory named after it
        #[arg(short, long)]
        output: PathBuf,

        /// Config file (defaults to ./renflow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Render labels in parallel
        #[arg(short, long)]
        parallel: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                input,
                output,
                config,
                scenes,
                parallel,
                allow_partial,
            } => convert::execute(
                input.as_deref(),
                output.as_deref(),
                config.as_deref(),
                scenes,
                *parallel,
                *allow_partial,
            ),
            Commands::Scene {
                input,
                target,
                output,
                config,
            } => scene::execute(input, target, output.as_deref(), config.as_deref()),
            Commands::Init {
                input,
                kind,
                output,
                config,
            } => init::execute(input, *kind, output.as_deref(), config.as_deref()),
            Commands::Inspect { input, config } => inspect::execute(input, config.as_deref()),
            Commands::Order { input, label, config } => order::execute(input, label, config.as_deref()),
            Commands::Batch {
                source,
                output,
                config,
                parallel,
                quiet,
            } => batch::execute(source, output, config.as_deref(), *parallel, !*quiet),
        }
    }
}

/// Explicit config file, or `./renflow.toml` when present, or defaults
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    let config = match path {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::discover(std::env::current_dir()?)?,
    };
    Ok(config)
}

/// Read an export and build the graph with the config's schema and formatting
pub(crate) fn open_converter(input: &Path, config: &ProjectConfig) -> anyhow::Result<Converter> {
    let converter = Converter::from_file(input, &config.export, RenderOptions::from(&config.output))?;
    Ok(converter)
}
